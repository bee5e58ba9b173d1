pub mod coords;
pub mod route;
pub mod stats;
pub mod validate;

use anyhow::{Context, Result};
use bhroute_lib::{resolve_hops_path, HopCatalog};

use crate::CommandContext;

/// Load the hop catalog and apply the global platform and galaxy filters.
pub(crate) fn load_catalog(context: &CommandContext) -> Result<HopCatalog> {
    let path = resolve_hops_path(context.hops.as_deref())
        .context("failed to locate hop data")?;
    let catalog = HopCatalog::from_path(&path)
        .with_context(|| format!("failed to load hop data from {}", path.display()))?;

    if context.platform.is_none() && context.galaxy.is_none() {
        return Ok(catalog);
    }
    Ok(catalog.filter(context.platform, context.galaxy.as_deref()))
}
