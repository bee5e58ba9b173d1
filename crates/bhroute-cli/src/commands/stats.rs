use anyhow::Result;

use bhroute_cli::output::format_stats;
use bhroute_lib::hop_stats;

use super::load_catalog;
use crate::CommandContext;

pub fn handle_stats(context: &CommandContext) -> Result<()> {
    let catalog = load_catalog(context)?;
    let stats = hop_stats(catalog.hops());
    print!("{}", format_stats(&stats, context.format)?);
    Ok(())
}
