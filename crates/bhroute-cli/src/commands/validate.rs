use anyhow::Result;

use bhroute_cli::output::format_validation;
use bhroute_lib::validate;

use super::load_catalog;
use crate::CommandContext;

pub fn handle_validate(context: &CommandContext) -> Result<()> {
    let catalog = load_catalog(context)?;
    let report = validate(catalog.hops());
    print!("{}", format_validation(&report, context.format)?);
    report.into_result()?;
    Ok(())
}
