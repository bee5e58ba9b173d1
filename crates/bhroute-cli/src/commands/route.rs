use anyhow::{bail, Context, Result};
use tracing::info;

use bhroute_cli::output::format_routes;
use bhroute_lib::{find_route_with, find_routes_with, HopCatalog, RouteSummary, System};

use super::load_catalog;
use crate::{CommandContext, RouteArgs};

pub fn handle_route(context: &CommandContext, args: &RouteArgs) -> Result<()> {
    let catalog = load_catalog(context)?;
    let hops = catalog.valid_hops();
    let origins = resolve_all(&catalog, &args.from)?;
    let destinations = resolve_all(&catalog, &args.to)?;

    let model = args.optimize.cost_model();
    let tuning = args.tuning();
    info!(
        hops = hops.len(),
        origins = origins.len(),
        destinations = destinations.len(),
        optimize = %args.optimize,
        "planning routes"
    );

    let routes = match (origins.as_slice(), destinations.as_slice()) {
        ([origin], _) => find_routes_with(
            origin,
            &destinations,
            &hops,
            args.max_jump_range,
            &model,
            &tuning,
        ),
        (_, [destination]) => find_route_with(
            &origins,
            destination,
            &hops,
            args.max_jump_range,
            &model,
            &tuning,
        ),
        _ => bail!("give either a single --from or a single --to"),
    }
    .context("failed to plan route")?;

    let summaries: Vec<RouteSummary> = routes
        .iter()
        .map(|route| RouteSummary::from_route(route, args.optimize, args.max_jump_range))
        .collect();
    print!("{}", format_routes(&summaries, context.format)?);
    Ok(())
}

fn resolve_all(catalog: &HopCatalog, queries: &[String]) -> Result<Vec<System>> {
    queries
        .iter()
        .map(|query| {
            catalog
                .resolve_system(query)
                .with_context(|| format!("failed to resolve system '{query}'"))
        })
        .collect()
}
