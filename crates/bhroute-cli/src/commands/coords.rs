use anyhow::{Context, Result};
use serde::Serialize;

use bhroute_cli::output::{to_json, OutputFormat};
use bhroute_lib::{parse_coordinates, LY_PER_UNIT};

use crate::{CommandContext, CoordsArgs};

#[derive(Debug, Serialize)]
struct CoordsReport {
    coordinates: String,
    portal_code: String,
    distance_to_center_ly: f64,
    radial: f64,
}

pub fn handle_coords(context: &CommandContext, args: &CoordsArgs) -> Result<()> {
    let coords = parse_coordinates(&args.coords)
        .with_context(|| format!("failed to parse coordinates '{}'", args.coords))?;
    let report = CoordsReport {
        coordinates: coords.to_string(),
        portal_code: coords.portal_code(args.planet)?,
        distance_to_center_ly: (coords.distance_to_center() * LY_PER_UNIT).round(),
        radial: coords.radial(),
    };

    if context.format == OutputFormat::Json {
        print!("{}", to_json(&report)?);
        return Ok(());
    }

    println!("coordinates: {}", report.coordinates);
    println!("portal code: {}", report.portal_code);
    println!("distance to center: {:.0} LY", report.distance_to_center_ly);
    println!("radial: {:.1} deg", report.radial);
    Ok(())
}
