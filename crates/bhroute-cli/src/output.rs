//! Output formatting for command results.

use std::fmt::Write;

use anyhow::Result;
use bhroute_lib::{HopStats, RouteRenderMode, RouteSummary, ValidationReport};
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One explanation line per leg.
    #[default]
    Text,
    /// Bare system labels prefixed with `+`, `|` and `-`.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Basic => RouteRenderMode::Basic,
            OutputFormat::Text | OutputFormat::Json => RouteRenderMode::PlainText,
        }
    }
}

/// Render route summaries, separated by blank lines in the text formats.
pub fn format_routes(summaries: &[RouteSummary], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(summaries);
    }

    let mode = format.render_mode();
    Ok(summaries
        .iter()
        .map(|summary| summary.render(mode))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Render a validation report.
pub fn format_validation(report: &ValidationReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(report);
    }

    let mut buffer = String::new();
    for issue in &report.issues {
        let _ = writeln!(buffer, "{issue}");
    }
    let _ = writeln!(
        buffer,
        "{} hops checked, {} usable, {} issue(s)",
        report.hops,
        report.valid_hops,
        report.issues.len()
    );
    Ok(buffer)
}

/// Render hop statistics as CSV rows.
pub fn format_stats(stats: &[HopStats], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(stats);
    }

    let mut buffer = String::from("region,axial_dist,radial_dist,dist\n");
    for row in stats {
        let _ = writeln!(
            buffer,
            "{},{},{},{}",
            row.region, row.axial_dist, row.radial_dist, row.dist
        );
    }
    Ok(buffer)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhroute_lib::{find_routes, parse_coordinates, Optimization, System};

    fn summary() -> RouteSummary {
        let origin = System::new("", "A", parse_coordinates("0100:007F:0100:0001").unwrap());
        let destination = System::new("", "B", parse_coordinates("0100:007F:0100:0002").unwrap());
        let model = Optimization::Time.cost_model();
        let route = find_routes(&origin, &[destination], &[], 2000.0, &model)
            .unwrap()
            .remove(0);
        RouteSummary::from_route(&route, Optimization::Time, 2000.0)
    }

    #[test]
    fn basic_routes_list_labels() {
        let text = format_routes(&[summary()], OutputFormat::Basic).unwrap();
        assert_eq!(text, "+ A\n- B\n");
    }

    #[test]
    fn json_routes_are_an_array() {
        let json = format_routes(&[summary()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["score"], 1);
    }

    #[test]
    fn stats_render_with_header() {
        let text = format_stats(&[], OutputFormat::Text).unwrap();
        assert_eq!(text, "region,axial_dist,radial_dist,dist\n");
    }
}
