use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the bhroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Coordinate text did not match any accepted layout.
    #[error("not valid galactic coordinates: '{text}'")]
    CoordinateSyntax { text: String },

    /// A coordinate field was negative, non-integral, or above its bound.
    #[error("{field} must be an integer in range 0x0 to 0x{max:X}: {value}")]
    CoordinateRange {
        field: &'static str,
        value: String,
        max: u16,
    },

    /// Portal codes only exist for planet indices 0x0 through 0xF.
    #[error("illegal planet code: 0x{planet:X}")]
    InvalidPlanet { planet: u8 },

    /// Raised when a negative weight is handed to the shortest path solver.
    #[error("weight must be >= 0 (edge {from} -> {to} has weight {weight})")]
    NegativeWeight { from: usize, to: usize, weight: f64 },

    /// Raised when an edge references a node outside the solver's graph.
    #[error("node {node} is out of range for a graph of {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    /// Raised when a cost model profile name is not recognised.
    #[error("unknown optimization value: {name}")]
    UnknownProfile { name: String },

    /// Raised when the maximum jump range cannot produce jump estimates.
    #[error("maximum jump range must be a positive number of light-years: {range}")]
    InvalidJumpRange { range: f64 },

    /// Raised when a system name could not be found in the hop catalog.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the solver left a free endpoint unreachable.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a hop data file contains malformed rows or headers.
    #[error("invalid hop data: {message}")]
    HopDataValidation { message: String },

    /// Raised when a hop data set is internally inconsistent.
    #[error("hop data failed validation with {} issue(s): {}", .issues.len(), .issues.join("; "))]
    DatasetValidation { issues: Vec<String> },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the hop data file")]
    ProjectDirsUnavailable,

    /// Hop data could not be located at the resolved path.
    #[error("hop data not found at {path}")]
    HopDataNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_system_lists_suggestions() {
        let error = Error::UnknownSystem {
            name: "Hermits Hom".to_string(),
            suggestions: vec!["Hermit's Home".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "unknown system name: Hermits Hom. Did you mean 'Hermit's Home'?"
        );
    }

    #[test]
    fn range_error_renders_hex_bound() {
        let error = Error::CoordinateRange {
            field: "y",
            value: "0x100".to_string(),
            max: 0xFF,
        };
        assert_eq!(
            error.to_string(),
            "y must be an integer in range 0x0 to 0xFF: 0x100"
        );
    }
}
