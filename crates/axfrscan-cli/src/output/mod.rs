//! Output formatting for different formats.

mod reporter;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use reporter::TerminalReporter;

/// Available report formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured progress and summary
    #[default]
    Pretty,
    /// JSON report document
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values_match_config_values() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("yaml", true).is_err());

        let json: OutputFormat = serde_json::from_str("\"pretty\"").unwrap();
        assert_eq!(json, OutputFormat::Pretty);
    }
}
