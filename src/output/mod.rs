// Output formatting: JSON results and terminal display.

pub mod terminal;

use std::fmt;
use std::str::FromStr;

use crate::search::Match;

/// How the CLI prints the result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The reduced matches as a JSON array.
    #[default]
    Json,
    /// The source matrix with the match areas highlighted.
    Text,
    /// Same as `Text`.
    Matrix,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Matrix => "matrix",
        }
    }

    /// True for the formats that draw the highlighted source matrix.
    pub fn is_matrix(&self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Matrix)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "text" => Ok(OutputFormat::Text),
            "matrix" => Ok(OutputFormat::Matrix),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format {other:?}. Available options are: 'json', 'text' or 'matrix'"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize matches as a JSON array of `{x, y, percentage}` objects.
pub fn matches_json(matches: &[Match]) -> String {
    // A slice of plain structs always serializes.
    serde_json::to_string(matches).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("Matrix".parse::<OutputFormat>(), Ok(OutputFormat::Matrix));
    }

    #[test]
    fn test_unknown_format_lists_options() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("'json', 'text' or 'matrix'"), "got {err}");
    }

    #[test]
    fn test_matches_json() {
        let matches = vec![Match {
            x: 1,
            y: 0,
            percentage: 100.0,
        }];
        assert_eq!(
            matches_json(&matches),
            r#"[{"x":1,"y":0,"percentage":100.0}]"#
        );
        assert_eq!(matches_json(&[]), "[]");
    }
}
