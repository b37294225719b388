use std::env;

use crate::error::Result;
use crate::matrix::{CellSymbols, DEFAULT_ONE, DEFAULT_ZERO};
use crate::output::OutputFormat;
use crate::search::{SearchParams, DEFAULT_DELTA, DEFAULT_MIN_MATCH_PERCENTAGE};

/// Prefix shared by every environment variable the tool reads.
pub const ENV_PREFIX: &str = "FINDER2D";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy. Command-line flags
/// override whatever is loaded here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Source (frame) matrix file (FINDER2D_SOURCE)
    pub source: Option<String>,
    /// Target (image) matrix file (FINDER2D_TARGET)
    pub target: Option<String>,
    /// Character for an "on" cell (FINDER2D_ON, default `+`)
    pub on: String,
    /// Character for an "off" cell (FINDER2D_OFF, default a space)
    pub off: String,
    /// Minimum match percentage (FINDER2D_PERCENTAGE, default 50.0)
    pub percentage: f64,
    /// Clustering tolerance (FINDER2D_DELTA, default 1)
    pub delta: usize,
    /// Output format for `search` (FINDER2D_OUTPUT, default json)
    pub output: OutputFormat,
    /// HTTP port for `serve` (FINDER2D_PORT, default 8080)
    pub port: u16,
    /// Bind address for `serve` (FINDER2D_BIND, default 127.0.0.1)
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            on: char::from(DEFAULT_ONE).to_string(),
            off: char::from(DEFAULT_ZERO).to_string(),
            percentage: DEFAULT_MIN_MATCH_PERCENTAGE,
            delta: DEFAULT_DELTA,
            output: OutputFormat::Json,
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Keys are `FINDER2D_<NAME>` in upper case. Empty values count as
    /// unset, and values that fail to parse fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{}", name.to_uppercase())).filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            source: get("source"),
            target: get("target"),
            on: get("on").unwrap_or(defaults.on),
            off: get("off").unwrap_or(defaults.off),
            percentage: get("percentage")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.percentage),
            delta: get("delta")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.delta),
            output: get("output")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.output),
            port: get("port")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            bind: get("bind").unwrap_or(defaults.bind),
        }
    }

    /// The cell symbols, validated.
    pub fn symbols(&self) -> Result<CellSymbols> {
        CellSymbols::from_strs(&self.on, &self.off)
    }

    /// The search parameters, validated. A zero percentage or delta means
    /// "use the default".
    pub fn search_params(&self) -> Result<SearchParams> {
        let threshold = if self.percentage == 0.0 {
            DEFAULT_MIN_MATCH_PERCENTAGE
        } else {
            self.percentage
        };
        let delta = if self.delta == 0 {
            DEFAULT_DELTA
        } else {
            self.delta
        };
        let params = SearchParams::new(threshold, delta);
        params.validate()?;
        Ok(params)
    }
}
