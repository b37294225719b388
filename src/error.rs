// Error types for the matching core.
//
// Every failure the core can produce is a variant of `FinderError`. Parse
// errors abort matrix construction and search errors abort the search, so
// callers never see a partial matrix or a partial match list.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

/// Which of the two matrices of a search an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixName {
    /// The large matrix being searched (the "frame").
    Source,
    /// The small pattern being searched for (the "image").
    Target,
}

impl MatrixName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatrixName::Source => "source",
            MatrixName::Target => "target",
        }
    }

    /// Parse a matrix name, ignoring case. Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "source" => Some(MatrixName::Source),
            "target" => Some(MatrixName::Target),
            _ => None,
        }
    }
}

impl fmt::Display for MatrixName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum FinderError {
    /// A parsed byte is neither the configured one-byte nor zero-byte.
    #[error("found invalid value in the matrix {:?}", char::from(*byte))]
    InvalidCell { byte: u8 },

    /// A row is wider than the width fixed by the first non-empty row.
    #[error(
        "matrix width = {expected}, specified by the first row, is larger at line #{line} ({actual})"
    )]
    RowTooWide {
        expected: usize,
        line: usize,
        actual: usize,
    },

    #[error(
        "matrix to compare with is not the same size ({},{}) != ({},{})",
        left.0, left.1, right.0, right.1
    )]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("the {0} matrix is not loaded, load the {0} matrix first")]
    NotLoaded(MatrixName),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to read the matrix: {0}")]
    Io(#[from] std::io::Error),
}

impl FinderError {
    /// True for errors caused by the matrix text itself.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            FinderError::InvalidCell { .. } | FinderError::RowTooWide { .. }
        )
    }
}
