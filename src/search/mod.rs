// Exhaustive 2D pattern search.
//
// The target is slid over every offset of the source where it fits
// entirely, row by row. Each offset is scored with `Matrix::compare` and
// kept when the score reaches the threshold. The raw hits are then
// clustered by `reduce` so each occurrence is reported once.

pub mod reduce;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, MatrixName, Result};
use crate::matrix::Matrix;

/// Default minimum match percentage. Offsets scoring lower are ignored.
pub const DEFAULT_MIN_MATCH_PERCENTAGE: f64 = 50.0;

/// Default clustering tolerance: matches at most this far apart on both
/// axes are considered the same occurrence.
pub const DEFAULT_DELTA: usize = 1;

/// Where the target was found in the source, and how well it matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Column of the top-left corner in the source.
    pub x: usize,
    /// Row of the top-left corner in the source.
    pub y: usize,
    /// Similarity from 0.0 to 100.0.
    pub percentage: f64,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{:.6})", self.x, self.y, self.percentage)
    }
}

/// Search tuning: similarity threshold and clustering tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Minimum percentage (inclusive) for an offset to count as a match.
    pub threshold: f64,
    /// Maximum per-axis distance for two matches to be clustered.
    pub delta: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MIN_MATCH_PERCENTAGE,
            delta: DEFAULT_DELTA,
        }
    }
}

impl SearchParams {
    pub fn new(threshold: f64, delta: usize) -> Self {
        Self { threshold, delta }
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0.0 {
            return Err(FinderError::InvalidParameter(
                "percentage cannot be 0%".to_string(),
            ));
        }
        if self.threshold.is_nan() {
            return Err(FinderError::InvalidParameter(
                "percentage must be a number".to_string(),
            ));
        }
        if self.delta == 0 {
            return Err(FinderError::InvalidParameter(
                "delta cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Find every occurrence of `target` in `source`.
///
/// Returns one match per cluster of nearby raw matches, in the order the
/// clusters were found. Fails before scanning if either matrix is empty
/// or the parameters are invalid.
pub fn search(source: &Matrix, target: &Matrix, params: &SearchParams) -> Result<Vec<Match>> {
    if source.is_empty() {
        return Err(FinderError::NotLoaded(MatrixName::Source));
    }
    if target.is_empty() {
        return Err(FinderError::NotLoaded(MatrixName::Target));
    }
    params.validate()?;

    let raw = scan(source, target, params.threshold)?;
    Ok(reduce::reduce(raw, params.delta))
}

/// Score every offset where `target` fits in `source` and keep those at or
/// above `threshold`, in row-major scan order (`y` outer, `x` inner).
///
/// These are the raw, unclustered matches.
pub fn scan(source: &Matrix, target: &Matrix, threshold: f64) -> Result<Vec<Match>> {
    let (width, height) = target.size();
    let (Some(max_x), Some(max_y)) = (
        source.width().checked_sub(width),
        source.height().checked_sub(height),
    ) else {
        // Target larger than the source: nowhere to place it.
        return Ok(Vec::new());
    };

    let mut matches = Vec::new();
    for y in 0..=max_y {
        for x in 0..=max_x {
            let Some(sample) = source.sample(x, y, width, height) else {
                break;
            };
            let percentage = sample.compare(target)?;
            if percentage >= threshold {
                matches.push(Match { x, y, percentage });
            }
        }
    }

    Ok(matches)
}
