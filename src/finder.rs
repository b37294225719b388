// Finder session: the state a CLI run or a server holds around a search.
//
// A `Finder` owns the source and target matrices, the symbols used to
// parse them, the search parameters and the result of the last search.
// The matching itself lives in `search`; this type only keeps the pieces
// together so the web handlers and the terminal output can query them.

use std::io::Read;

use crate::error::{FinderError, MatrixName, Result};
use crate::matrix::{CellSymbols, Matrix};
use crate::search::{self, Match, SearchParams};

/// Per-call overrides for a search. Zero or missing values keep the
/// session parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOverrides {
    pub threshold: Option<f64>,
    pub delta: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Finder {
    symbols: CellSymbols,
    params: SearchParams,
    source: Option<Matrix>,
    target: Option<Matrix>,
    matches: Vec<Match>,
}

impl Finder {
    pub fn new(symbols: CellSymbols, params: SearchParams) -> Self {
        Self {
            symbols,
            params,
            ..Self::default()
        }
    }

    pub fn symbols(&self) -> CellSymbols {
        self.symbols
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    /// Parse and install the source matrix. On error the previous source
    /// (if any) is kept.
    pub fn load_source<R: Read>(&mut self, reader: R) -> Result<&Matrix> {
        let matrix = Matrix::load(reader, self.symbols)?;
        Ok(self.set_source(matrix))
    }

    /// Parse and install the target matrix. On error the previous target
    /// (if any) is kept.
    pub fn load_target<R: Read>(&mut self, reader: R) -> Result<&Matrix> {
        let matrix = Matrix::load(reader, self.symbols)?;
        Ok(self.set_target(matrix))
    }

    /// Load either matrix by name.
    pub fn load<R: Read>(&mut self, name: MatrixName, reader: R) -> Result<&Matrix> {
        match name {
            MatrixName::Source => self.load_source(reader),
            MatrixName::Target => self.load_target(reader),
        }
    }

    /// Install a new source. The previous result no longer applies and is
    /// dropped.
    pub fn set_source(&mut self, matrix: Matrix) -> &Matrix {
        self.matches.clear();
        self.source.insert(matrix)
    }

    /// Install a new target, dropping the previous result.
    pub fn set_target(&mut self, matrix: Matrix) -> &Matrix {
        self.matches.clear();
        self.target.insert(matrix)
    }

    pub fn source(&self) -> Option<&Matrix> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&Matrix> {
        self.target.as_ref()
    }

    pub fn matrix(&self, name: MatrixName) -> Option<&Matrix> {
        match name {
            MatrixName::Source => self.source(),
            MatrixName::Target => self.target(),
        }
    }

    /// Run the search with the session parameters, replacing any previous
    /// result.
    pub fn search(&mut self) -> Result<&[Match]> {
        self.search_with(SearchOverrides::default())
    }

    /// Run the search, first applying any non-zero overrides to the
    /// session parameters.
    pub fn search_with(&mut self, overrides: SearchOverrides) -> Result<&[Match]> {
        let source = self
            .source
            .as_ref()
            .ok_or(FinderError::NotLoaded(MatrixName::Source))?;
        let target = self
            .target
            .as_ref()
            .ok_or(FinderError::NotLoaded(MatrixName::Target))?;

        let mut params = self.params;
        if let Some(threshold) = overrides.threshold.filter(|t| *t != 0.0) {
            params.threshold = threshold;
        }
        if let Some(delta) = overrides.delta.filter(|d| *d != 0) {
            params.delta = delta;
        }

        let found = search::search(source, target, &params)?;
        self.params = params;
        self.matches = found;
        Ok(&self.matches)
    }

    /// The matches of the last successful search.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn get_match(&self, id: usize) -> Option<&Match> {
        self.matches.get(id)
    }

    /// The part of the source covered by match `id`.
    pub fn match_region(&self, id: usize) -> Option<Matrix> {
        let m = self.get_match(id)?;
        let (width, height) = self.target.as_ref()?.size();
        self.source.as_ref()?.sample(m.x, m.y, width, height)
    }

    /// True if a match starts exactly at `(x, y)`.
    pub fn is_match_point(&self, x: usize, y: usize) -> bool {
        self.matches.iter().any(|m| m.x == x && m.y == y)
    }

    /// True if `(x, y)` falls inside the highlighted area of any match.
    ///
    /// The area spans from the match offset to offset + target size, both
    /// ends included, so the highlight also frames the row and column just
    /// past the matched region.
    pub fn is_in_match_area(&self, x: usize, y: usize) -> bool {
        let Some((width, height)) = self.target.as_ref().map(Matrix::size) else {
            return false;
        };
        self.matches.iter().any(|m| {
            (m.x..=m.x + width).contains(&x) && (m.y..=m.y + height).contains(&y)
        })
    }

    /// The last result as a JSON array.
    pub fn matches_json(&self) -> String {
        crate::output::matches_json(&self.matches)
    }
}
