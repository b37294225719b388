// Finder2D: find a binary 2D pattern inside a larger binary 2D matrix.
//
// This is the library root. `matrix` and `search` are the matching core;
// `finder` holds a search session; `config`, `output` and `web` are the
// layers the CLI and the HTTP service are built from.

pub mod config;
pub mod error;
pub mod finder;
pub mod matrix;
pub mod output;
pub mod search;

#[cfg(feature = "web")]
pub mod web;

pub use error::{FinderError, MatrixName, Result};
pub use finder::{Finder, SearchOverrides};
pub use matrix::{load_matrix, CellSymbols, Matrix};
pub use search::{search, Match, SearchParams};
