// Binary matrices: the grid type searched by the finder.
//
// A matrix is an immutable, rectangular, row-major grid of bits. It is
// built once by parsing text (see `parse`) or by sampling another matrix,
// and never changes afterwards: there are no mutators.

pub mod parse;

use std::io::Read;

use crate::error::{FinderError, Result};

pub use parse::load_matrix;

/// Default byte for an "on" cell in matrix text.
pub const DEFAULT_ONE: u8 = b'+';
/// Default byte for an "off" cell in matrix text.
pub const DEFAULT_ZERO: u8 = b' ';

/// The pair of bytes that encode one and zero cells in matrix text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSymbols {
    one: u8,
    zero: u8,
}

impl CellSymbols {
    /// Build a symbol pair. The two bytes must differ.
    pub fn new(one: u8, zero: u8) -> Result<Self> {
        if one == zero {
            return Err(FinderError::InvalidParameter(format!(
                "the on and off symbols must differ (both are {:?})",
                char::from(one)
            )));
        }
        Ok(Self { one, zero })
    }

    /// Build a symbol pair from strings, using the first byte of each.
    pub fn from_strs(one: &str, zero: &str) -> Result<Self> {
        let first = |s: &str, which: &str| {
            s.bytes().next().ok_or_else(|| {
                FinderError::InvalidParameter(format!("the {which} symbol cannot be empty"))
            })
        };
        Self::new(first(one, "on")?, first(zero, "off")?)
    }

    pub fn one(&self) -> u8 {
        self.one
    }

    pub fn zero(&self) -> u8 {
        self.zero
    }

    /// Map a text byte to a cell value, or `None` if it is neither symbol.
    pub fn decode(&self, byte: u8) -> Option<u8> {
        if byte == self.one {
            Some(1)
        } else if byte == self.zero {
            Some(0)
        } else {
            None
        }
    }

    /// The symbols as one-character strings, in `(zero, one)` order.
    pub fn as_strings(&self) -> (String, String) {
        (
            char::from(self.zero).to_string(),
            char::from(self.one).to_string(),
        )
    }
}

impl Default for CellSymbols {
    fn default() -> Self {
        Self {
            one: DEFAULT_ONE,
            zero: DEFAULT_ZERO,
        }
    }
}

/// A rectangular grid of 0/1 cells.
///
/// An empty matrix always has `width == height == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Matrix {
    /// The 0×0 matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a matrix from explicit rows of 0/1 values.
    ///
    /// Every row must have the same length and hold only 0 or 1.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            if rows.iter().any(|r| !r.is_empty()) {
                return Err(FinderError::InvalidParameter(
                    "matrix rows must all have the same length".to_string(),
                ));
            }
            return Ok(Self::empty());
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.len() != width {
                return Err(FinderError::InvalidParameter(
                    "matrix rows must all have the same length".to_string(),
                ));
            }
            if let Some(&bad) = row.iter().find(|&&v| v > 1) {
                return Err(FinderError::InvalidCell { byte: bad });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            cells,
            width,
            height: rows.len(),
        })
    }

    /// Parse a matrix from a reader. See [`parse::load_matrix`].
    pub fn load<R: Read>(reader: R, symbols: CellSymbols) -> Result<Self> {
        parse::parse_reader(reader, symbols)
    }

    /// Parse a matrix from in-memory text.
    pub fn parse(text: &[u8], symbols: CellSymbols) -> Result<Self> {
        parse::parse_reader(text, symbols)
    }

    // Caller guarantees `cells.len() == width * height`, and that a zero
    // width implies a zero height.
    pub(crate) fn from_parts(cells: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The cell at column `x`, row `y`, or `None` outside the matrix.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact(0) panics, so an empty matrix short-circuits.
        let width = self.width.max(1);
        self.cells.chunks_exact(width).take(self.height)
    }

    /// Render the matrix with the given strings for zero and one cells.
    ///
    /// Every row, including the last, ends with a newline.
    pub fn render(&self, zero: &str, one: &str) -> String {
        let cell_len = one.len().max(zero.len());
        let mut out = String::with_capacity(self.cells.len() * cell_len + self.height);
        for row in self.rows() {
            for &cell in row {
                out.push_str(if cell == 1 { one } else { zero });
            }
            out.push('\n');
        }
        out
    }

    /// Render the matrix back to text with the given symbols.
    pub fn to_text(&self, symbols: CellSymbols) -> String {
        let (zero, one) = symbols.as_strings();
        self.render(&zero, &one)
    }

    /// Copy out the `w`×`h` region whose top-left corner is `(x, y)`.
    ///
    /// Returns `None` if the region does not fit inside the matrix. A
    /// region with no area yields the empty matrix.
    pub fn sample(&self, x: usize, y: usize, w: usize, h: usize) -> Option<Matrix> {
        let right = x.checked_add(w)?;
        let bottom = y.checked_add(h)?;
        if right > self.width || bottom > self.height {
            return None;
        }
        if w == 0 || h == 0 {
            return Some(Matrix::empty());
        }

        let mut cells = Vec::with_capacity(w * h);
        for row in y..bottom {
            let start = row * self.width + x;
            cells.extend_from_slice(&self.cells[start..start + w]);
        }
        Some(Matrix::from_parts(cells, w, h))
    }

    /// Percentage (0–100) of positions where both matrices hold the same bit.
    ///
    /// Both matrices must have the same size. Two empty matrices score 0:
    /// nothing to compare is never a match.
    pub fn compare(&self, other: &Matrix) -> Result<f64> {
        if self.size() != other.size() {
            return Err(FinderError::DimensionMismatch {
                left: self.size(),
                right: other.size(),
            });
        }
        if self.is_empty() {
            return Ok(0.0);
        }

        let same = self
            .cells
            .iter()
            .zip(&other.cells)
            .filter(|(a, b)| a == b)
            .count();

        Ok(100.0 * same as f64 / self.cells.len() as f64)
    }
}
