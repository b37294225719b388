// Matrix text parser.
//
// Format: one line per row, one byte per cell, lines separated by '\n'.
// Each byte must be the configured "one" or "zero" symbol.
//
// Width is fixed by the first non-empty line. Later lines may be shorter
// (they are right-padded with zero cells) but never longer. A trailing
// newline does not add an empty row, but blank lines before it do.

use std::io::{BufRead, BufReader, Read};

use crate::error::{FinderError, Result};

use super::{CellSymbols, Matrix};

/// Load a matrix from a byte stream, using `one` and `zero` as the cell
/// symbols.
///
/// The stream is read to the end. Parsing is all-or-nothing: on error no
/// matrix is returned. An empty stream gives the 0×0 matrix.
pub fn load_matrix<R: Read>(reader: R, one: u8, zero: u8) -> Result<Matrix> {
    parse_reader(reader, CellSymbols::new(one, zero)?)
}

pub(crate) fn parse_reader<R: Read>(reader: R, symbols: CellSymbols) -> Result<Matrix> {
    let reader = BufReader::new(reader);
    let mut rows: Vec<Vec<u8>> = Vec::new();
    let mut width: Option<usize> = None;

    // `split` yields nothing for the empty segment after a final '\n'.
    for (index, line) in reader.split(b'\n').enumerate() {
        let row = decode_row(&line?, symbols)?;
        match width {
            None if row.is_empty() => {}
            None => width = Some(row.len()),
            Some(expected) if row.len() > expected => {
                return Err(FinderError::RowTooWide {
                    expected,
                    line: index + 1,
                    actual: row.len(),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    let Some(width) = width else {
        return Ok(Matrix::empty());
    };

    let height = rows.len();
    let mut cells = Vec::with_capacity(width * height);
    for mut row in rows {
        row.resize(width, 0);
        cells.extend_from_slice(&row);
    }

    Ok(Matrix::from_parts(cells, width, height))
}

fn decode_row(line: &[u8], symbols: CellSymbols) -> Result<Vec<u8>> {
    line.iter()
        .map(|&byte| symbols.decode(byte).ok_or(FinderError::InvalidCell { byte }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Matrix> {
        load_matrix(text.as_bytes(), b'1', b'0')
    }

    fn rows(matrix: &Matrix) -> Vec<Vec<u8>> {
        matrix.rows().map(<[u8]>::to_vec).collect()
    }

    #[test]
    fn test_empty_input() {
        let matrix = load("").unwrap();
        assert_eq!(matrix.size(), (0, 0));
        assert!(rows(&matrix).is_empty());
    }

    #[test]
    fn test_two_by_two_without_trailing_newline() {
        let matrix = load("11\n00").unwrap();
        assert_eq!(matrix.size(), (2, 2));
        assert_eq!(rows(&matrix), vec![vec![1, 1], vec![0, 0]]);
    }

    #[test]
    fn test_three_by_three() {
        let matrix = load("101\n010\n110").unwrap();
        assert_eq!(matrix.size(), (3, 3));
        assert_eq!(
            rows(&matrix),
            vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 0]]
        );
    }

    #[test]
    fn test_single_line() {
        let matrix = load("101").unwrap();
        assert_eq!(matrix.size(), (3, 1));
    }

    #[test]
    fn test_short_rows_are_zero_filled() {
        let matrix = load("101\n00\n1\n").unwrap();
        assert_eq!(matrix.size(), (3, 3));
        assert_eq!(
            rows(&matrix),
            vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 0, 0]]
        );
    }

    #[test]
    fn test_blank_lines_become_zero_rows() {
        let matrix = load("11\n00\n\n\n").unwrap();
        assert_eq!(matrix.size(), (2, 4));
        assert_eq!(
            rows(&matrix),
            vec![vec![1, 1], vec![0, 0], vec![0, 0], vec![0, 0]]
        );
    }

    #[test]
    fn test_leading_blank_line_is_padded() {
        let matrix = load("\n11\n").unwrap();
        assert_eq!(matrix.size(), (2, 2));
        assert_eq!(rows(&matrix), vec![vec![0, 0], vec![1, 1]]);
    }

    #[test]
    fn test_only_newlines_is_empty() {
        let matrix = load("\n\n").unwrap();
        assert_eq!(matrix.size(), (0, 0));
    }

    #[test]
    fn test_row_too_wide() {
        match load("101\n0000\n1\n") {
            Err(FinderError::RowTooWide {
                expected,
                line,
                actual,
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(line, 2);
                assert_eq!(actual, 4);
            }
            other => panic!("expected RowTooWide, got {other:?}"),
        }
    }

    #[test]
    fn test_last_line_is_width_checked() {
        assert!(matches!(
            load("10\n101"),
            Err(FinderError::RowTooWide { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_cell() {
        match load("101\n0x0\n1yz\n") {
            Err(FinderError::InvalidCell { byte }) => assert_eq!(byte, b'x'),
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn test_carriage_return_is_invalid() {
        assert!(matches!(
            load("10\r\n01\r\n"),
            Err(FinderError::InvalidCell { byte: b'\r' })
        ));
    }

    #[test]
    fn test_custom_symbols() {
        let matrix = load_matrix("+ +\n + ".as_bytes(), b'+', b' ').unwrap();
        assert_eq!(rows(&matrix), vec![vec![1, 0, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn test_identical_symbols_rejected() {
        assert!(matches!(
            load_matrix("11".as_bytes(), b'1', b'1'),
            Err(FinderError::InvalidParameter(_))
        ));
    }
}
