// Colored terminal output for matrices and matches.
//
// Each cell is drawn as one space with a colored background, so a matrix
// shows up as a block picture in the terminal. Cells inside a match area
// get brighter colors.

use colored::{ColoredString, Colorize};

use crate::finder::Finder;
use crate::matrix::Matrix;
use crate::search::Match;

/// One cell of a matrix, painted for the terminal.
fn paint_cell(cell: u8, in_match: bool) -> ColoredString {
    match (cell, in_match) {
        (1, false) => " ".on_blue(),
        (_, false) => " ".on_black(),
        (1, true) => " ".on_bright_white().bold(),
        (_, true) => " ".on_magenta().bold(),
    }
}

/// Render a matrix with colored cells, no highlighting.
pub fn paint_matrix(matrix: &Matrix) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        for &cell in row {
            out.push_str(&paint_cell(cell, false).to_string());
        }
        out.push('\n');
    }
    out
}

/// Render the finder's source matrix with every match area highlighted.
///
/// Returns an empty string when no source is loaded.
pub fn highlight(finder: &Finder) -> String {
    let Some(source) = finder.source() else {
        return String::new();
    };

    let mut out = String::new();
    for (y, row) in source.rows().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let painted = paint_cell(cell, finder.is_in_match_area(x, y));
            out.push_str(&painted.to_string());
        }
        out.push('\n');
    }
    out
}

/// Display a matrix with a size header.
pub fn display_matrix(name: &str, matrix: &Matrix) {
    let (width, height) = matrix.size();
    println!(
        "\n{}",
        format!("=== {name} ({width}x{height}) ===").bold()
    );
    if matrix.is_empty() {
        println!("  {}", "(empty)".dimmed());
        return;
    }
    print!("{}", paint_matrix(matrix));
}

/// Display a numbered table of matches.
pub fn display_matches(matches: &[Match]) {
    if matches.is_empty() {
        println!("No matches found. Try a lower percentage with -p.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Matches ({}) ===", matches.len()).bold()
    );
    println!(
        "  {:>4}  {:>6}  {:>6}  {:>10}",
        "#".dimmed(),
        "X".dimmed(),
        "Y".dimmed(),
        "Match %".dimmed(),
    );
    println!("  {}", "-".repeat(34).dimmed());

    for (i, m) in matches.iter().enumerate() {
        println!(
            "  {:>4}. {:>6}  {:>6}  {}",
            i,
            m.x,
            m.y,
            colorize_percentage(m.percentage),
        );
    }

    let exact = matches.iter().filter(|m| m.percentage >= 100.0).count();
    if exact > 0 {
        println!("\n  {} {} exact matches", "==".green().bold(), exact);
    }
}

/// Colorize a match percentage by strength.
fn colorize_percentage(percentage: f64) -> ColoredString {
    let text = format!("{percentage:>9.2}%");
    match percentage {
        p if p >= 100.0 => text.green().bold(),
        p if p >= 90.0 => text.green(),
        p if p >= 75.0 => text.yellow(),
        _ => text.dimmed(),
    }
}
