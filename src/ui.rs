#![cfg(feature = "std")]

use std::fmt::Write;
use std::string::String;

use crate::grid::{Glyph, Grid, Knowledge, Tile};
use crate::placement::BoardStats;

/// Render a grid with column numbers across the top and row numbers down
/// the side. Indices wrap at ten to keep columns one character wide.
fn render<T: Copy + Glyph>(grid: &Grid<T>) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for x in 0..grid.cols() {
        let _ = write!(out, " {}", x % 10);
    }
    out.push('\n');
    for y in 0..grid.rows() {
        let _ = write!(out, "{:2} ", y);
        for cell in grid.row(y).unwrap_or(&[]) {
            let _ = write!(out, " {}", cell.glyph());
        }
        out.push('\n');
    }
    out
}

/// Placement grid: `.` for water, the ship id otherwise.
pub fn render_grid(grid: &Grid<Tile>) -> String {
    render(grid)
}

/// Knowledge grid: `?` unknown, `o` miss, `X` hit, `#` sunk.
pub fn render_knowledge(grid: &Grid<Knowledge>) -> String {
    render(grid)
}

pub fn print_board(grid: &Grid<Tile>, stats: BoardStats) {
    std::println!("{}", render_grid(grid));
    std::println!("empty: {}  occupied: {}", stats.empty, stats.occupied);
}

pub fn print_knowledge(grid: &Grid<Knowledge>) {
    std::println!("{}", render_knowledge(grid));
}
