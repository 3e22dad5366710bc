//! Rectangular `rows × cols` grid addressed by `(x, y)`.
//!
//! `x` is the column index and `y` the row index everywhere in this crate.
//! Cells are stored row-major in a single `Vec`.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, EngineError};
use crate::shape::ShapeId;

/// Largest row or column count; keeps every coordinate representable as an
/// `i32` shape offset.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Orthogonal neighbour offsets: left, right, up, down.
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cell of a placement grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Water,
    Ship(ShapeId),
}

impl Tile {
    pub fn is_water(&self) -> bool {
        matches!(self, Tile::Water)
    }

    pub fn ship(&self) -> Option<ShapeId> {
        match *self {
            Tile::Ship(id) => Some(id),
            Tile::Water => None,
        }
    }
}

/// Cell of a targeting knowledge grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Knowledge {
    #[default]
    Unknown,
    Miss,
    Hit,
    Sunk,
}

/// Single-character rendering of a cell.
pub trait Glyph {
    fn glyph(&self) -> char;
}

impl Glyph for Tile {
    fn glyph(&self) -> char {
        match self {
            Tile::Water => '.',
            Tile::Ship(id) => char::from_digit(u32::from(id.0) % 36, 36).unwrap_or('#'),
        }
    }
}

impl Glyph for Knowledge {
    fn glyph(&self) -> char {
        match self {
            Knowledge::Unknown => '?',
            Knowledge::Miss => 'o',
            Knowledge::Hit => 'X',
            Knowledge::Sunk => '#',
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// Both dimensions must lie in `1..=MAX_DIMENSION` and their product must
    /// fit in `usize`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self, EngineError> {
        let invalid = EngineError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(invalid);
        }
        let area = rows.checked_mul(cols).ok_or(invalid)?;
        Ok(Grid {
            rows,
            cols,
            cells: vec![fill; area],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) -> Result<usize, EngineError> {
        if self.contains(x, y) {
            Ok(y * self.cols + x)
        } else {
            Err(EngineError::OutOfBounds { x, y })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<T, EngineError> {
        let idx = self.check_bounds(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), EngineError> {
        let idx = self.check_bounds(x, y)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    /// `(x, y)` shifted by `(dx, dy)`, or `None` if that leaves the grid.
    #[inline]
    pub fn offset(&self, (x, y): Coord, dx: isize, dy: isize) -> Option<Coord> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// In-bounds orthogonal neighbours of `(x, y)`.
    pub fn neighbors(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(at, dx, dy))
    }

    /// Iterator over `((x, y), value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % cols, i / cols), v))
    }

    /// Number of cells matching `pred`.
    pub fn count<F: Fn(&T) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.rows).then(|| &self.cells[y * self.cols..(y + 1) * self.cols])
    }
}

impl<T: Copy + Glyph> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.cols).enumerate() {
            for cell in row {
                write!(f, "{} ", cell.glyph())?;
            }
            if y + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T: Copy + Glyph> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}x{}>:", self.rows, self.cols)?;
        write!(f, "{}", self)
    }
}
