//! Common types for the fleet engines: coordinates and the error taxonomy.

use alloc::vec::Vec;

use crate::shape::ShapeId;

/// Board coordinate as `(x, y)`: `x` is the column, `y` is the row.
pub type Coord = (usize, usize);

/// Errors returned by the placement and targeting engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate lies outside `[0, cols) × [0, rows)`.
    OutOfBounds { x: usize, y: usize },
    /// The global attempt budget ran out while seating `shape`.
    PlacementInfeasible { shape: ShapeId },
    /// A sinking was reported for a hit pattern matching no remaining shape.
    UnidentifiableShip { cells: Vec<Coord> },
    /// Fleet manifest names a shape missing from the shape table.
    UnknownShape(ShapeId),
    /// Grid must have at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// Fleet manifest entries must be positive.
    EmptyFleetEntry(ShapeId),
    /// Coordinate was already fired upon.
    AlreadyAttacked { x: usize, y: usize },
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::OutOfBounds { x, y } => {
                write!(f, "Coordinates out of bounds: x={}, y={}", x, y)
            }
            EngineError::PlacementInfeasible { shape } => {
                write!(f, "Unable to place ship {}: attempt budget exhausted", shape)
            }
            EngineError::UnidentifiableShip { cells } => {
                write!(f, "Sunk hit pattern {:?} matches no remaining ship", cells)
            }
            EngineError::UnknownShape(id) => write!(f, "Ship {} is not in the shape table", id),
            EngineError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid grid dimensions {}x{}", rows, cols)
            }
            EngineError::EmptyFleetEntry(id) => {
                write!(f, "Fleet entry for ship {} must have a positive count", id)
            }
            EngineError::AlreadyAttacked { x, y } => {
                write!(f, "Coordinate ({}, {}) was already attacked", x, y)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
