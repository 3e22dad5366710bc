//! Commonly used types and utilities for ease of import.

pub use crate::{
    play_game, Coord, EngineError, Fleet, Grid, Knowledge, PlacementEngine, Referee, ShapeCatalog,
    ShapeId, ShotOutcome, TargetMode, TargetingEngine, Tile,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, print_board, print_knowledge};
