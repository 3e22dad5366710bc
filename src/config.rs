use crate::fleet::Fleet;
use crate::shape::{Offset, ShapeId};

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;

/// Anchor trials allowed across a whole `place_fleet` call before it gives up.
pub const PLACEMENT_ATTEMPT_BUDGET: usize = 69_000;

/// Consecutive dead anchors tolerated before the grid is wiped and the fleet
/// is placed again from scratch.
pub const FAILURE_STREAK_LIMIT: usize = 1_000;

/// Static description of a ship archetype: id, name and footprint offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    id: u8,
    name: &'static str,
    offsets: &'static [Offset],
}

impl ShapeDef {
    pub const fn new(id: u8, name: &'static str, offsets: &'static [Offset]) -> Self {
        Self { id, name, offsets }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn offsets(&self) -> &'static [Offset] {
        self.offsets
    }
}

pub const NUM_SHAPES: usize = 7;

// (dx, dy) offsets; the line ships are listed vertically.
pub const SHAPES: [ShapeDef; NUM_SHAPES] = [
    ShapeDef::new(1, "Destroyer", &[(0, 0), (0, 1)]),
    ShapeDef::new(2, "Cruiser", &[(0, 0), (0, 1), (0, 2)]),
    ShapeDef::new(3, "Battleship", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    ShapeDef::new(4, "Tee", &[(0, 0), (0, 1), (0, 2), (1, 1)]),
    ShapeDef::new(5, "Ell", &[(0, 0), (1, 0), (2, 0), (2, 1)]),
    ShapeDef::new(6, "Skew", &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    ShapeDef::new(7, "Carrier", &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 1), (1, 2)]),
];

/// One ship of every reference archetype.
pub fn reference_fleet() -> Fleet {
    SHAPES.iter().map(|def| (ShapeId(def.id()), 1)).collect()
}

/// Fleet made only of the straight ships, for which the line-following
/// heuristic is exact.
pub fn line_fleet() -> Fleet {
    [(ShapeId(1), 2), (ShapeId(2), 2), (ShapeId(3), 1)]
        .into_iter()
        .collect()
}

/// Tunables for the randomized placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementConfig {
    pub attempt_budget: usize,
    pub failure_streak_limit: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            attempt_budget: PLACEMENT_ATTEMPT_BUDGET,
            failure_streak_limit: FAILURE_STREAK_LIMIT,
        }
    }
}

/// Tunables for the hunt/target strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetingConfig {
    /// Follow up through the neighbours of every cluster cell once the line
    /// heuristic has nothing left to offer. Needed for bent shapes.
    pub widen_on_stall: bool,
}
