//! Randomized fleet placement with no-touch constraints.

use alloc::vec::Vec;
use log::{debug, warn};
use rand::Rng;

use crate::common::EngineError;
use crate::config::PlacementConfig;
use crate::fleet::Fleet;
use crate::grid::{Grid, Tile};
use crate::shape::{Shape, ShapeCatalog, ShapeId};

/// Cell counts of a placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardStats {
    pub empty: usize,
    pub occupied: usize,
}

/// Places a fleet of polyomino ships onto an owned grid.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    grid: Grid<Tile>,
    fleet: Fleet,
    catalog: ShapeCatalog,
    config: PlacementConfig,
    restarts: usize,
}

impl PlacementEngine {
    /// Engine over an empty `rows × cols` grid using the reference shapes.
    pub fn new(rows: usize, cols: usize, fleet: Fleet) -> Result<Self, EngineError> {
        Self::with_catalog(rows, cols, fleet, ShapeCatalog::reference(), PlacementConfig::default())
    }

    pub fn with_config(
        rows: usize,
        cols: usize,
        fleet: Fleet,
        config: PlacementConfig,
    ) -> Result<Self, EngineError> {
        Self::with_catalog(rows, cols, fleet, ShapeCatalog::reference(), config)
    }

    pub fn with_catalog(
        rows: usize,
        cols: usize,
        fleet: Fleet,
        catalog: ShapeCatalog,
        config: PlacementConfig,
    ) -> Result<Self, EngineError> {
        validate_fleet(&fleet, &catalog)?;
        Ok(Self {
            grid: Grid::new(rows, cols, Tile::Water)?,
            fleet,
            catalog,
            config,
            restarts: 0,
        })
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Consume the engine, keeping the populated grid.
    pub fn into_grid(self) -> Grid<Tile> {
        self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Value at column `x`, row `y`.
    pub fn get_tile(&self, x: usize, y: usize) -> Result<Tile, EngineError> {
        self.grid.get(x, y)
    }

    /// Overwrite every cell with water.
    pub fn reset_grid(&mut self) {
        self.grid.fill(Tile::Water);
    }

    /// Grid wipes caused by failure streaks during the last `place_fleet`.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    pub fn board_stats(&self) -> BoardStats {
        let empty = self.grid.count(Tile::is_water);
        BoardStats {
            empty,
            occupied: self.grid.area() - empty,
        }
    }

    /// Place the whole fleet onto a freshly cleared grid.
    ///
    /// Each ship samples random anchors; at every anchor all orientations are
    /// tried, starting from a random one. After too many dead anchors in a
    /// row the grid is wiped and the fleet is placed again from its first
    /// ship. Running out of the global attempt budget clears the grid and
    /// reports the ship being seated at that moment.
    pub fn place_fleet<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        let plan: Vec<ShapeId> = self
            .fleet
            .iter()
            .flat_map(|(id, n)| core::iter::repeat(id).take(n))
            .collect();

        self.reset_grid();
        self.restarts = 0;
        let mut attempts = 0usize;
        let mut streak = 0usize;
        let mut next = 0usize;

        while next < plan.len() {
            let id = plan[next];
            if attempts >= self.config.attempt_budget {
                self.reset_grid();
                return Err(EngineError::PlacementInfeasible { shape: id });
            }
            attempts += 1;

            let x = rng.random_range(0..self.grid.cols());
            let y = rng.random_range(0..self.grid.rows());
            match self.try_anchor(rng, id, x, y)? {
                Some(orientation) => {
                    self.stamp(x, y, &orientation, id)?;
                    debug!("placed ship {} at ({}, {}) after {} attempts", id, x, y, attempts);
                    streak = 0;
                    next += 1;
                }
                None => {
                    streak += 1;
                    if streak > self.config.failure_streak_limit {
                        warn!(
                            "{} dead anchors in a row while seating ship {}; clearing grid",
                            streak, id
                        );
                        self.reset_grid();
                        self.restarts += 1;
                        streak = 0;
                        next = 0;
                    }
                }
            }
        }
        Ok(())
    }

    /// First orientation of `id` that fits with its bounding box anchored at
    /// `(x, y)`, scanning the whole orientation set from a random start.
    fn try_anchor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        id: ShapeId,
        x: usize,
        y: usize,
    ) -> Result<Option<Shape>, EngineError> {
        let orientations = self.catalog.orientations(id)?;
        let n = orientations.len();
        if n == 0 {
            return Ok(None);
        }
        let start = rng.random_range(0..n);
        Ok((0..n)
            .filter_map(|i| orientations.get((start + i) % n))
            .find(|shape| self.can_place(x, y, shape))
            .cloned())
    }

    /// Every cell in bounds, currently water and with no occupied orthogonal
    /// neighbour.
    pub fn can_place(&self, x: usize, y: usize, shape: &Shape) -> bool {
        shape.cells().iter().all(|&(dx, dy)| {
            let Some(at) = self.grid.offset((x, y), dx as isize, dy as isize) else {
                return false;
            };
            if self.grid.get(at.0, at.1) != Ok(Tile::Water) {
                return false;
            }
            self.grid
                .neighbors(at)
                .all(|(nx, ny)| self.grid.get(nx, ny) == Ok(Tile::Water))
        })
    }

    fn stamp(&mut self, x: usize, y: usize, shape: &Shape, id: ShapeId) -> Result<(), EngineError> {
        for &(dx, dy) in shape.cells() {
            let (cx, cy) = self
                .grid
                .offset((x, y), dx as isize, dy as isize)
                .ok_or(EngineError::OutOfBounds { x, y })?;
            self.grid.set(cx, cy, Tile::Ship(id))?;
        }
        Ok(())
    }
}

/// Every entry must name a known shape and carry a positive count.
pub(crate) fn validate_fleet(fleet: &Fleet, catalog: &ShapeCatalog) -> Result<(), EngineError> {
    for (id, n) in fleet.iter() {
        if !catalog.contains(id) {
            return Err(EngineError::UnknownShape(id));
        }
        if n == 0 {
            return Err(EngineError::EmptyFleetEntry(id));
        }
    }
    Ok(())
}
