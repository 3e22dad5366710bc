//! Ground-truth referee and the driver loop pitting a targeting engine
//! against a placed grid.

use alloc::vec;
use alloc::vec::Vec;
use log::{debug, warn};
use rand::Rng;

use crate::common::{Coord, EngineError};
use crate::grid::{Grid, Tile};
use crate::shape::ShapeId;
use crate::targeting::TargetingEngine;

/// Result of firing at one cell of the opponent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Miss,
    Hit,
    Sunk(ShapeId),
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, ShotOutcome::Sunk(_))
    }
}

#[derive(Debug, Clone)]
struct ShipInstance {
    shape: ShapeId,
    cells: Vec<Coord>,
    hits: usize,
}

impl ShipInstance {
    fn is_sunk(&self) -> bool {
        self.hits == self.cells.len()
    }
}

/// Owns a placed grid and answers shots against it.
///
/// Ships are recovered as 4-connected runs of equal [`ShapeId`]; the no-touch
/// rule guarantees that two ships never merge into one run.
#[derive(Clone)]
pub struct Referee {
    grid: Grid<Tile>,
    ships: Vec<ShipInstance>,
    owner: Grid<Option<usize>>,
    fired: Grid<bool>,
}

impl Referee {
    pub fn new(grid: Grid<Tile>) -> Result<Self, EngineError> {
        let mut owner = Grid::new(grid.rows(), grid.cols(), None)?;
        let fired = Grid::new(grid.rows(), grid.cols(), false)?;
        let mut ships = Vec::new();

        for (start, tile) in grid.iter() {
            let Some(shape) = tile.ship() else { continue };
            if owner.get(start.0, start.1)?.is_some() {
                continue;
            }
            let index = ships.len();
            let mut cells = Vec::new();
            let mut stack = vec![start];
            owner.set(start.0, start.1, Some(index))?;
            while let Some(at) = stack.pop() {
                cells.push(at);
                for (nx, ny) in grid.neighbors(at) {
                    if grid.get(nx, ny)? == Tile::Ship(shape) && owner.get(nx, ny)?.is_none() {
                        owner.set(nx, ny, Some(index))?;
                        stack.push((nx, ny));
                    }
                }
            }
            cells.sort_unstable();
            ships.push(ShipInstance { shape, cells, hits: 0 });
        }
        debug!("referee tracking {} ships", ships.len());
        Ok(Self { grid, ships, owner, fired })
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Fire at `(x, y)`. Each cell may be fired upon once.
    pub fn fire(&mut self, x: usize, y: usize) -> Result<ShotOutcome, EngineError> {
        if self.fired.get(x, y)? {
            return Err(EngineError::AlreadyAttacked { x, y });
        }
        self.fired.set(x, y, true)?;
        let Some(index) = self.owner.get(x, y)? else {
            return Ok(ShotOutcome::Miss);
        };
        let ship = &mut self.ships[index];
        ship.hits += 1;
        if ship.is_sunk() {
            Ok(ShotOutcome::Sunk(ship.shape))
        } else {
            Ok(ShotOutcome::Hit)
        }
    }

    /// Number of ships on the grid.
    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(ShipInstance::is_sunk)
    }

    /// Cells of every ship, in discovery order.
    pub fn ships(&self) -> impl Iterator<Item = (ShapeId, &[Coord])> + '_ {
        self.ships.iter().map(|s| (s.shape, s.cells.as_slice()))
    }
}

/// Summary of one driven game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameReport {
    pub shots: usize,
    pub hits: usize,
    pub sunk: Vec<ShapeId>,
    pub cleared: bool,
}

/// Let `targeting` fire at `referee` until it believes the fleet is gone,
/// runs out of legal shots or has fired `max_shots` times.
pub fn play_game<R: Rng + ?Sized>(
    rng: &mut R,
    referee: &mut Referee,
    targeting: &mut TargetingEngine,
    max_shots: usize,
) -> Result<GameReport, EngineError> {
    let mut report = GameReport {
        shots: 0,
        hits: 0,
        sunk: Vec::new(),
        cleared: false,
    };
    while !targeting.all_sunk() && report.shots < max_shots {
        let Some((x, y)) = targeting.next_attack(rng) else {
            break;
        };
        let outcome = referee.fire(x, y)?;
        report.shots += 1;
        if outcome.is_hit() {
            report.hits += 1;
        }
        let identified = targeting.register_attack(x, y, outcome.is_hit(), outcome.is_sunk())?;
        if let (ShotOutcome::Sunk(actual), Some(id)) = (outcome, identified) {
            if actual != id {
                warn!("sunk ship {} identified as {}", actual, id);
            }
            report.sunk.push(id);
        }
    }
    report.cleared = referee.all_sunk();
    debug!("game over after {} shots, cleared={}", report.shots, report.cleared);
    Ok(report)
}
