//! Hunt/target strategy against an unknown grid.
//!
//! While no lead is pending the engine fires at uniformly random unexplored
//! cells. A hit that does not sink queues follow-up cells around it; once
//! two or more hits line up, only the cells extending that line are queued.
//! On a sinking the hit cluster is matched against the orientation sets of
//! the ships still afloat, and the wreck's perimeter is ruled out.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use log::{debug, trace};
use rand::Rng;

use crate::common::{Coord, EngineError};
use crate::config::TargetingConfig;
use crate::fleet::Fleet;
use crate::grid::{Grid, Knowledge};
use crate::placement::validate_fleet;
use crate::shape::{Shape, ShapeCatalog, ShapeId};

/// Current phase of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// No pending leads; shots are random.
    Hunting,
    /// Following up queued cells around an unsunk hit.
    Targeting,
}

#[derive(Debug, Clone)]
pub struct TargetingEngine {
    knowledge: Grid<Knowledge>,
    fleet: Fleet,
    catalog: ShapeCatalog,
    config: TargetingConfig,
    shots: BTreeSet<Coord>,
    available: BTreeSet<Coord>,
    hit_queue: VecDeque<Coord>,
    cluster: Vec<Coord>,
}

impl TargetingEngine {
    /// Engine for an opponent `rows × cols` grid holding `fleet`.
    pub fn new(rows: usize, cols: usize, fleet: Fleet) -> Result<Self, EngineError> {
        Self::with_catalog(rows, cols, fleet, ShapeCatalog::reference(), TargetingConfig::default())
    }

    pub fn with_config(
        rows: usize,
        cols: usize,
        fleet: Fleet,
        config: TargetingConfig,
    ) -> Result<Self, EngineError> {
        Self::with_catalog(rows, cols, fleet, ShapeCatalog::reference(), config)
    }

    pub fn with_catalog(
        rows: usize,
        cols: usize,
        fleet: Fleet,
        catalog: ShapeCatalog,
        config: TargetingConfig,
    ) -> Result<Self, EngineError> {
        validate_fleet(&fleet, &catalog)?;
        let knowledge = Grid::new(rows, cols, Knowledge::Unknown)?;
        let available = knowledge.iter().map(|(at, _)| at).collect();
        Ok(Self {
            knowledge,
            fleet,
            catalog,
            config,
            shots: BTreeSet::new(),
            available,
            hit_queue: VecDeque::new(),
            cluster: Vec::new(),
        })
    }

    pub fn mode(&self) -> TargetMode {
        if self.hit_queue.is_empty() {
            TargetMode::Hunting
        } else {
            TargetMode::Targeting
        }
    }

    /// Next coordinate to fire at, or `None` when no legal shot remains.
    pub fn next_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        if self.hit_queue.is_empty() && !self.cluster.is_empty() && self.config.widen_on_stall {
            let widened = self.perimeter_candidates();
            trace!("line heuristic stalled; widening to {:?}", widened);
            self.enqueue(widened);
        }
        while let Some(at) = self.hit_queue.pop_front() {
            if self.available.contains(&at) {
                return Some(at);
            }
        }
        if self.available.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.available.len());
        self.available.iter().nth(idx).copied()
    }

    /// Record the outcome of a shot at `(x, y)`.
    ///
    /// Returns the archetype identified when `is_sunk` is set. A sinking
    /// implies a hit regardless of `is_hit`.
    pub fn register_attack(
        &mut self,
        x: usize,
        y: usize,
        is_hit: bool,
        is_sunk: bool,
    ) -> Result<Option<ShapeId>, EngineError> {
        if !self.knowledge.contains(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        if !self.shots.insert((x, y)) {
            return Err(EngineError::AlreadyAttacked { x, y });
        }
        self.available.remove(&(x, y));
        self.hit_queue.retain(|&at| at != (x, y));

        if !(is_hit || is_sunk) {
            self.knowledge.set(x, y, Knowledge::Miss)?;
            return Ok(None);
        }
        self.knowledge.set(x, y, Knowledge::Hit)?;
        self.cluster.push((x, y));

        if !is_sunk {
            let candidates = self.target_cells();
            trace!("hit at ({}, {}); follow-ups {:?}", x, y, candidates);
            self.enqueue(candidates);
            return Ok(None);
        }

        let id = self.identify_sunk()?;
        self.fleet.decrement(id);
        debug!("sunk ship {} with cells {:?}", id, self.cluster);

        let wreck = core::mem::take(&mut self.cluster);
        for &(cx, cy) in wreck.iter() {
            self.knowledge.set(cx, cy, Knowledge::Sunk)?;
        }
        for &at in wreck.iter() {
            let around: Vec<Coord> = self.knowledge.neighbors(at).collect();
            for (nx, ny) in around {
                if self.available.remove(&(nx, ny)) {
                    self.knowledge.set(nx, ny, Knowledge::Miss)?;
                }
            }
        }
        self.hit_queue.clear();
        Ok(Some(id))
    }

    /// Follow-up candidates for the current hit cluster.
    ///
    /// A single hit yields its available orthogonal neighbours. A cluster on
    /// one column or one row yields the available cells just beyond either
    /// end of that line. Any other cluster yields nothing unless
    /// `widen_on_stall` is set, in which case the available neighbours of
    /// every cluster cell are returned.
    pub fn target_cells(&self) -> Vec<Coord> {
        match self.cluster.as_slice() {
            [] => Vec::new(),
            [single] => self
                .knowledge
                .neighbors(*single)
                .filter(|at| self.available.contains(at))
                .collect(),
            [(x0, y0), rest @ ..] => {
                let line = if rest.iter().all(|(x, _)| x == x0) {
                    let (lo, hi) = span(self.cluster.iter().map(|&(_, y)| y));
                    [self.at(*x0 as isize, lo as isize - 1), self.at(*x0 as isize, hi as isize + 1)]
                } else if rest.iter().all(|(_, y)| y == y0) {
                    let (lo, hi) = span(self.cluster.iter().map(|&(x, _)| x));
                    [self.at(lo as isize - 1, *y0 as isize), self.at(hi as isize + 1, *y0 as isize)]
                } else if self.config.widen_on_stall {
                    return self.perimeter_candidates();
                } else {
                    return Vec::new();
                };
                line.into_iter()
                    .flatten()
                    .filter(|at| self.available.contains(at))
                    .collect()
            }
        }
    }

    fn at(&self, x: isize, y: isize) -> Option<Coord> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.knowledge.contains(x, y).then_some((x, y))
    }

    /// Available neighbours of every cell in the cluster, deduplicated.
    fn perimeter_candidates(&self) -> Vec<Coord> {
        let mut out: Vec<Coord> = Vec::new();
        for &at in self.cluster.iter() {
            for n in self.knowledge.neighbors(at) {
                if self.available.contains(&n) && !out.contains(&n) {
                    out.push(n);
                }
            }
        }
        out
    }

    fn enqueue(&mut self, candidates: Vec<Coord>) {
        for at in candidates {
            if self.available.contains(&at) && !self.hit_queue.contains(&at) {
                self.hit_queue.push_back(at);
            }
        }
    }

    /// Match the current cluster against every archetype still afloat.
    fn identify_sunk(&self) -> Result<ShapeId, EngineError> {
        let pattern = Shape::from_coords(&self.cluster);
        for id in self.fleet.remaining() {
            if self.catalog.orientations(id)?.contains(&pattern) {
                return Ok(id);
            }
        }
        Err(EngineError::UnidentifiableShip {
            cells: self.cluster.clone(),
        })
    }

    pub fn knowledge_grid(&self) -> &Grid<Knowledge> {
        &self.knowledge
    }

    /// Ships believed to be still afloat.
    pub fn remaining_fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn all_sunk(&self) -> bool {
        self.fleet.all_zero()
    }

    pub fn shots(&self) -> &BTreeSet<Coord> {
        &self.shots
    }

    pub fn is_available(&self, x: usize, y: usize) -> bool {
        self.available.contains(&(x, y))
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn hit_queue(&self) -> impl Iterator<Item = Coord> + '_ {
        self.hit_queue.iter().copied()
    }

    pub fn current_cluster(&self) -> &[Coord] {
        &self.cluster
    }
}

fn span<I: Iterator<Item = usize>>(values: I) -> (usize, usize) {
    values.fold((usize::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
