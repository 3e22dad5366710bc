//! Fleet manifest: how many ships of each archetype are expected.

use alloc::collections::BTreeMap;
use core::fmt;

use crate::shape::ShapeId;

/// Ordered mapping from [`ShapeId`] to a ship count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    counts: BTreeMap<ShapeId, usize>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Fleet::add`] taking a raw archetype number.
    pub fn with(mut self, id: u8, count: usize) -> Self {
        self.add(ShapeId(id), count);
        self
    }

    /// Add `count` ships of `id`, summing with any existing entry.
    pub fn add(&mut self, id: ShapeId, count: usize) {
        *self.counts.entry(id).or_insert(0) += count;
    }

    /// Count for `id`, zero when absent.
    pub fn count(&self, id: ShapeId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// Number of ships across all archetypes.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, usize)> + '_ {
        self.counts.iter().map(|(&id, &n)| (id, n))
    }

    /// Archetypes that still have a positive count.
    pub fn remaining(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.iter().filter(|&(_, n)| n > 0).map(|(id, _)| id)
    }

    /// Decrement the count of `id`. Returns `false` if it was already zero.
    pub fn decrement(&mut self, id: ShapeId) -> bool {
        match self.counts.get_mut(&id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// `true` when every count is zero.
    pub fn all_zero(&self) -> bool {
        self.counts.values().all(|&n| n == 0)
    }
}

impl FromIterator<(ShapeId, usize)> for Fleet {
    fn from_iter<I: IntoIterator<Item = (ShapeId, usize)>>(iter: I) -> Self {
        let mut fleet = Fleet::new();
        for (id, n) in iter {
            fleet.add(id, n);
        }
        fleet
    }
}

impl core::ops::Index<ShapeId> for Fleet {
    type Output = usize;

    fn index(&self, id: ShapeId) -> &usize {
        self.counts.get(&id).unwrap_or(&0)
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (id, n) in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}={}", id, n)?;
            first = false;
        }
        Ok(())
    }
}
