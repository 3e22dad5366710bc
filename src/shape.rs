//! Ship shapes and their rotation/mirror variants.
//!
//! A [`Shape`] is a set of `(dx, dy)` offsets normalized so that the minimum
//! offset on each axis is zero. Its [`OrientationSet`] holds every distinct
//! image of the shape under the eight symmetries of the square.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, EngineError};
use crate::config::{ShapeDef, SHAPES};

/// Relative cell offset `(dx, dy)`.
pub type Offset = (i32, i32);

/// Identifier of a ship archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeId(pub u8);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ShapeId {
    fn from(id: u8) -> Self {
        ShapeId(id)
    }
}

/// One of the eight symmetries of the square: optional axis swap followed by
/// optional flips of the resulting x and y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub swap: bool,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Transform {
    /// All eight transforms, identity first.
    pub const ALL: [Transform; 8] = [
        Transform::new(false, false, false),
        Transform::new(false, false, true),
        Transform::new(false, true, false),
        Transform::new(false, true, true),
        Transform::new(true, false, false),
        Transform::new(true, false, true),
        Transform::new(true, true, false),
        Transform::new(true, true, true),
    ];

    pub const fn new(swap: bool, flip_x: bool, flip_y: bool) -> Self {
        Transform { swap, flip_x, flip_y }
    }

    #[inline]
    pub fn apply(&self, (dx, dy): Offset) -> Offset {
        let (mut x, mut y) = if self.swap { (dy, dx) } else { (dx, dy) };
        if self.flip_x {
            x = -x;
        }
        if self.flip_y {
            y = -y;
        }
        (x, y)
    }
}

/// Normalized, sorted footprint of a ship.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shape {
    cells: Vec<Offset>,
}

impl Shape {
    /// Build a shape from arbitrary offsets. The offsets are translated so the
    /// bounding box touches both axes at zero, then sorted and deduplicated.
    pub fn new<I>(offsets: I) -> Self
    where
        I: IntoIterator<Item = Offset>,
    {
        let mut cells: Vec<Offset> = offsets.into_iter().collect();
        let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
        for cell in cells.iter_mut() {
            cell.0 -= min_x;
            cell.1 -= min_y;
        }
        cells.sort_unstable();
        cells.dedup();
        Shape { cells }
    }

    /// Build a shape from absolute board coordinates, e.g. a cluster of hits.
    ///
    /// Coordinates past `i32::MAX` cannot come from a [`Grid`](crate::Grid),
    /// whose dimensions are capped at [`MAX_DIMENSION`](crate::MAX_DIMENSION);
    /// they saturate rather than wrap.
    pub fn from_coords(coords: &[Coord]) -> Self {
        let clamp = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        Shape::new(coords.iter().map(|&(x, y)| (clamp(x), clamp(y))))
    }

    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width and height of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        let w = self.cells.iter().map(|&(x, _)| x).max().map_or(0, |m| m as usize + 1);
        let h = self.cells.iter().map(|&(_, y)| y).max().map_or(0, |m| m as usize + 1);
        (w, h)
    }

    /// Apply `t` to every offset and re-normalize.
    pub fn transform(&self, t: Transform) -> Shape {
        Shape::new(self.cells.iter().map(|&o| t.apply(o)))
    }

    /// Distinct variants of this shape under all eight transforms.
    pub fn orientations(&self) -> OrientationSet {
        let variants: BTreeSet<Shape> =
            Transform::ALL.iter().map(|&t| self.transform(t)).collect();
        OrientationSet {
            variants: variants.into_iter().collect(),
        }
    }
}

/// Immutable, deduplicated set of orientations for one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationSet {
    variants: Vec<Shape>,
}

impl OrientationSet {
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.variants.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Shape> {
        self.variants.iter()
    }

    /// Exact match against a normalized pattern.
    pub fn contains(&self, pattern: &Shape) -> bool {
        self.variants.binary_search(pattern).is_ok()
    }
}

impl<'a> IntoIterator for &'a OrientationSet {
    type Item = &'a Shape;
    type IntoIter = core::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    name: &'static str,
    shape: Shape,
    orientations: OrientationSet,
}

/// Lookup table from [`ShapeId`] to its canonical shape and orientations,
/// computed once at construction.
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    entries: BTreeMap<ShapeId, CatalogEntry>,
}

impl ShapeCatalog {
    /// Catalog of the reference shape table.
    pub fn reference() -> Self {
        Self::from_table(&SHAPES)
    }

    /// Build a catalog from a custom shape table.
    pub fn from_table(table: &[ShapeDef]) -> Self {
        let entries = table
            .iter()
            .map(|def| {
                let shape = Shape::new(def.offsets().iter().copied());
                let orientations = shape.orientations();
                (
                    ShapeId(def.id()),
                    CatalogEntry {
                        name: def.name(),
                        shape,
                        orientations,
                    },
                )
            })
            .collect();
        ShapeCatalog { entries }
    }

    fn entry(&self, id: ShapeId) -> Result<&CatalogEntry, EngineError> {
        self.entries.get(&id).ok_or(EngineError::UnknownShape(id))
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Shape, EngineError> {
        self.entry(id).map(|e| &e.shape)
    }

    pub fn orientations(&self, id: ShapeId) -> Result<&OrientationSet, EngineError> {
        self.entry(id).map(|e| &e.orientations)
    }

    pub fn name(&self, id: ShapeId) -> Result<&'static str, EngineError> {
        self.entry(id).map(|e| e.name)
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::reference()
    }
}
