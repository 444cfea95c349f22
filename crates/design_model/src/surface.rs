//! Printable surfaces and per-surface tables
//!
//! The surface set is a closed enumeration of four faces, so per-surface
//! state lives in a fixed array indexed by [`Surface::index`] rather than a map.

use crate::DesignElement;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

/// A printable face of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Surface {
    Front,
    Back,
    Left,
    Right,
}

impl Surface {
    /// Number of surfaces
    pub const COUNT: usize = 4;

    /// All surfaces in table order
    pub const ALL: [Surface; Surface::COUNT] =
        [Surface::Front, Surface::Back, Surface::Left, Surface::Right];

    /// Position of this surface in per-surface tables
    pub fn index(self) -> usize {
        match self {
            Surface::Front => 0,
            Surface::Back => 1,
            Surface::Left => 2,
            Surface::Right => 3,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Surface::Front => "Front",
            Surface::Back => "Back",
            Surface::Left => "Left",
            Surface::Right => "Right",
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::Front
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per surface, stored in a fixed-size array.
///
/// Serializes as a map keyed by surface name so cart snapshots read naturally.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMap<T>([T; Surface::COUNT]);

impl<T> SurfaceMap<T> {
    /// Build a table by calling `f` for each surface
    pub fn from_fn(mut f: impl FnMut(Surface) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Surface::ALL[i])))
    }

    pub fn get(&self, surface: Surface) -> &T {
        &self.0[surface.index()]
    }

    pub fn get_mut(&mut self, surface: Surface) -> &mut T {
        &mut self.0[surface.index()]
    }

    /// Iterate over `(surface, value)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (Surface, &T)> {
        Surface::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Surface, &mut T)> {
        Surface::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T: Default> Default for SurfaceMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Surface> for SurfaceMap<T> {
    type Output = T;

    fn index(&self, surface: Surface) -> &T {
        self.get(surface)
    }
}

impl<T> IndexMut<Surface> for SurfaceMap<T> {
    fn index_mut(&mut self, surface: Surface) -> &mut T {
        self.get_mut(surface)
    }
}

impl<T: Serialize> Serialize for SurfaceMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Surface::COUNT))?;
        for (surface, value) in self.iter() {
            map.serialize_entry(&surface, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for SurfaceMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = BTreeMap::<Surface, T>::deserialize(deserializer)?;
        let mut table = SurfaceMap::default();
        for (surface, value) in entries {
            table[surface] = value;
        }
        Ok(table)
    }
}

/// The full multi-surface design: an ordered element list per surface.
///
/// List order is z-order, rendered bottom-to-top.
pub type SurfaceDocument = SurfaceMap<Vec<DesignElement>>;

/// A small set of surfaces that remembers activation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Surface>", into = "Vec<Surface>")]
pub struct SurfaceSet {
    surfaces: Vec<Surface>,
}

impl SurfaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding exactly one surface
    pub fn single(surface: Surface) -> Self {
        Self {
            surfaces: vec![surface],
        }
    }

    pub fn contains(&self, surface: Surface) -> bool {
        self.surfaces.contains(&surface)
    }

    /// Add a surface; returns false if it was already present
    pub fn insert(&mut self, surface: Surface) -> bool {
        if self.contains(surface) {
            return false;
        }
        self.surfaces.push(surface);
        true
    }

    /// Remove a surface; returns false if it was absent
    pub fn remove(&mut self, surface: Surface) -> bool {
        let before = self.surfaces.len();
        self.surfaces.retain(|s| *s != surface);
        self.surfaces.len() != before
    }

    /// Keep only the surfaces for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(Surface) -> bool) {
        self.surfaces.retain(|s| keep(*s));
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Surfaces in activation order
    pub fn iter(&self) -> impl Iterator<Item = Surface> + '_ {
        self.surfaces.iter().copied()
    }

    /// Check every member is drawn from `allowed`
    pub fn is_subset_of(&self, allowed: &[Surface]) -> bool {
        self.surfaces.iter().all(|s| allowed.contains(s))
    }
}

impl From<Vec<Surface>> for SurfaceSet {
    fn from(surfaces: Vec<Surface>) -> Self {
        let mut set = SurfaceSet::new();
        for surface in surfaces {
            set.insert(surface);
        }
        set
    }
}

impl From<SurfaceSet> for Vec<Surface> {
    fn from(set: SurfaceSet) -> Self {
        set.surfaces
    }
}
