//! Package records and the registry of packages waiting on shelves.

use std::collections::BTreeMap;

use wh_core::{PackageId, Position, SimRng, Tick};

/// A package: where it was created, where it must go, and when it appeared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id:          PackageId,
    /// Shelf cell the package was created on.
    pub origin:      Position,
    /// Drop zone the package must be delivered next to.
    pub destination: Position,
    pub created:     Tick,
}

/// Owner of every package that is sitting on a shelf.
///
/// A picked-up package moves out of the registry and into the carrying
/// robot's list; a delivered one is dropped entirely.  Ordered by ID so
/// observations are reproducible.
#[derive(Clone, Debug, Default)]
pub struct PackageRegistry {
    inner: BTreeMap<PackageId, Package>,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package.  Returns the previous record with the same ID, which
    /// callers treat as a bug.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.inner.insert(package.id, package)
    }

    pub fn remove(&mut self, id: PackageId) -> Option<Package> {
        self.inner.remove(&id)
    }

    pub fn get(&self, id: PackageId) -> Option<&Package> {
        self.inner.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: PackageId) -> bool {
        self.inner.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Packages in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> + '_ {
        self.inner.values()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Draw a random identifier that is neither registered nor rejected by
    /// `taken` (used to exclude packages currently being carried).
    pub fn fresh_id(&self, rng: &mut SimRng, taken: impl Fn(PackageId) -> bool) -> PackageId {
        loop {
            let id = PackageId(rng.random());
            if id.is_valid() && !self.contains(id) && !taken(id) {
                return id;
            }
        }
    }
}
