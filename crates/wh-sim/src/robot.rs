//! Robot records and the ordered robot registry.

use wh_core::{PackageId, Position, RobotId};

use crate::Package;

/// A robot and the packages it is carrying.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub id:       RobotId,
    pub position: Position,
    pub capacity: usize,
    /// Carried packages in pickup order.  Never longer than `capacity`.
    pub carried:  Vec<Package>,
}

impl Robot {
    pub fn new(id: RobotId, position: Position, capacity: usize) -> Self {
        Self { id, position, capacity, carried: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.carried.len() >= self.capacity
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        !self.carried.is_empty()
    }

    pub fn carries(&self, id: PackageId) -> bool {
        self.carried.iter().any(|p| p.id == id)
    }
}

/// Robots in registry order.  Index order is the tie-break authority when
/// several robots contend for the same cell in one tick.
#[derive(Clone, Debug, Default)]
pub struct RobotRegistry {
    inner: Vec<Robot>,
}

impl RobotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a robot at `position`; its ID is its registry index.
    pub fn spawn(&mut self, position: Position, capacity: usize) -> RobotId {
        let id = RobotId(self.inner.len() as u32);
        self.inner.push(Robot::new(id, position, capacity));
        id
    }

    #[inline]
    pub fn get(&self, id: RobotId) -> Option<&Robot> {
        self.inner.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.inner.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Robot> + '_ {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[Robot] {
        &self.inner
    }

    /// `true` if any robot is carrying package `id`.
    pub fn carries(&self, id: PackageId) -> bool {
        self.inner.iter().any(|r| r.carries(id))
    }

    /// Total packages carried across all robots.
    pub fn carried_count(&self) -> usize {
        self.inner.iter().map(|r| r.carried.len()).sum()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
