//! Per-point ownership tracking.
//!
//! A point is "touched" when at least one live hint targets it.
//! Touch state drives the ordering comparator and the set-building
//! precondition, and is what the selection UI queries to decide which
//! points may serve as new references.

use std::collections::{HashMap, HashSet};

use crate::types::{HintId, PointId};

/// Tracks which hints currently target each point.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    owners: HashMap<PointId, HashSet<HintId>>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `hint` as an owner of each point.
    pub fn touch(&mut self, points: &[PointId], hint: HintId) {
        for point in points {
            self.owners.entry(*point).or_default().insert(hint);
        }
    }

    /// Remove `hint` from each point's owner set. Must be called with
    /// the same point list the matching [`touch`](Self::touch) used.
    pub fn untouch(&mut self, points: &[PointId], hint: HintId) {
        for point in points {
            if let Some(owners) = self.owners.get_mut(point) {
                owners.remove(&hint);
                if owners.is_empty() {
                    self.owners.remove(point);
                }
            }
        }
    }

    pub fn touched(&self, point: PointId) -> bool {
        self.owners.contains_key(&point)
    }

    /// Owners of a point, in id order for determinism.
    pub fn owners(&self, point: PointId) -> Vec<HintId> {
        let mut out: Vec<HintId> = self
            .owners
            .get(&point)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        out.sort();
        out
    }

    pub fn owner_count(&self, point: PointId) -> usize {
        self.owners.get(&point).map_or(0, HashSet::len)
    }

    pub fn clear(&mut self) {
        self.owners.clear();
    }
}
