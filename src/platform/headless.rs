//! In-memory particle sink
//!
//! Keeps lifecycle accounting instead of visuals: which ids are live, which
//! were retired, how many frames each received.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::ambient::{ParticleId, ParticleSink, Pose, SpawnStyle};

#[derive(Debug, Default)]
pub struct HeadlessSink {
    live: HashSet<ParticleId>,
    retired: Vec<ParticleId>,
    updates: HashMap<ParticleId, usize>,
    repositions: usize,
}

impl HeadlessSink {
    /// Particles spawned and not yet retired
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Retired ids in retirement order
    pub fn retired_ids(&self) -> &[ParticleId] {
        &self.retired
    }

    pub fn updates_for(&self, id: ParticleId) -> usize {
        self.updates.get(&id).copied().unwrap_or(0)
    }

    pub fn repositions(&self) -> usize {
        self.repositions
    }
}

impl ParticleSink for HeadlessSink {
    fn spawn(&mut self, id: ParticleId, _style: &SpawnStyle) {
        let fresh = self.live.insert(id);
        debug_assert!(fresh, "particle {id:?} spawned twice");
    }

    fn update(&mut self, id: ParticleId, _pose: &Pose) {
        debug_assert!(self.live.contains(&id), "update for dead particle {id:?}");
        *self.updates.entry(id).or_insert(0) += 1;
    }

    fn retire(&mut self, id: ParticleId) {
        let was_live = self.live.remove(&id);
        debug_assert!(was_live, "particle {id:?} retired twice");
        self.retired.push(id);
    }

    fn reposition(&mut self, id: ParticleId, _origin: Vec2) {
        debug_assert!(self.live.contains(&id));
        self.repositions += 1;
    }
}
