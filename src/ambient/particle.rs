//! Particle state
//!
//! A particle is a bag of fixed random parameters plus a phase. Pose is
//! derived from progress (see `motion`), so the particle itself only tracks
//! time.

use glam::Vec2;
use rand::Rng;

use super::Viewport;
use super::effects::EffectConfig;
use super::motion::progress;

/// Unique per emitter; a recycled slot always gets a fresh id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Randomized parameters fixed for one lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    /// Spawn position in page pixels (CSS left/top)
    pub origin: Vec2,
    pub duration_ms: f64,
    pub delay_ms: f64,
    /// Lateral sway amplitude (signed)
    pub drift: f32,
    /// Rotation shown while waiting for the delay
    pub rotation_deg: f32,
    pub scale: f32,
}

impl ParticleParams {
    /// Draw a fresh parameter set from the effect's ranges
    pub fn roll<R: Rng + ?Sized>(config: &EffectConfig, rng: &mut R, viewport: Viewport) -> Self {
        let x = crate::lerp_range(rng, 0.0, viewport.width);
        let y = config.motion.vertical.entry_y(rng, viewport);
        Self {
            origin: Vec2::new(x, y),
            duration_ms: f64::from(config.duration_secs.sample(rng)) * 1000.0,
            delay_ms: f64::from(config.delay_secs.sample(rng)) * 1000.0,
            drift: config.drift.sample(rng),
            rotation_deg: config.rotation_deg.sample(rng),
            scale: config.scale.sample(rng),
        }
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Spawned, waiting for the start delay
    Delayed { fires_at: f64 },
    /// Animating since `started_at`
    Animating { started_at: f64 },
    /// Retired; slot awaiting removal or reuse
    Finished,
}

/// One live particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub params: ParticleParams,
    pub phase: Phase,
    /// Highest progress seen this lifetime
    pub progress: f32,
}

impl Particle {
    pub fn new(id: ParticleId, params: ParticleParams, now: f64) -> Self {
        Self {
            id,
            params,
            phase: Phase::Delayed {
                fires_at: now + params.delay_ms,
            },
            progress: 0.0,
        }
    }

    /// Reuse this slot for a new lifetime (in-place reset)
    pub fn recycle(&mut self, id: ParticleId, params: ParticleParams, now: f64) {
        *self = Self::new(id, params, now);
    }

    /// Advance the clock. Returns progress once the delay has fired, `None`
    /// while still waiting or after retirement.
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        let started_at = match self.phase {
            Phase::Delayed { fires_at } if now >= fires_at => {
                self.phase = Phase::Animating { started_at: now };
                now
            }
            Phase::Animating { started_at } => started_at,
            Phase::Delayed { .. } | Phase::Finished => return None,
        };

        let p = progress(now - started_at, self.params.duration_ms);
        self.progress = self.progress.max(p);
        Some(self.progress)
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Finished;
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Pull the origin back inside `width`; returns true if it moved
    pub fn clamp_x(&mut self, width: f32) -> bool {
        if self.params.origin.x > width {
            self.params.origin.x = width;
            true
        } else {
            false
        }
    }
}
