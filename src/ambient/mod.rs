//! Ambient particle effects
//!
//! Every effect on the page is the same lifecycle: spawn, wait out a random
//! delay, animate from progress 0 to 1, retire, respawn. This module must be
//! pure and deterministic:
//! - Host supplies the clock (ms) and viewport
//! - Seeded RNG only, one stream per effect
//! - No DOM dependencies (see `platform` for the bindings)

pub mod effects;
pub mod emitter;
pub mod motion;
pub mod particle;
pub mod scene;

pub use effects::{EffectConfig, EffectKind, Lifetime};
pub use emitter::{Emitter, ParticleSink, SpawnStyle};
pub use motion::{Extent, Horizontal, MotionProfile, Opacity, Pose, Span, Vertical, progress};
pub use particle::{Particle, ParticleId, ParticleParams, Phase};
pub use scene::AmbientScene;

/// Current viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}
