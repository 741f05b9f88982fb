//! Yozakura FX - ambient particle effects for a themed web page
//!
//! Core modules:
//! - `ambient`: Deterministic particle emitters (sakura, lanterns, rain, mist, snow, fireflies)
//! - `reveal`: Scroll-triggered card and haiku reveal scheduling
//! - `parallax`: Hero layer scroll offsets
//! - `platform`: DOM binding (wasm) and headless sink (native/tests)
//! - `settings`: Page-provided configuration

pub mod ambient;
pub mod parallax;
pub mod platform;
pub mod reveal;
pub mod settings;

pub use ambient::{AmbientScene, EffectConfig, EffectKind, Emitter, ParticleSink, Viewport};
pub use settings::{QualityPreset, Settings};

/// Page-wide constants
pub mod consts {
    /// Fallback viewport when the host cannot report one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// Petals burst into the gallery each time it scrolls into view, before density scaling
    pub const GALLERY_BURST_COUNT: usize = 15;

    /// Hero parallax speed per layer index
    pub const PARALLAX_LAYER_SPEED: f32 = 0.3;

    /// Class toggled on revealed elements
    pub const VISIBLE_CLASS: &str = "visible";

    /// Seed used by the native headless run
    pub const NATIVE_SEED: u64 = 0x5A_C0_2A;
}

/// Uniform sample from `[min, max)`; collapses to `min` for empty ranges
#[inline]
pub fn lerp_range<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + (max - min) * rng.random::<f32>()
}
