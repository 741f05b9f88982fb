//! Parametric motion curves
//!
//! A particle's pose is re-evaluated from its progress every frame. Nothing
//! is integrated, so the same (progress, params, viewport) always produces
//! the same pose.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Viewport;
use super::particle::ParticleParams;

/// Closed sampling range for a randomized parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range that always yields `value`
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// `[-half, half]`, used for drift
    pub const fn symmetric(half: f32) -> Self {
        Self::new(-half, half)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        crate::lerp_range(rng, self.min, self.max)
    }
}

/// Length expressed against the viewport height: `height * factor + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub factor: f32,
    pub offset: f32,
}

impl Extent {
    pub const fn new(factor: f32, offset: f32) -> Self {
        Self { factor, offset }
    }

    /// Pixel offset independent of the viewport
    pub const fn px(offset: f32) -> Self {
        Self::new(0.0, offset)
    }

    #[inline]
    pub fn resolve(&self, height: f32) -> f32 {
        height * self.factor + self.offset
    }
}

/// Vertical path of a particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Vertical {
    /// Enter at a fixed line (usually off-screen) and move linearly by `travel`
    Travel { entry: Extent, travel: Extent },
    /// Enter anywhere in the viewport and bob around the entry point
    Bob { amplitude: f32, frequency: f32 },
}

impl Vertical {
    /// Entry y for a freshly spawned particle
    pub fn entry_y<R: Rng + ?Sized>(&self, rng: &mut R, viewport: Viewport) -> f32 {
        match self {
            Vertical::Travel { entry, .. } => entry.resolve(viewport.height),
            Vertical::Bob { .. } => crate::lerp_range(rng, 0.0, viewport.height),
        }
    }

    /// Offset from the entry line. Travel uses the live viewport height.
    #[inline]
    pub fn offset(&self, progress: f32, height: f32) -> f32 {
        match *self {
            Vertical::Travel { travel, .. } => progress * travel.resolve(height),
            Vertical::Bob {
                amplitude,
                frequency,
            } => (progress * PI * frequency).cos() * amplitude,
        }
    }
}

/// Lateral sway
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Horizontal {
    /// Falls straight (rain)
    Still,
    /// `drift * sin(progress * π * frequency)`
    Sway { frequency: f32 },
}

impl Horizontal {
    #[inline]
    pub fn offset(&self, progress: f32, drift: f32) -> f32 {
        match *self {
            Horizontal::Still => 0.0,
            Horizontal::Sway { frequency } => (progress * PI * frequency).sin() * drift,
        }
    }
}

/// Opacity channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Opacity {
    /// Left to the stylesheet
    Constant,
    /// `1 - progress * rate`
    Fade { rate: f32 },
    /// `|base + amplitude * sin(progress * π * frequency)|` (flicker, not a fade)
    Pulse {
        base: f32,
        amplitude: f32,
        frequency: f32,
    },
}

impl Opacity {
    #[inline]
    pub fn at(&self, progress: f32) -> Option<f32> {
        match *self {
            Opacity::Constant => None,
            Opacity::Fade { rate } => Some(1.0 - progress * rate),
            Opacity::Pulse {
                base,
                amplitude,
                frequency,
            } => Some((base + amplitude * (progress * PI * frequency).sin()).abs()),
        }
    }
}

/// Motion-curve coefficients and enabled visual channels for one effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
    /// Total rotation over one lifetime; `None` leaves rotation alone
    pub spin_degrees: Option<f32>,
    pub opacity: Opacity,
    /// Carry the particle's scale factor into the animated transform
    pub scaled: bool,
}

impl MotionProfile {
    /// Pose at `progress` (expected in [0, 1]) for the given particle
    pub fn pose(&self, params: &ParticleParams, progress: f32, viewport: Viewport) -> Pose {
        let offset = Vec2::new(
            self.horizontal.offset(progress, params.drift),
            self.vertical.offset(progress, viewport.height),
        );
        Pose {
            offset,
            rotation_deg: self.spin_degrees.map(|total| progress * total),
            scale: self.scaled.then_some(params.scale),
            opacity: self.opacity.at(progress),
        }
    }
}

/// Frame output for one particle, relative to its origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: Vec2,
    pub rotation_deg: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
}

impl Pose {
    /// CSS `transform` value
    pub fn transform_css(&self) -> String {
        let mut css = format!("translate({:.2}px, {:.2}px)", self.offset.x, self.offset.y);
        if let Some(rotation) = self.rotation_deg {
            css.push_str(&format!(" rotate({:.2}deg)", rotation));
        }
        if let Some(scale) = self.scale {
            css.push_str(&format!(" scale({:.3})", scale));
        }
        css
    }
}

/// Normalized progress, clamped to [0, 1]; exactly 1 once `elapsed >= duration`
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}
