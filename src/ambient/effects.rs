//! Effect presets
//!
//! One `EffectConfig` per effect; the emitter is the same for all of them.

use serde::{Deserialize, Serialize};

use super::motion::{Extent, Horizontal, MotionProfile, Opacity, Span, Vertical};

/// Effects the page can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Sakura,
    Lanterns,
    Rain,
    Mist,
    Snow,
    Fireflies,
    /// Burst of petals when the gallery scrolls into view
    GalleryPetals,
}

impl EffectKind {
    /// Every effect in page initialization order
    pub const ALL: [EffectKind; 7] = [
        EffectKind::Sakura,
        EffectKind::Lanterns,
        EffectKind::GalleryPetals,
        EffectKind::Rain,
        EffectKind::Mist,
        EffectKind::Snow,
        EffectKind::Fireflies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Sakura => "sakura",
            EffectKind::Lanterns => "lanterns",
            EffectKind::Rain => "rain",
            EffectKind::Mist => "mist",
            EffectKind::Snow => "snow",
            EffectKind::Fireflies => "fireflies",
            EffectKind::GalleryPetals => "gallery_petals",
        }
    }

    /// Preset configuration
    pub fn config(&self) -> EffectConfig {
        match self {
            EffectKind::Sakura => EffectConfig {
                kind: *self,
                container_id: "sakura-container",
                class_name: "sakura-petal",
                count: 30,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(8.0, 18.0),
                delay_secs: Span::new(0.0, 5.0),
                drift: Span::symmetric(100.0),
                rotation_deg: Span::new(0.0, 360.0),
                scale: Span::new(0.5, 1.3),
                motion: MotionProfile {
                    vertical: Vertical::Travel {
                        entry: Extent::px(-50.0),
                        travel: Extent::new(1.0, 100.0),
                    },
                    horizontal: Horizontal::Sway { frequency: 4.0 },
                    spin_degrees: Some(720.0),
                    opacity: Opacity::Constant,
                    scaled: true,
                },
            },
            EffectKind::Lanterns => EffectConfig {
                kind: *self,
                container_id: "lantern-container",
                class_name: "floating-lantern",
                count: 10,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(15.0, 25.0),
                delay_secs: Span::new(0.0, 8.0),
                drift: Span::symmetric(50.0),
                rotation_deg: Span::fixed(0.0),
                scale: Span::fixed(1.0),
                motion: MotionProfile {
                    vertical: Vertical::Travel {
                        entry: Extent::new(1.0, 50.0),
                        travel: Extent::new(-1.0, -100.0),
                    },
                    horizontal: Horizontal::Sway { frequency: 2.0 },
                    spin_degrees: None,
                    opacity: Opacity::Pulse {
                        base: 0.3,
                        amplitude: 0.3,
                        frequency: 8.0,
                    },
                    scaled: false,
                },
            },
            EffectKind::Rain => EffectConfig {
                kind: *self,
                container_id: "rain-container",
                class_name: "rain-drop",
                count: 50,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(0.5, 1.0),
                delay_secs: Span::new(0.0, 2.0),
                drift: Span::fixed(0.0),
                rotation_deg: Span::fixed(0.0),
                scale: Span::fixed(1.0),
                motion: MotionProfile {
                    vertical: Vertical::Travel {
                        entry: Extent::px(-30.0),
                        travel: Extent::new(1.0, 0.0),
                    },
                    horizontal: Horizontal::Still,
                    spin_degrees: None,
                    opacity: Opacity::Constant,
                    scaled: false,
                },
            },
            EffectKind::Mist => EffectConfig {
                kind: *self,
                container_id: "mist-container",
                class_name: "mist-particle",
                count: 8,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(20.0, 35.0),
                delay_secs: Span::new(0.0, 5.0),
                drift: Span::symmetric(100.0),
                rotation_deg: Span::fixed(0.0),
                scale: Span::fixed(1.0),
                motion: MotionProfile {
                    vertical: Vertical::Bob {
                        amplitude: 100.0,
                        frequency: 2.0,
                    },
                    horizontal: Horizontal::Sway { frequency: 2.0 },
                    spin_degrees: None,
                    opacity: Opacity::Pulse {
                        base: 0.0,
                        amplitude: 0.3,
                        frequency: 4.0,
                    },
                    scaled: false,
                },
            },
            EffectKind::Snow => EffectConfig {
                kind: *self,
                container_id: "snow-container",
                class_name: "snow-flake",
                count: 40,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(10.0, 18.0),
                delay_secs: Span::new(0.0, 5.0),
                drift: Span::symmetric(50.0),
                rotation_deg: Span::fixed(0.0),
                scale: Span::fixed(1.0),
                motion: MotionProfile {
                    vertical: Vertical::Travel {
                        entry: Extent::px(-20.0),
                        travel: Extent::new(1.0, 50.0),
                    },
                    horizontal: Horizontal::Sway { frequency: 6.0 },
                    spin_degrees: None,
                    opacity: Opacity::Constant,
                    scaled: false,
                },
            },
            EffectKind::Fireflies => EffectConfig {
                kind: *self,
                container_id: "firefly-container",
                class_name: "firefly",
                count: 20,
                lifetime: Lifetime::Perpetual,
                duration_secs: Span::new(5.0, 10.0),
                delay_secs: Span::new(0.0, 3.0),
                drift: Span::fixed(150.0),
                rotation_deg: Span::fixed(0.0),
                scale: Span::fixed(1.0),
                motion: MotionProfile {
                    vertical: Vertical::Bob {
                        amplitude: 100.0,
                        frequency: 6.0,
                    },
                    horizontal: Horizontal::Sway { frequency: 8.0 },
                    spin_degrees: None,
                    opacity: Opacity::Pulse {
                        base: 0.0,
                        amplitude: 0.8,
                        frequency: 12.0,
                    },
                    scaled: false,
                },
            },
            EffectKind::GalleryPetals => EffectConfig {
                kind: *self,
                container_id: "gallery-petals",
                class_name: "sakura-petal",
                count: 0,
                lifetime: Lifetime::OneShot,
                duration_secs: Span::new(6.0, 14.0),
                delay_secs: Span::new(0.0, 3.0),
                drift: Span::symmetric(75.0),
                rotation_deg: Span::new(0.0, 360.0),
                scale: Span::new(0.6, 1.2),
                motion: MotionProfile {
                    vertical: Vertical::Travel {
                        entry: Extent::new(0.3, 0.0),
                        travel: Extent::new(0.7, 100.0),
                    },
                    horizontal: Horizontal::Sway { frequency: 3.0 },
                    spin_degrees: Some(360.0),
                    opacity: Opacity::Fade { rate: 0.5 },
                    scaled: true,
                },
            },
        }
    }
}

/// What happens when a particle reaches progress 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifetime {
    /// Replaced immediately, population stays constant
    Perpetual,
    /// Removed without replacement (bursts)
    OneShot,
}

/// Per-effect constants, immutable after initialization
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    pub kind: EffectKind,
    /// DOM id of the container element
    pub container_id: &'static str,
    /// CSS class applied to each particle element
    pub class_name: &'static str,
    /// Steady-state population
    pub count: usize,
    pub lifetime: Lifetime,
    pub duration_secs: Span,
    pub delay_secs: Span,
    pub drift: Span,
    /// Initial rotation shown before the animation starts
    pub rotation_deg: Span,
    pub scale: Span,
    pub motion: MotionProfile,
}

impl EffectConfig {
    /// Same effect with its population scaled by `density`
    pub fn with_density(mut self, density: f32) -> Self {
        self.count = scaled_count(self.count, density);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// `count` scaled by `density`, rounded to the nearest particle
pub fn scaled_count(count: usize, density: f32) -> usize {
    (count as f32 * density.max(0.0)).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::{ParticleParams, Viewport};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    #[test]
    fn test_preset_counts() {
        assert_eq!(EffectKind::Sakura.config().count, 30);
        assert_eq!(EffectKind::Lanterns.config().count, 10);
        assert_eq!(EffectKind::Rain.config().count, 50);
        assert_eq!(EffectKind::Mist.config().count, 8);
        assert_eq!(EffectKind::Snow.config().count, 40);
        assert_eq!(EffectKind::Fireflies.config().count, 20);
        assert_eq!(EffectKind::GalleryPetals.config().count, 0);
    }

    #[test]
    fn test_only_gallery_is_one_shot() {
        for kind in EffectKind::ALL {
            let expected = if kind == EffectKind::GalleryPetals {
                Lifetime::OneShot
            } else {
                Lifetime::Perpetual
            };
            assert_eq!(kind.config().lifetime, expected, "{}", kind.as_str());
        }
    }

    #[test]
    fn test_glow_effects_pulse() {
        for kind in [EffectKind::Lanterns, EffectKind::Mist, EffectKind::Fireflies] {
            assert!(matches!(
                kind.config().motion.opacity,
                Opacity::Pulse { .. }
            ));
        }
    }

    #[test]
    fn test_density_scaling() {
        assert_eq!(EffectKind::Sakura.config().with_density(0.6).count, 18);
        assert_eq!(EffectKind::Mist.config().with_density(0.3).count, 2);
        assert_eq!(EffectKind::Rain.config().with_density(-1.0).count, 0);
    }

    /// Closed-form pose per effect: (x, y, rotation, opacity) at progress `p`
    fn expected_pose(kind: EffectKind, p: f32, h: f32) -> (f32, f32, Option<f32>, Option<f32>) {
        let wave = |k: f32| (p * PI * k).sin();
        match kind {
            EffectKind::Sakura => (100.0 * wave(4.0), p * (h + 100.0), Some(720.0 * p), None),
            EffectKind::Lanterns => (
                50.0 * wave(2.0),
                -p * (h + 100.0),
                None,
                Some(0.3 + 0.3 * wave(8.0)),
            ),
            EffectKind::Rain => (0.0, p * h, None, None),
            EffectKind::Mist => (
                100.0 * wave(2.0),
                (p * PI * 2.0).cos() * 100.0,
                None,
                Some((0.3 * wave(4.0)).abs()),
            ),
            EffectKind::Snow => (50.0 * wave(6.0), p * (h + 50.0), None, None),
            EffectKind::Fireflies => (
                150.0 * wave(8.0),
                (p * PI * 6.0).cos() * 100.0,
                None,
                Some((0.8 * wave(12.0)).abs()),
            ),
            EffectKind::GalleryPetals => (
                75.0 * wave(3.0),
                p * (0.7 * h + 100.0),
                Some(360.0 * p),
                Some(1.0 - 0.5 * p),
            ),
        }
    }

    #[test]
    fn test_preset_motion_coefficients() {
        let vp = Viewport::new(1000.0, 800.0);
        for kind in EffectKind::ALL {
            let config = kind.config();
            // Largest drift the preset can roll; fireflies always sway by 150
            let params = ParticleParams {
                origin: Vec2::ZERO,
                duration_ms: 10_000.0,
                delay_ms: 0.0,
                drift: config.drift.max,
                rotation_deg: 0.0,
                scale: 0.9,
            };
            for p in [1.0 / 16.0, 1.0 / 8.0, 0.5, 1.0] {
                let pose = config.motion.pose(&params, p, vp);
                let (x, y, rotation, opacity) = expected_pose(kind, p, vp.height);
                let name = kind.as_str();
                assert!((pose.offset.x - x).abs() < 1e-2, "{name} x at {p}: {} != {x}", pose.offset.x);
                assert!((pose.offset.y - y).abs() < 1e-2, "{name} y at {p}: {} != {y}", pose.offset.y);
                match (pose.rotation_deg, rotation) {
                    (Some(got), Some(want)) => assert!((got - want).abs() < 1e-3, "{name} rotation at {p}"),
                    (got, want) => assert_eq!(got, want, "{name} rotation at {p}"),
                }
                match (pose.opacity, opacity) {
                    (Some(got), Some(want)) => assert!((got - want).abs() < 1e-4, "{name} opacity at {p}"),
                    (got, want) => assert_eq!(got, want, "{name} opacity at {p}"),
                }
            }
        }
    }

    #[test]
    fn test_preset_entry_lines() {
        let vp = Viewport::new(1000.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let entry = |kind: EffectKind, rng: &mut Pcg32| kind.config().motion.vertical.entry_y(rng, vp);
        assert_eq!(entry(EffectKind::Sakura, &mut rng), -50.0);
        assert_eq!(entry(EffectKind::Lanterns, &mut rng), 850.0);
        assert_eq!(entry(EffectKind::Rain, &mut rng), -30.0);
        assert_eq!(entry(EffectKind::Snow, &mut rng), -20.0);
        assert!((entry(EffectKind::GalleryPetals, &mut rng) - 240.0).abs() < 1e-3);
        for kind in [EffectKind::Mist, EffectKind::Fireflies] {
            let y = entry(kind, &mut rng);
            assert!((0.0..=800.0).contains(&y), "{} entry {y}", kind.as_str());
        }
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&EffectKind::GalleryPetals).unwrap();
        assert_eq!(json, "\"gallery_petals\"");
        let kind: EffectKind = serde_json::from_str("\"fireflies\"").unwrap();
        assert_eq!(kind, EffectKind::Fireflies);
    }
}
