//! All emitters on a page
//!
//! Each layer pairs an emitter with the sink for its container. Layers never
//! touch each other; the scene only fans out ticks, resizes and bursts.

use rand_pcg::Pcg32;

use super::Viewport;
use super::effects::{EffectConfig, EffectKind};
use super::emitter::{Emitter, ParticleSink};

/// PCG increment base; each effect gets its own stream
const STREAM_BASE: u64 = 0xda3e_39cb_94b9_5bdb;

/// Emitter bound to its container sink
#[derive(Debug)]
pub struct EffectLayer<S> {
    pub emitter: Emitter,
    pub sink: S,
}

/// Every live effect on the page
#[derive(Debug)]
pub struct AmbientScene<S> {
    seed: u64,
    layers: Vec<EffectLayer<S>>,
}

impl<S: ParticleSink> AmbientScene<S> {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            layers: Vec::new(),
        }
    }

    /// Add an effect and spawn its initial population
    pub fn add(&mut self, config: EffectConfig, mut sink: S, now: f64, viewport: Viewport) {
        let stream = STREAM_BASE.wrapping_add(self.layers.len() as u64);
        let rng = Pcg32::new(self.seed ^ (config.kind as u64).wrapping_mul(0x9e37_79b9), stream);
        let mut emitter = Emitter::new(config, rng);
        emitter.initialize(now, viewport, &mut sink);
        log::info!(
            "{}: {} particles",
            emitter.kind().as_str(),
            emitter.population()
        );
        self.layers.push(EffectLayer { emitter, sink });
    }

    /// One display frame
    pub fn tick(&mut self, now: f64, viewport: Viewport) {
        for layer in self.layers.iter_mut() {
            layer.emitter.tick(now, viewport, &mut layer.sink);
        }
    }

    /// Viewport resized: clamp every particle horizontally
    pub fn resize(&mut self, viewport: Viewport) {
        for layer in self.layers.iter_mut() {
            layer.emitter.clamp_to_width(viewport.width, &mut layer.sink);
        }
    }

    /// Spawn extra particles into an effect; no-op if the effect is absent
    pub fn burst(&mut self, kind: EffectKind, count: usize, now: f64, viewport: Viewport) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.emitter.burst(count, now, viewport, &mut layer.sink);
        }
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.layer(kind).is_some()
    }

    /// Live particles for `kind` (0 if the effect is absent)
    pub fn population(&self, kind: EffectKind) -> usize {
        self.layer(kind).map_or(0, |l| l.emitter.population())
    }

    /// Live particles across every effect
    pub fn total_population(&self) -> usize {
        self.layers.iter().map(|l| l.emitter.population()).sum()
    }

    pub fn layer(&self, kind: EffectKind) -> Option<&EffectLayer<S>> {
        self.layers.iter().find(|l| l.emitter.kind() == kind)
    }

    pub fn layer_mut(&mut self, kind: EffectKind) -> Option<&mut EffectLayer<S>> {
        self.layers.iter_mut().find(|l| l.emitter.kind() == kind)
    }

    pub fn layers(&self) -> &[EffectLayer<S>] {
        &self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessSink;

    fn full_scene(seed: u64, viewport: Viewport) -> AmbientScene<HeadlessSink> {
        let mut scene = AmbientScene::new(seed);
        for kind in EffectKind::ALL {
            scene.add(kind.config(), HeadlessSink::default(), 0.0, viewport);
        }
        scene
    }

    #[test]
    fn test_scene_initial_populations() {
        let scene = full_scene(1, Viewport::new(1280.0, 720.0));
        assert_eq!(scene.population(EffectKind::Sakura), 30);
        assert_eq!(scene.population(EffectKind::Lanterns), 10);
        assert_eq!(scene.population(EffectKind::Rain), 50);
        assert_eq!(scene.population(EffectKind::Mist), 8);
        assert_eq!(scene.population(EffectKind::Snow), 40);
        assert_eq!(scene.population(EffectKind::Fireflies), 20);
        assert_eq!(scene.population(EffectKind::GalleryPetals), 0);
        assert_eq!(scene.total_population(), 158);
    }

    #[test]
    fn test_missing_effect_is_noop() {
        let vp = Viewport::new(800.0, 600.0);
        let mut scene: AmbientScene<HeadlessSink> = AmbientScene::new(2);
        scene.add(EffectKind::Snow.config(), HeadlessSink::default(), 0.0, vp);
        assert!(!scene.contains(EffectKind::GalleryPetals));
        scene.burst(EffectKind::GalleryPetals, 15, 0.0, vp);
        assert_eq!(scene.population(EffectKind::GalleryPetals), 0);
        assert_eq!(scene.total_population(), 40);
    }

    #[test]
    fn test_scene_resize_clamps_all_layers() {
        let mut scene = full_scene(3, Viewport::new(1920.0, 1080.0));
        scene.resize(Viewport::new(400.0, 1080.0));
        for layer in scene.layers() {
            assert!(
                layer
                    .emitter
                    .particles()
                    .iter()
                    .all(|p| p.params.origin.x <= 400.0)
            );
        }
    }

    #[test]
    fn test_effects_use_independent_streams() {
        let scene = full_scene(4, Viewport::new(1280.0, 720.0));
        let snow = scene.layer(EffectKind::Snow).unwrap();
        let rain = scene.layer(EffectKind::Rain).unwrap();
        assert_ne!(
            snow.emitter.particles()[0].params.origin.x,
            rain.emitter.particles()[0].params.origin.x
        );
    }

    #[test]
    fn test_gallery_burst_then_steady_state_elsewhere() {
        let vp = Viewport::new(1280.0, 720.0);
        let mut scene = full_scene(5, vp);
        scene.burst(EffectKind::GalleryPetals, 15, 0.0, vp);
        assert_eq!(scene.population(EffectKind::GalleryPetals), 15);

        let mut now = 0.0;
        while now < 20_000.0 {
            scene.tick(now, vp);
            now += 33.0;
        }
        assert_eq!(scene.population(EffectKind::GalleryPetals), 0);
        assert_eq!(scene.population(EffectKind::Sakura), 30);
        assert_eq!(scene.total_population(), 158);
    }
}
