//! Generic particle emitter
//!
//! Owns one effect's population. Perpetual emitters keep a fixed set of
//! slots and reset them in place when a particle finishes; one-shot emitters
//! drop finished particles.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::Viewport;
use super::effects::{EffectConfig, EffectKind, Lifetime};
use super::motion::Pose;
use super::particle::{Particle, ParticleId, ParticleParams};

/// Initial presentation of a freshly spawned particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnStyle {
    pub class_name: &'static str,
    /// CSS left/top in pixels
    pub origin: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl SpawnStyle {
    /// CSS `transform` shown until the first frame
    pub fn transform_css(&self) -> String {
        format!("rotate({:.2}deg) scale({:.3})", self.rotation_deg, self.scale)
    }
}

/// Host-side receiver of particle lifecycle calls (DOM container, headless counter)
pub trait ParticleSink {
    /// A new particle exists; create or recycle its visual
    fn spawn(&mut self, id: ParticleId, style: &SpawnStyle);
    /// Apply the pose for the current frame
    fn update(&mut self, id: ParticleId, pose: &Pose);
    /// The particle finished; remove its visual
    fn retire(&mut self, id: ParticleId);
    /// Origin moved (resize clamp)
    fn reposition(&mut self, id: ParticleId, origin: Vec2);
}

/// One effect's particle population
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EffectConfig,
    rng: Pcg32,
    particles: Vec<Particle>,
    next_id: u64,
    spawned: u64,
    retired: u64,
}

impl Emitter {
    pub fn new(config: EffectConfig, rng: Pcg32) -> Self {
        let capacity = config.count;
        Self {
            config,
            rng,
            particles: Vec::with_capacity(capacity),
            next_id: 1,
            spawned: 0,
            retired: 0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.config.kind
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live particles (delayed or animating)
    pub fn population(&self) -> usize {
        self.particles.len()
    }

    /// Total particles ever spawned
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Total particles ever retired
    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Spawn the configured population
    pub fn initialize(&mut self, now: f64, viewport: Viewport, sink: &mut impl ParticleSink) {
        for _ in 0..self.config.count {
            self.spawn_one(now, viewport, sink);
        }
    }

    /// Spawn `count` extra particles (gallery bursts)
    pub fn burst(&mut self, count: usize, now: f64, viewport: Viewport, sink: &mut impl ParticleSink) {
        for _ in 0..count {
            self.spawn_one(now, viewport, sink);
        }
    }

    /// Spawn a single particle with fresh random parameters
    pub fn spawn_one(&mut self, now: f64, viewport: Viewport, sink: &mut impl ParticleSink) -> ParticleId {
        let id = self.allocate_id();
        let params = ParticleParams::roll(&self.config, &mut self.rng, viewport);
        let particle = Particle::new(id, params, now);
        sink.spawn(id, &self.spawn_style(&particle));
        self.particles.push(particle);
        self.spawned += 1;
        id
    }

    /// Advance every particle to `now`
    pub fn tick(&mut self, now: f64, viewport: Viewport, sink: &mut impl ParticleSink) {
        let mut pruned = false;

        for i in 0..self.particles.len() {
            let Some(progress) = self.particles[i].advance(now) else {
                continue;
            };

            let id = self.particles[i].id;
            let pose = self
                .config
                .motion
                .pose(&self.particles[i].params, progress, viewport);
            sink.update(id, &pose);

            if progress < 1.0 {
                continue;
            }

            sink.retire(id);
            self.retired += 1;

            match self.config.lifetime {
                Lifetime::Perpetual => {
                    let new_id = self.allocate_id();
                    let params = ParticleParams::roll(&self.config, &mut self.rng, viewport);
                    self.particles[i].recycle(new_id, params, now);
                    sink.spawn(new_id, &self.spawn_style(&self.particles[i]));
                    self.spawned += 1;
                }
                Lifetime::OneShot => {
                    self.particles[i].finish();
                    pruned = true;
                }
            }
        }

        if pruned {
            self.particles.retain(|p| !p.is_finished());
        }
    }

    /// Keep every origin inside `width`
    pub fn clamp_to_width(&mut self, width: f32, sink: &mut impl ParticleSink) {
        for particle in self.particles.iter_mut() {
            if particle.clamp_x(width) {
                sink.reposition(particle.id, particle.params.origin);
            }
        }
    }

    fn allocate_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_style(&self, particle: &Particle) -> SpawnStyle {
        SpawnStyle {
            class_name: self.config.class_name,
            origin: particle.params.origin,
            rotation_deg: particle.params.rotation_deg,
            scale: particle.params.scale,
        }
    }
}
