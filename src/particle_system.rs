use super::affector::ParticleAffector;
use super::canvas::Canvas;
use super::emitter::{ParticleEmitter, ParticleSink};
use super::frame_clock::FrameClock;
use super::particle::Particle;
use super::random::{Prng, RandomSource};
use log::{trace, warn};
use std::time::Duration;

// One simulation tick, 1/60 s.
pub const SUB_STEP: Duration = Duration::from_nanos(16_666_667);

/// Owns every live particle, emitter and affector of one effect and advances
/// them in fixed sub-steps, independent of how often the host calls
/// [`ParticleSystem::update`].
///
/// Each sub-step runs emitters (which may add particles), then affectors,
/// then every particle: forces first, integration second. Finished entities
/// are dropped on the sub-step after they finish, and the relative order of
/// particles is preserved so drawing follows emission order.
pub struct ParticleSystem<R: RandomSource = Prng> {
    particles: Vec<Particle>,
    emitters: Vec<ParticleEmitter>,
    affectors: Vec<ParticleAffector>,
    rng: R,
    clock: FrameClock,
    sub_step: Duration,
    accumulator: Duration,
    finished: bool,
}

impl ParticleSystem<Prng> {
    pub fn new() -> Self {
        ParticleSystem::with_random_source(Prng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        ParticleSystem::with_random_source(Prng::seeded(seed))
    }
}

impl Default for ParticleSystem<Prng> {
    fn default() -> Self {
        ParticleSystem::new()
    }
}

impl<R: RandomSource> ParticleSystem<R> {
    pub fn with_random_source(rng: R) -> Self {
        ParticleSystem {
            particles: Vec::new(),
            emitters: Vec::new(),
            affectors: Vec::new(),
            rng,
            clock: FrameClock::new(),
            sub_step: SUB_STEP,
            accumulator: Duration::from_secs(0),
            finished: false,
        }
    }

    pub fn with_sub_step(mut self, sub_step: Duration) -> Self {
        self.sub_step = sub_step.max(Duration::from_nanos(1));
        self
    }

    pub fn sub_step(&self) -> Duration {
        self.sub_step
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.finished = false;
        self.particles.push(particle);
    }

    pub fn add_emitter(&mut self, emitter: ParticleEmitter) {
        self.finished = false;
        self.emitters.push(emitter);
    }

    pub fn add_affector(&mut self, affector: ParticleAffector) {
        self.affectors.push(affector);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn emitters_mut(&mut self) -> &mut [ParticleEmitter] {
        &mut self.emitters
    }

    pub fn affectors_mut(&mut self) -> &mut [ParticleAffector] {
        &mut self.affectors
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn affector_count(&self) -> usize {
        self.affectors.len()
    }

    // True once there are neither particles nor emitters left. Affectors on
    // their own don't keep a system alive.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // Drops everything; simulation stops immediately.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.emitters.clear();
        self.affectors.clear();
        self.accumulator = Duration::from_secs(0);
    }

    /// Advances by the real time elapsed since the previous call. Returns the
    /// number of sub-steps run.
    pub fn update(&mut self) -> u32 {
        let elapsed = self.clock.tick();
        self.advance(elapsed)
    }

    /// Advances by `elapsed` of host time. Time short of a whole sub-step is
    /// carried into the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        if self.accumulator < self.sub_step {
            return 0;
        }
        let step_nanos = self.sub_step.as_nanos();
        let carried = (self.accumulator.as_nanos() % step_nanos) as u64;
        let iterations = (self.accumulator.as_nanos() / step_nanos) as u32;
        self.accumulator = Duration::from_nanos(carried);

        if self.particles.is_empty() && self.emitters.is_empty() {
            self.finished = true;
            return 0;
        }

        let dt = self.sub_step.as_secs_f32();
        for _ in 0..iterations {
            self.step(dt);
        }
        trace!(
            "Ran {} sub-steps, {} particles, {} emitters, {} affectors",
            iterations,
            self.particles.len(),
            self.emitters.len(),
            self.affectors.len()
        );
        iterations
    }

    fn step(&mut self, dt: f32) {
        let ParticleSystem {
            particles,
            emitters,
            affectors,
            rng,
            ..
        } = self;

        emitters.retain_mut(|emitter| {
            if emitter.is_finished() {
                return false;
            }
            emitter.update(dt, &mut *rng, &mut *particles);
            true
        });

        affectors.retain_mut(|affector| {
            if affector.is_finished() {
                return false;
            }
            affector.update(dt);
            true
        });

        let affectors = &*affectors;
        particles.retain_mut(|particle| {
            if particle.is_finished() {
                return false;
            }
            for affector in affectors {
                affector.apply_force(particle, dt);
            }
            particle.update(dt);
            if !particle.is_finite() {
                warn!(
                    "Retiring particle with non-finite state at {:?}",
                    particle.position()
                );
                particle.finish();
                return false;
            }
            true
        });
    }

    // Draws live particles in emission order.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for particle in &self.particles {
            particle.render(canvas);
        }
    }
}

impl<R: RandomSource> ParticleSink for ParticleSystem<R> {
    fn add_particle(&mut self, particle: Particle) {
        self.finished = false;
        self.particles.push(particle);
    }
}
