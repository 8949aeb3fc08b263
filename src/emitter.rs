use super::coords;
use super::error::EffectError;
use super::particle::{Particle, ParticleSpawn};
use super::particle_type::ParticleType;
use super::random::RandomSource;
use cgmath::Vector2;
use log::{debug, trace};
use std::sync::Arc;

// Anything that accepts freshly emitted particles.
pub trait ParticleSink {
    fn add_particle(&mut self, particle: Particle);
}

impl ParticleSink for Vec<Particle> {
    fn add_particle(&mut self, particle: Particle) {
        self.push(particle);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BurstSchedule {
    pub position: [f32; 2],
    // Finite only when positive.
    pub duration: Option<f32>,
    pub delay: f32,
    // Bursts per second.
    pub burst_rate: f32,
    // Particles per burst.
    pub burst_count: u32,
}

impl Default for BurstSchedule {
    fn default() -> Self {
        BurstSchedule {
            position: [0.0, 0.0],
            duration: None,
            delay: 0.0,
            burst_rate: 1.0,
            burst_count: 32,
        }
    }
}

/// Spawns groups of particles of one type at a fixed rate. Bursts owed since
/// the last update are all emitted at once, so a long sub-step never loses
/// particles.
#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    particle_type: Arc<ParticleType>,
    position: Vector2<f32>,
    duration: Option<f32>,
    delay: f32,
    elapsed_time: f32,
    burst_rate: f32,
    burst_count: u32,
    current_burst: u64,
    active: bool,
    finished: bool,
}

impl ParticleEmitter {
    pub fn new(
        particle_type: Arc<ParticleType>,
        schedule: BurstSchedule,
    ) -> Result<Self, EffectError> {
        if !schedule.delay.is_finite() || schedule.delay < 0.0 {
            return Err(EffectError::InvalidValue("emitter delay", schedule.delay));
        }
        if !schedule.burst_rate.is_finite() || schedule.burst_rate < 0.0 {
            return Err(EffectError::InvalidValue("burst rate", schedule.burst_rate));
        }
        if let Some(duration) = schedule.duration {
            if !duration.is_finite() {
                return Err(EffectError::InvalidValue("emitter duration", duration));
            }
        }
        Ok(ParticleEmitter {
            particle_type,
            position: Vector2::new(schedule.position[0], schedule.position[1]),
            duration: schedule.duration,
            delay: schedule.delay,
            elapsed_time: 0.0,
            burst_rate: schedule.burst_rate,
            burst_count: schedule.burst_count,
            current_burst: 0,
            active: false,
            finished: false,
        })
    }

    pub fn particle_type(&self) -> &Arc<ParticleType> {
        &self.particle_type
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: [f32; 2]) {
        self.position = Vector2::new(position[0], position[1]);
    }

    pub fn current_burst(&self) -> u64 {
        self.current_burst
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // Returns the number of particles handed to `sink`.
    pub fn update<R, S>(&mut self, dt: f32, rng: &mut R, sink: &mut S) -> usize
    where
        R: RandomSource + ?Sized,
        S: ParticleSink + ?Sized,
    {
        self.elapsed_time += dt;

        if let Some(duration) = self.duration {
            if duration > 0.0 && self.elapsed_time >= duration + self.delay {
                debug!(
                    "Emitter for {} finished after {} bursts",
                    self.particle_type.name, self.current_burst
                );
                self.finished = true;
                return 0;
            }
        }

        if !self.active && self.elapsed_time > self.delay {
            debug!("Emitter for {} active", self.particle_type.name);
            self.active = true;
        }
        if !self.active {
            return 0;
        }

        let next_burst = ((self.elapsed_time - self.delay) * self.burst_rate).floor() as u64 + 1;
        let mut spawned = 0;
        for _ in self.current_burst..next_burst {
            spawned += self.burst(rng, sink);
        }
        self.current_burst = self.current_burst.max(next_burst);
        if spawned > 0 {
            trace!("Emitted {} particles", spawned);
        }
        spawned
    }

    fn burst<R, S>(&self, rng: &mut R, sink: &mut S) -> usize
    where
        R: RandomSource + ?Sized,
        S: ParticleSink + ?Sized,
    {
        let ptype = &*self.particle_type;
        let radius = ptype.position_radius.sample(rng);
        let angle = ptype.position_angle.sample(rng);
        // The spawn offset is taken as-is in screen space.
        let origin = self.position + coords::polar(radius, angle);

        for _ in 0..self.burst_count {
            let duration = ptype.duration.sample(rng);
            let speed = ptype.velocity.sample(rng);
            let velocity_angle = ptype.velocity_angle.sample(rng);
            let acceleration = ptype.acceleration.sample(rng);
            let acceleration_angle = ptype.acceleration_angle.sample(rng);
            let size_multiplier = ptype.size_multiplier.sample(rng);
            sink.add_particle(Particle::new(
                ptype,
                ParticleSpawn {
                    position: origin,
                    velocity: coords::polar(speed, velocity_angle),
                    acceleration: coords::polar(acceleration, acceleration_angle),
                    duration,
                    size_multiplier,
                },
            ));
        }
        self.burst_count as usize
    }
}
