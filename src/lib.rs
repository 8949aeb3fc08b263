pub mod affector;
pub mod canvas;
pub mod color;
pub mod coords;
pub mod effect_params;
pub mod emitter;
pub mod error;
pub mod frame_clock;
pub mod particle;
pub mod particle_system;
pub mod particle_type;
pub mod random;

pub use affector::{AffectorKind, ParticleAffector};
pub use canvas::{Canvas, DrawCommand, DrawList, TextureId};
pub use color::{ColorGradient, Rgba};
pub use effect_params::EffectParams;
pub use emitter::{BurstSchedule, ParticleEmitter, ParticleSink};
pub use error::EffectError;
pub use particle::{Particle, ParticleSpawn};
pub use particle_system::{ParticleSystem, SUB_STEP};
pub use particle_type::{ParticleShape, ParticleType};
pub use random::{Prng, RandomSource, SampleRange};
