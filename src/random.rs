use super::error::EffectError;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Uniform sampling over a closed interval. Emission draws all of its
/// randomness through this so hosts and tests can supply their own source.
pub trait RandomSource {
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// Default pseudo-random source.
#[derive(Debug, Clone)]
pub struct Prng {
    rng: SmallRng,
}

impl Prng {
    pub fn seeded(seed: u64) -> Self {
        Prng {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Prng {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl RandomSource for Prng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let unit: f32 = self.rng.gen();
        (min + (max - min) * unit).min(max)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub fn new(name: &'static str, min: f32, max: f32) -> Result<Self, EffectError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(EffectError::InvalidRange { name, min, max });
        }
        Ok(SampleRange { min, max })
    }

    pub const fn point(value: f32) -> Self {
        SampleRange {
            min: value,
            max: value,
        }
    }

    // Degenerate ranges never consult the source.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        rng.uniform(self.min, self.max).max(self.min).min(self.max)
    }
}
