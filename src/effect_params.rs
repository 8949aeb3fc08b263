use super::affector::ParticleAffector;
use super::canvas::TextureId;
use super::color::Rgba;
use super::emitter::{BurstSchedule, ParticleEmitter};
use super::error::EffectError;
use super::particle_system::ParticleSystem;
use super::particle_type::{ParticleShape, ParticleType};
use super::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// Parameters that define an effect, as tuned in the editor. Angles are in
// degrees; everything is validated when the effect is instantiated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EffectParams {
    pub name: String,

    #[serde(default)]
    pub particle: ParticleParams,

    #[serde(default)]
    pub emitter: EmitterParams,

    #[serde(default)]
    pub gravity: Option<GravityParams>,

    #[serde(default)]
    pub attraction: Option<AttractionParams>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleParams {
    pub position_radius: [f32; 2],
    pub position_angle: [f32; 2],
    pub velocity: [f32; 2],
    pub velocity_angle: [f32; 2],
    pub acceleration: [f32; 2],
    pub acceleration_angle: [f32; 2],
    pub duration: [f32; 2],
    pub ignore_physics_after: Option<f32>,
    pub start_size: [f32; 2],
    pub final_size: [f32; 2],
    pub size_multiplier: [f32; 2],
    pub colors: Vec<[u8; 4]>,
    pub color_stops: Vec<f32>,
    pub shape: ParticleShape,
    pub texture: Option<u32>,
}

impl Default for ParticleParams {
    fn default() -> Self {
        ParticleParams {
            position_radius: [0.0, 800.0],
            position_angle: [0.0, 360.0],
            velocity: [10.0, 150.0],
            velocity_angle: [30.0, 50.0],
            acceleration: [0.0, 20.0],
            acceleration_angle: [0.0, 360.0],
            duration: [0.0, 3.5],
            ignore_physics_after: None,
            start_size: [8.0, 8.0],
            final_size: [4.0, 4.0],
            size_multiplier: [1.0, 1.0],
            colors: vec![
                [255, 255, 0, 255],
                [255, 128, 0, 200],
                [255, 0, 0, 100],
                [50, 50, 50, 0],
            ],
            color_stops: vec![0.0, 0.3, 0.6, 1.0],
            shape: ParticleShape::Circle,
            texture: None,
        }
    }
}

impl ParticleParams {
    pub fn particle_type(&self, name: &str) -> Result<ParticleType, EffectError> {
        ParticleType::builder(name)
            .position_radius(self.position_radius[0], self.position_radius[1])
            .position_angle(self.position_angle[0], self.position_angle[1])
            .velocity(self.velocity[0], self.velocity[1])
            .velocity_angle(self.velocity_angle[0], self.velocity_angle[1])
            .acceleration(self.acceleration[0], self.acceleration[1])
            .acceleration_angle(self.acceleration_angle[0], self.acceleration_angle[1])
            .duration(self.duration[0], self.duration[1])
            // Exported descriptors mark a disabled cutoff with -1.
            .ignore_physics_after(
                self.ignore_physics_after
                    .filter(|after| after.is_nan() || *after >= 0.0),
            )
            .size(self.start_size, self.final_size)
            .size_multiplier(self.size_multiplier[0], self.size_multiplier[1])
            .colors(
                self.colors.iter().copied().map(Rgba::from).collect(),
                self.color_stops.clone(),
            )
            .shape(self.shape)
            .texture(self.texture.map(TextureId))
            .build()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EmitterParams {
    pub burst_rate: f32,
    pub burst_count: u32,
    pub duration: Option<f32>,
    pub delay: f32,
}

impl Default for EmitterParams {
    fn default() -> Self {
        EmitterParams {
            burst_rate: 25.0,
            burst_count: 1,
            duration: Some(10.0),
            delay: 0.1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GravityParams {
    pub angle: f32,
    pub gravity: f32,
}

impl Default for GravityParams {
    fn default() -> Self {
        GravityParams {
            angle: 180.0,
            gravity: 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AttractionParams {
    pub acceleration: f32,
    pub reduction: f32,
    pub repel: bool,
}

impl Default for AttractionParams {
    fn default() -> Self {
        AttractionParams {
            acceleration: 1000.0,
            reduction: 0.0,
            repel: false,
        }
    }
}

impl EffectParams {
    pub fn particle_type(&self) -> Result<ParticleType, EffectError> {
        self.particle.particle_type(&self.name)
    }

    // Builds a running system with its emitter, and attraction target if
    // any, at `origin`.
    pub fn instantiate<R: RandomSource>(
        &self,
        origin: [f32; 2],
        rng: R,
    ) -> Result<ParticleSystem<R>, EffectError> {
        let mut system = ParticleSystem::with_random_source(rng);
        let emitter = ParticleEmitter::new(
            Arc::new(self.particle_type()?),
            BurstSchedule {
                position: origin,
                duration: self.emitter.duration,
                delay: self.emitter.delay,
                burst_rate: self.emitter.burst_rate,
                burst_count: self.emitter.burst_count,
            },
        )?;
        system.add_emitter(emitter);
        if let Some(gravity) = self.gravity {
            system.add_affector(ParticleAffector::gravity(gravity.angle, gravity.gravity)?);
        }
        if let Some(attraction) = self.attraction {
            system.add_affector(ParticleAffector::attraction(
                origin,
                attraction.acceleration,
                attraction.reduction,
                attraction.repel,
            )?);
        }
        log::info!(
            "Instantiated effect {} at {:?} with {} affectors",
            self.name,
            origin,
            system.affector_count()
        );
        Ok(system)
    }
}

impl std::str::FromStr for EffectParams {
    type Err = toml::de::Error;
    fn from_str(serialized: &str) -> Result<Self, Self::Err> {
        let params = toml::from_str(serialized)?;
        Ok(params)
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        EffectParams {
            name: "custom_effect".to_string(),
            particle: ParticleParams::default(),
            emitter: EmitterParams::default(),
            gravity: None,
            attraction: None,
        }
    }
}

pub fn get_effect_config_from_default_file() -> EffectParams {
    let config_data = include_str!("../effect_config.toml");
    match config_data.parse() {
        Ok(params) => params,
        Err(e) => {
            log::error!(
                "Failed to parse config file({}): {:?}",
                "../effect_config.toml",
                e
            );
            EffectParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Prng;
    use std::time::Duration;

    #[test]
    fn smoke() {
        let params = EffectParams {
            name: "sparks".to_string(),
            particle: ParticleParams {
                ignore_physics_after: Some(1.5),
                texture: Some(7),
                shape: ParticleShape::Rectangle,
                ..Default::default()
            },
            emitter: EmitterParams::default(),
            gravity: Some(GravityParams::default()),
            attraction: None,
        };
        let serialized = toml::to_string(&params).unwrap();
        println!("serialized = {}", serialized);
        let deserialized: EffectParams = serialized.parse().unwrap();
        println!("deserialized = {:?}", deserialized);
        assert_eq!(params, deserialized);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let params: EffectParams = "name = \"bare\"".parse().unwrap();
        assert_eq!(params.particle, ParticleParams::default());
        assert_eq!(params.emitter, EmitterParams::default());
        assert!(params.gravity.is_none());
    }

    #[test]
    fn bundled_config_parses() {
        let params = get_effect_config_from_default_file();
        assert_eq!(params.name, "ember_fountain");
        assert!(params.particle_type().is_ok());
    }

    #[test]
    fn instantiates_with_affectors() {
        let params = EffectParams {
            gravity: Some(GravityParams::default()),
            attraction: Some(AttractionParams::default()),
            ..Default::default()
        };
        let mut system = params.instantiate([320.0, 240.0], Prng::seeded(3)).unwrap();
        assert_eq!(system.emitter_count(), 1);
        assert_eq!(system.affector_count(), 2);
        system.advance(Duration::from_millis(500));
        assert!(system.particle_count() > 0);
    }

    #[test]
    fn invalid_ranges_surface_at_instantiation() {
        let mut params = EffectParams::default();
        params.particle.velocity = [50.0, 10.0];
        let err = params.instantiate([0.0, 0.0], Prng::seeded(0)).err();
        assert_eq!(
            err,
            Some(EffectError::InvalidRange {
                name: "velocity",
                min: 50.0,
                max: 10.0
            })
        );
    }

    #[test]
    fn bad_affector_fails_instantiation() {
        let params = EffectParams {
            attraction: Some(AttractionParams {
                reduction: std::f32::NAN,
                ..Default::default()
            }),
            ..Default::default()
        };
        match params.instantiate([0.0, 0.0], Prng::seeded(0)) {
            Err(EffectError::InvalidValue(name, _)) => assert_eq!(name, "attraction reduction"),
            Err(e) => panic!("unexpected error {:?}", e),
            Ok(_) => panic!("instantiated with a NaN reduction"),
        }
        let params = EffectParams {
            gravity: Some(GravityParams {
                gravity: std::f32::INFINITY,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(params.instantiate([0.0, 0.0], Prng::seeded(0)).is_err());
    }

    #[test]
    fn negative_cutoff_means_disabled() {
        let mut params = EffectParams::default();
        params.particle.ignore_physics_after = Some(-1.0);
        let ptype = params.particle_type().unwrap();
        assert_eq!(ptype.ignore_physics_after, None);
        params.particle.ignore_physics_after = Some(0.5);
        assert_eq!(params.particle_type().unwrap().ignore_physics_after, Some(0.5));
        params.particle.ignore_physics_after = Some(std::f32::NAN);
        assert!(params.particle_type().is_err());
    }
}
