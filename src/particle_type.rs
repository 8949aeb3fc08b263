use super::canvas::TextureId;
use super::color::{ColorGradient, Rgba};
use super::error::EffectError;
use super::random::SampleRange;
use cgmath::Vector2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    Circle,
    Rectangle,
}

impl Default for ParticleShape {
    fn default() -> Self {
        ParticleShape::Circle
    }
}

/// Everything needed to stamp out particles of one kind. Angle ranges are
/// stored in radians; the builder accepts degrees.
#[derive(Clone, Debug)]
pub struct ParticleType {
    pub name: String,

    pub position_radius: SampleRange,
    pub position_angle: SampleRange,
    pub velocity: SampleRange,
    pub velocity_angle: SampleRange,
    pub acceleration: SampleRange,
    pub acceleration_angle: SampleRange,

    pub duration: SampleRange,
    pub ignore_physics_after: Option<f32>,

    pub start_size: Vector2<f32>,
    pub final_size: Vector2<f32>,
    pub size_multiplier: SampleRange,

    pub gradient: Arc<ColorGradient>,
    pub texture: Option<TextureId>,
    pub shape: ParticleShape,
}

impl ParticleType {
    pub fn builder(name: &str) -> ParticleTypeBuilder {
        ParticleTypeBuilder::new(name)
    }
}

type Pair = (f32, f32);

#[derive(Clone, Debug)]
pub struct ParticleTypeBuilder {
    name: String,
    position_radius: Pair,
    position_angle: Pair,
    velocity: Pair,
    velocity_angle: Pair,
    acceleration: Pair,
    acceleration_angle: Pair,
    duration: Pair,
    ignore_physics_after: Option<f32>,
    start_size: Pair,
    final_size: Pair,
    size_multiplier: Pair,
    colors: Vec<Rgba>,
    color_stops: Vec<f32>,
    texture: Option<TextureId>,
    shape: ParticleShape,
}

fn radians(range: Pair) -> Pair {
    (range.0.to_radians(), range.1.to_radians())
}

impl ParticleTypeBuilder {
    pub fn new(name: &str) -> Self {
        ParticleTypeBuilder {
            name: name.to_string(),
            position_radius: (0.0, 3.0),
            position_angle: radians((0.0, 360.0)),
            velocity: (32.0, 64.0),
            velocity_angle: radians((0.0, 360.0)),
            acceleration: (32.0, 64.0),
            acceleration_angle: radians((0.0, 360.0)),
            duration: (0.0, 10.0),
            ignore_physics_after: None,
            start_size: (32.0, 32.0),
            final_size: (32.0, 32.0),
            size_multiplier: (1.0, 1.0),
            colors: vec![Rgba::new(255, 255, 255, 128)],
            color_stops: vec![0.0],
            texture: None,
            shape: ParticleShape::Circle,
        }
    }

    pub fn position_radius(mut self, min: f32, max: f32) -> Self {
        self.position_radius = (min, max);
        self
    }

    pub fn position_angle(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.position_angle = radians((min_deg, max_deg));
        self
    }

    pub fn velocity(mut self, min: f32, max: f32) -> Self {
        self.velocity = (min, max);
        self
    }

    pub fn velocity_angle(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.velocity_angle = radians((min_deg, max_deg));
        self
    }

    pub fn acceleration(mut self, min: f32, max: f32) -> Self {
        self.acceleration = (min, max);
        self
    }

    pub fn acceleration_angle(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.acceleration_angle = radians((min_deg, max_deg));
        self
    }

    pub fn duration(mut self, min: f32, max: f32) -> Self {
        self.duration = (min, max);
        self
    }

    // None disables the cutoff.
    pub fn ignore_physics_after(mut self, seconds: Option<f32>) -> Self {
        self.ignore_physics_after = seconds;
        self
    }

    pub fn size(mut self, start: [f32; 2], end: [f32; 2]) -> Self {
        self.start_size = (start[0], start[1]);
        self.final_size = (end[0], end[1]);
        self
    }

    pub fn size_multiplier(mut self, min: f32, max: f32) -> Self {
        self.size_multiplier = (min, max);
        self
    }

    pub fn colors(mut self, colors: Vec<Rgba>, stops: Vec<f32>) -> Self {
        self.colors = colors;
        self.color_stops = stops;
        self
    }

    pub fn texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn build(self) -> Result<ParticleType, EffectError> {
        let range = |name, r: Pair| SampleRange::new(name, r.0, r.1);
        let size_multiplier = range("size multiplier", self.size_multiplier)?;
        if size_multiplier.min < 0.0 {
            return Err(EffectError::InvalidValue("size multiplier", size_multiplier.min));
        }
        for &(name, value) in &[
            ("start width", self.start_size.0),
            ("start height", self.start_size.1),
            ("final width", self.final_size.0),
            ("final height", self.final_size.1),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EffectError::InvalidValue(name, value));
            }
        }
        if let Some(cutoff) = self.ignore_physics_after {
            if !cutoff.is_finite() || cutoff < 0.0 {
                return Err(EffectError::InvalidValue("ignore physics after", cutoff));
            }
        }
        Ok(ParticleType {
            position_radius: range("position radius", self.position_radius)?,
            position_angle: range("position angle", self.position_angle)?,
            velocity: range("velocity", self.velocity)?,
            velocity_angle: range("velocity angle", self.velocity_angle)?,
            acceleration: range("acceleration", self.acceleration)?,
            acceleration_angle: range("acceleration angle", self.acceleration_angle)?,
            duration: range("duration", self.duration)?,
            ignore_physics_after: self.ignore_physics_after,
            start_size: Vector2::new(self.start_size.0, self.start_size.1),
            final_size: Vector2::new(self.final_size.0, self.final_size.1),
            size_multiplier,
            gradient: Arc::new(ColorGradient::new(self.colors, self.color_stops)?),
            texture: self.texture,
            shape: self.shape,
            name: self.name,
        })
    }
}
