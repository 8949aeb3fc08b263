use super::canvas::{Canvas, TextureId};
use super::color::{ColorGradient, GradientCursor, Rgba};
use super::coords;
use super::particle_type::{ParticleShape, ParticleType};
use cgmath::Vector2;
use std::sync::Arc;

// Values drawn once per particle at emission.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParticleSpawn {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub acceleration: Vector2<f32>,
    pub duration: f32,
    pub size_multiplier: f32,
}

#[derive(Clone, Debug)]
pub struct Particle {
    // Screen space.
    pub(crate) position: Vector2<f32>,
    // World space, see `coords`.
    pub(crate) velocity: Vector2<f32>,
    acceleration: Vector2<f32>,

    start_size: Vector2<f32>,
    final_size: Vector2<f32>,
    size: Vector2<f32>,

    duration: f32,
    elapsed_time: f32,
    ignore_physics_after: Option<f32>,

    gradient: Arc<ColorGradient>,
    cursor: GradientCursor,
    color: Rgba,

    texture: Option<TextureId>,
    shape: ParticleShape,
    finished: bool,
}

impl Particle {
    pub fn new(ptype: &ParticleType, spawn: ParticleSpawn) -> Self {
        let scale = |v: Vector2<f32>| {
            Vector2::new(
                (v.x * spawn.size_multiplier).trunc(),
                (v.y * spawn.size_multiplier).trunc(),
            )
        };
        let start_size = scale(ptype.start_size);
        Particle {
            position: spawn.position,
            velocity: spawn.velocity,
            acceleration: spawn.acceleration,
            start_size,
            final_size: scale(ptype.final_size),
            size: start_size,
            duration: spawn.duration,
            elapsed_time: 0.0,
            ignore_physics_after: ptype.ignore_physics_after,
            color: ptype.gradient.initial_color(),
            gradient: ptype.gradient.clone(),
            cursor: GradientCursor::default(),
            texture: ptype.texture,
            shape: ptype.shape,
            finished: false,
        }
    }

    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2<f32>) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f32>) {
        self.velocity = velocity;
    }

    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.velocity.x.is_finite()
            && self.velocity.y.is_finite()
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        if self.duration >= 0.0 && self.elapsed_time >= self.duration {
            self.finished = true;
            return;
        }
        self.update_color();
        self.update_size();
        self.update_position(dt);
        self.elapsed_time += dt;
    }

    fn physics_enabled(&self) -> bool {
        match self.ignore_physics_after {
            Some(cutoff) => self.elapsed_time < cutoff,
            None => true,
        }
    }

    // Semi-implicit Euler: move with the current velocity, then accelerate.
    fn update_position(&mut self, dt: f32) {
        if !self.physics_enabled() {
            return;
        }
        self.position += coords::world_to_screen_delta(self.velocity, dt);
        self.velocity += self.acceleration * dt;
    }

    fn update_size(&mut self) {
        if self.duration <= 0.0 {
            return;
        }
        let factor = self.elapsed_time / self.duration;
        self.size = self.start_size + (self.final_size - self.start_size) * factor;
    }

    fn update_color(&mut self) {
        if self.duration <= 0.0 {
            return;
        }
        let life = self.elapsed_time / self.duration;
        if let Some(color) = self.cursor.sample(&self.gradient, life) {
            self.color = color;
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if self.finished {
            return;
        }
        let x = self.position.x as i32;
        let y = self.position.y as i32;
        let half = [(self.size.x / 2.0) as i32, (self.size.y / 2.0) as i32];
        let size = [self.size.x as i32, self.size.y as i32];
        if let Some(texture) = self.texture {
            canvas.draw_texture(texture, [x - half[0], y - half[1]], size, self.color.a);
            return;
        }
        match self.shape {
            ParticleShape::Circle => {
                let radius = (self.size.x.max(self.size.y) / 2.0) as i32;
                if radius > 0 {
                    canvas.fill_circle([x, y], radius, self.color);
                }
            }
            ParticleShape::Rectangle => {
                canvas.fill_rect([x - half[0], y - half[1]], size, self.color);
            }
        }
    }
}
