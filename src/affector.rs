use super::coords;
use super::error::EffectError;
use super::particle::Particle;
use cgmath::{InnerSpace, Vector2};
use log::debug;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AffectorKind {
    // Constant acceleration along `angle` (radians, world space).
    Gravity {
        angle: f32,
        gravity: f32,
    },
    // Pulls particles toward (or pushes them away from) a screen-space
    // target, damping velocity by `reduction` percent per second.
    Attraction {
        target: Vector2<f32>,
        acceleration: f32,
        reduction: f32,
        repel: bool,
    },
}

/// A time-gated force field applied to every live particle each sub-step.
/// Forces only ever change velocity; positions follow through integration.
#[derive(Clone, Debug)]
pub struct ParticleAffector {
    pub kind: AffectorKind,
    // None runs forever.
    duration: Option<f32>,
    delay: f32,
    elapsed_time: f32,
    active: bool,
    finished: bool,
}

impl ParticleAffector {
    pub fn new(kind: AffectorKind) -> Self {
        ParticleAffector {
            kind,
            duration: None,
            delay: 0.0,
            elapsed_time: 0.0,
            active: false,
            finished: false,
        }
    }

    pub fn gravity(angle_deg: f32, gravity: f32) -> Result<Self, EffectError> {
        finite("gravity angle", angle_deg)?;
        finite("gravity", gravity)?;
        Ok(ParticleAffector::new(AffectorKind::Gravity {
            angle: angle_deg.to_radians(),
            gravity,
        }))
    }

    pub fn attraction(
        target: [f32; 2],
        acceleration: f32,
        reduction: f32,
        repel: bool,
    ) -> Result<Self, EffectError> {
        finite("attraction target x", target[0])?;
        finite("attraction target y", target[1])?;
        finite("attraction acceleration", acceleration)?;
        finite("attraction reduction", reduction)?;
        Ok(ParticleAffector::new(AffectorKind::Attraction {
            target: Vector2::new(target[0], target[1]),
            acceleration,
            reduction,
            repel,
        }))
    }

    // A negative duration never finishes.
    pub fn with_timing(mut self, delay: f32, duration: Option<f32>) -> Result<Self, EffectError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(EffectError::InvalidValue("affector delay", delay));
        }
        if let Some(duration) = duration {
            finite("affector duration", duration)?;
        }
        self.delay = delay;
        self.duration = duration;
        Ok(self)
    }

    // Moves an attraction target; no-op for other kinds.
    pub fn set_target(&mut self, position: [f32; 2]) {
        if let AffectorKind::Attraction { target, .. } = &mut self.kind {
            *target = Vector2::new(position[0], position[1]);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(duration) = self.duration {
            if duration >= 0.0 && self.elapsed_time >= duration + self.delay {
                debug!("Affector finished after {}s", self.elapsed_time);
                self.finished = true;
                return;
            }
        }
        if !self.active && self.elapsed_time > self.delay {
            debug!("Affector active at {}s", self.elapsed_time);
            self.active = true;
        }
        self.elapsed_time += dt;
    }

    pub fn apply_force(&self, particle: &mut Particle, dt: f32) {
        if !self.active {
            return;
        }
        match self.kind {
            AffectorKind::Gravity { angle, gravity } => {
                particle.velocity += coords::polar(gravity * dt, angle);
            }
            AffectorKind::Attraction {
                target,
                acceleration,
                reduction,
                repel,
            } => {
                let direction = coords::screen_to_world_direction(particle.position, target);
                let length = direction.magnitude();
                if length == 0.0 {
                    return;
                }
                let sign = if repel { -1.0 } else { 1.0 };
                particle.velocity += direction / length * (acceleration * dt * sign);
                particle.velocity -= particle.velocity * (reduction / 100.0 * dt);
            }
        }
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), EffectError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EffectError::InvalidValue(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleSpawn;
    use crate::particle_type::ParticleType;

    fn particle_at(x: f32, y: f32, velocity: Vector2<f32>) -> Particle {
        let ptype = ParticleType::builder("dust").build().unwrap();
        Particle::new(
            &ptype,
            ParticleSpawn {
                position: Vector2::new(x, y),
                velocity,
                acceleration: Vector2::new(0.0, 0.0),
                duration: 5.0,
                size_multiplier: 1.0,
            },
        )
    }

    fn activated(mut affector: ParticleAffector) -> ParticleAffector {
        affector.update(0.5);
        affector.update(0.5);
        assert!(affector.is_active());
        affector
    }

    #[test]
    fn delay_counts_on_same_clock() {
        let mut affector = ParticleAffector::gravity(270.0, 10.0)
            .unwrap()
            .with_timing(0.5, Some(1.0))
            .unwrap();
        affector.update(0.25);
        affector.update(0.25);
        affector.update(0.25);
        assert!(!affector.is_active());
        assert_eq!(affector.elapsed_time(), 0.75);
        affector.update(0.25);
        assert!(affector.is_active());
        affector.update(0.25);
        affector.update(0.25);
        assert!(!affector.is_finished());
        affector.update(0.25);
        assert!(affector.is_finished());
        assert_eq!(affector.elapsed_time(), 1.5);
    }

    #[test]
    fn infinite_duration_never_finishes() {
        let mut affector = ParticleAffector::gravity(0.0, 1.0).unwrap();
        for _ in 0..10_000 {
            affector.update(1.0);
        }
        assert!(!affector.is_finished());
    }

    #[test]
    fn inactive_affector_leaves_particles_alone() {
        let affector = ParticleAffector::gravity(270.0, 10.0).unwrap();
        let mut p = particle_at(0.0, 0.0, Vector2::new(1.0, 2.0));
        affector.apply_force(&mut p, 1.0);
        assert_eq!(p.velocity(), Vector2::new(1.0, 2.0));
    }

    #[test]
    fn gravity_pulls_along_angle() {
        let affector = activated(ParticleAffector::gravity(0.0, 10.0).unwrap());
        let mut p = particle_at(0.0, 0.0, Vector2::new(1.0, 2.0));
        affector.apply_force(&mut p, 0.5);
        assert_eq!(p.velocity(), Vector2::new(6.0, 2.0));
        assert_eq!(p.position(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn attraction_points_at_target_in_world_space() {
        // Target sits above the particle on screen, so the pull is +y in
        // world space.
        let affector = activated(ParticleAffector::attraction([0.0, 0.0], 8.0, 0.0, false).unwrap());
        let mut p = particle_at(0.0, 50.0, Vector2::new(0.0, 0.0));
        affector.apply_force(&mut p, 0.5);
        assert_eq!(p.velocity(), Vector2::new(0.0, 4.0));
    }

    #[test]
    fn repel_reverses_direction() {
        let affector = activated(ParticleAffector::attraction([10.0, 0.0], 8.0, 0.0, true).unwrap());
        let mut p = particle_at(0.0, 0.0, Vector2::new(0.0, 0.0));
        affector.apply_force(&mut p, 0.5);
        assert_eq!(p.velocity(), Vector2::new(-4.0, 0.0));
    }

    #[test]
    fn zero_distance_skips_everything() {
        let affector = activated(ParticleAffector::attraction([3.0, 4.0], 100.0, 50.0, false).unwrap());
        let mut p = particle_at(3.0, 4.0, Vector2::new(7.0, -2.0));
        affector.apply_force(&mut p, 0.1);
        assert_eq!(p.velocity(), Vector2::new(7.0, -2.0));
        assert!(p.is_finite());
    }

    #[test]
    fn reduction_damps_velocity() {
        let affector = activated(ParticleAffector::attraction([10.0, 0.0], 0.0, 50.0, false).unwrap());
        let mut p = particle_at(0.0, 0.0, Vector2::new(8.0, -4.0));
        affector.apply_force(&mut p, 1.0);
        assert_eq!(p.velocity(), Vector2::new(4.0, -2.0));
    }

    #[test]
    fn set_target_moves_attraction_only() {
        let mut attraction = ParticleAffector::attraction([0.0, 0.0], 1.0, 0.0, false).unwrap();
        attraction.set_target([5.0, 6.0]);
        match attraction.kind {
            AffectorKind::Attraction { target, .. } => assert_eq!(target, Vector2::new(5.0, 6.0)),
            _ => panic!("kind changed"),
        }
        let mut gravity = ParticleAffector::gravity(90.0, 1.0).unwrap();
        let before = gravity.kind;
        gravity.set_target([5.0, 6.0]);
        assert_eq!(gravity.kind, before);
    }

    #[test]
    fn rejects_bad_parameters() {
        let nan = std::f32::NAN;
        match ParticleAffector::attraction([0.0, 0.0], 10.0, nan, false) {
            Err(EffectError::InvalidValue(name, _)) => assert_eq!(name, "attraction reduction"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(ParticleAffector::attraction([0.0, 0.0], std::f32::INFINITY, 0.0, false).is_err());
        assert!(ParticleAffector::gravity(nan, 10.0).is_err());
        assert!(ParticleAffector::gravity(90.0, nan).is_err());
        let gravity = ParticleAffector::gravity(90.0, 10.0).unwrap();
        assert!(gravity.clone().with_timing(nan, None).is_err());
        assert!(gravity.clone().with_timing(-1.0, None).is_err());
        assert!(gravity.clone().with_timing(0.0, Some(nan)).is_err());
        assert!(gravity.with_timing(0.0, Some(-5.0)).is_ok());
    }
}
