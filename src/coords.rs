use cgmath::Vector2;

// Kinematics (velocity, acceleration, gravity angles) live in a y-up world
// frame. Positions are stored in the host's y-down screen frame. Every
// conversion between the two goes through this module.
pub const SCREEN_Y_SIGN: f32 = -1.0;

// Displacement in screen space produced by moving at `velocity` for `dt`.
pub fn world_to_screen_delta(velocity: Vector2<f32>, dt: f32) -> Vector2<f32> {
    Vector2::new(velocity.x * dt, SCREEN_Y_SIGN * velocity.y * dt)
}

// Unnormalized world-space vector pointing from `from` to `to`, both given in
// screen space.
pub fn screen_to_world_direction(from: Vector2<f32>, to: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(to.x - from.x, SCREEN_Y_SIGN * (to.y - from.y))
}

// `magnitude` along `angle` radians, counter-clockwise from +x in world space.
pub fn polar(magnitude: f32, angle: f32) -> Vector2<f32> {
    Vector2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upward_velocity_moves_up_the_screen() {
        let delta = world_to_screen_delta(Vector2::new(2.0, 10.0), 0.5);
        assert_eq!(delta, Vector2::new(1.0, -5.0));
    }

    #[test]
    fn target_above_points_up_in_world() {
        let dir = screen_to_world_direction(Vector2::new(5.0, 100.0), Vector2::new(5.0, 40.0));
        assert_eq!(dir, Vector2::new(0.0, 60.0));
    }

    #[test]
    fn polar_axes() {
        let right = polar(3.0, 0.0);
        assert_eq!(right, Vector2::new(3.0, 0.0));
        let up = polar(2.0, std::f32::consts::FRAC_PI_2);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y - 2.0).abs() < 1e-6);
    }
}
