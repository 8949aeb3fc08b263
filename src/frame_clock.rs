use super::error::EffectError;
use log::trace;
use std::time::{Duration, Instant};

// Measures real time between successive frames.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
}

impl FrameClock {
    pub fn new() -> FrameClock {
        FrameClock {
            last_tick: Instant::now(),
        }
    }

    // Time since the previous tick (or construction).
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta_t = now.duration_since(self.last_tick);
        self.last_tick = now;
        trace!("Frame time: {:?}", delta_t);
        delta_t
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new()
    }
}

// Paces a host loop to a target frame rate.
#[derive(Debug)]
pub struct FramePacer {
    iteration_start: Instant,
    pub iteration_duration: Duration,
}

impl FramePacer {
    pub fn new(fps: f64) -> Result<FramePacer, EffectError> {
        let frame_secs = 1.0 / fps;
        if !(fps > 0.0 && frame_secs.is_finite() && frame_secs < std::u32::MAX as f64) {
            return Err(EffectError::InvalidValue("fps", fps as f32));
        }
        Ok(FramePacer {
            iteration_start: Instant::now(),
            iteration_duration: Duration::from_secs_f64(frame_secs),
        })
    }

    // Sleeps out whatever is left of the current frame's budget.
    pub fn wait(&mut self) {
        let sleep_until = self.iteration_start + self.iteration_duration;
        let now = Instant::now();
        if now < sleep_until {
            std::thread::sleep(sleep_until - now);
        } else {
            log::debug!("Over time budget by: {:?}", now - sleep_until);
        }
        self.iteration_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_monotonic() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.tick() >= Duration::from_millis(2));
        clock.reset();
        assert!(clock.tick() < Duration::from_secs(1));
    }

    #[test]
    fn pacer_holds_frame_budget() {
        let mut pacer = FramePacer::new(200.0).unwrap();
        let start = Instant::now();
        pacer.wait();
        pacer.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn pacer_rejects_non_positive_rates() {
        assert!(FramePacer::new(0.0).is_err());
        assert!(FramePacer::new(-30.0).is_err());
        assert!(FramePacer::new(std::f64::NAN).is_err());
        assert!(FramePacer::new(1e-300).is_err());
        assert_eq!(
            FramePacer::new(4.0).unwrap().iteration_duration,
            Duration::from_millis(250)
        );
    }
}
