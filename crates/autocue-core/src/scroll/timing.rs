//! Pure calculations shared by the tick loop and the speed mutators.

use std::time::Duration;

/// Distance covered during one tick at `speed` units per second
#[inline]
pub fn tick_delta(speed: f64, tick: Duration) -> f64 {
    speed * tick.as_secs_f64()
}

/// Clamp a speed into `[min, max]`
///
/// Saturates at the bounds, so repeated steps past either end are no-ops.
#[inline]
pub fn clamp_speed(speed: f64, min: f64, max: f64) -> f64 {
    if speed < min {
        min
    } else if speed > max {
        max
    } else {
        speed
    }
}

/// Add `delta` (positive or negative) to `speed` and clamp the result
#[inline]
pub fn step_speed(speed: f64, delta: f64, min: f64, max: f64) -> f64 {
    clamp_speed(speed + delta, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_delta() {
        let delta = tick_delta(300.0, Duration::from_millis(33));
        assert!((delta - 9.9).abs() < 1e-9);
        assert_eq!(tick_delta(0.0, Duration::from_millis(33)), 0.0);
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(5.0, 20.0, 300.0), 20.0);
        assert_eq!(clamp_speed(500.0, 20.0, 300.0), 300.0);
        assert_eq!(clamp_speed(120.0, 20.0, 300.0), 120.0);
    }

    #[test]
    fn test_step_saturates() {
        assert_eq!(step_speed(300.0, 20.0, 20.0, 300.0), 300.0);
        assert_eq!(step_speed(20.0, -20.0, 20.0, 300.0), 20.0);
        assert_eq!(step_speed(290.0, 20.0, 20.0, 300.0), 300.0);
        assert_eq!(step_speed(40.0, -20.0, 20.0, 300.0), 20.0);
    }
}
