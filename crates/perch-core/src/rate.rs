//! Key-repeat acceleration for overlay adjustments.

use std::time::{Duration, Instant};

/// Gap below which consecutive adjustments count as one burst.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(50);

/// Scales adjustment deltas up while a key is held down.
///
/// Each call made within `window` of the previous one raises the
/// multiplier by one; a longer gap resets it to 1.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window: Duration,
    magnitude: i32,
    last_adjust: Option<Instant>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            magnitude: 1,
            last_adjust: None,
        }
    }

    /// Records an adjustment at `now` and returns the accelerated delta.
    pub fn step(&mut self, base_delta: i32, now: Instant) -> i32 {
        let rapid = self
            .last_adjust
            .is_some_and(|last| now.saturating_duration_since(last) < self.window);
        self.magnitude = if rapid {
            self.magnitude.saturating_add(1)
        } else {
            1
        };
        self.last_adjust = Some(now);
        base_delta.saturating_mul(self.magnitude)
    }

    /// Current multiplier.
    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_unscaled() {
        // Arrange
        let mut limiter = RateLimiter::default();

        // Act
        let delta = limiter.step(3, Instant::now());

        // Assert
        assert_eq!(delta, 3);
        assert_eq!(limiter.magnitude(), 1);
    }

    #[test]
    fn rapid_steps_accelerate() {
        // Arrange
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();

        // Act
        let a = limiter.step(1, t0);
        let b = limiter.step(1, t0 + Duration::from_millis(20));
        let c = limiter.step(-1, t0 + Duration::from_millis(40));

        // Assert
        assert_eq!((a, b, c), (1, 2, -3));
        assert_eq!(limiter.magnitude(), 3);
    }

    #[test]
    fn gap_at_window_resets() {
        // Arrange
        let mut limiter = RateLimiter::default();
        let t0 = Instant::now();
        limiter.step(1, t0);
        limiter.step(1, t0 + Duration::from_millis(10));

        // Act
        let delta = limiter.step(4, t0 + Duration::from_millis(60));

        // Assert
        assert_eq!(delta, 4);
        assert_eq!(limiter.magnitude(), 1);
    }
}
