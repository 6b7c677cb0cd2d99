use std::time::{Duration, Instant};

/// Foreground view of a run's progress, driven by posted fractions.
#[derive(Debug, Clone)]
pub struct Progress {
    pub fraction: f64,
    pub message: String,
    pub started_at: Instant,
    pub is_complete: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            fraction: 0.0,
            message: String::new(),
            started_at: Instant::now(),
            is_complete: false,
        }
    }
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.fraction = 0.0;
        self.message.clear();
        self.started_at = Instant::now();
        self.is_complete = false;
    }

    /// Sets the completion ratio, clamped to `[0, 1]`.
    pub fn set_fraction(&mut self, fraction: f64) {
        self.fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.is_complete = self.fraction >= 1.0;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub fn eta(&self) -> Option<Duration> {
        if self.fraction <= 0.0 {
            return None;
        }
        if self.is_complete {
            return Some(Duration::ZERO);
        }

        let elapsed = self.elapsed().as_secs_f64();
        let remaining = elapsed * (1.0 - self.fraction) / self.fraction;
        Some(Duration::from_secs_f64(remaining))
    }
}
