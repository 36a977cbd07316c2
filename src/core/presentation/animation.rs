use std::time::{Duration, Instant};

/// Length of an arc sweep.
pub const ARC_ANIMATION: Duration = Duration::from_millis(500);

/// Cubic ease-out on `t` in [0,1].
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One running sweep of an arc indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcAnimation {
    from: i32,
    to: i32,
    started: Instant,
}

impl ArcAnimation {
    pub fn new(from: i32, to: i32, started: Instant) -> Self {
        Self { from, to, started }
    }

    fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / ARC_ANIMATION.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> i32 {
        let eased = ease_out(self.progress(now));
        let delta = (self.to - self.from) as f64;
        self.from + (delta * eased).round() as i32
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
