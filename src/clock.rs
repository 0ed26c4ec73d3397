/// Monotonic-ish millisecond timestamps from the host.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Start timestamp captured once setup completes. Never reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    start_ms: f64,
}

impl Clock {
    pub const fn started_at(start_ms: f64) -> Self {
        Self { start_ms }
    }

    pub fn start<T: TimeSource + ?Sized>(source: &T) -> Self {
        Self::started_at(source.now_ms())
    }

    /// Seconds since start, measured rather than accumulated so frame pacing
    /// does not drift.
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        ((now_ms - self.start_ms) / 1000.0) as f32
    }
}
