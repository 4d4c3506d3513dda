/// Time primitives
///
/// Timestamps are integral milliseconds on a caller-supplied monotonic clock.
/// Nothing in the workspace reads the wall clock; hosts feed `Time` values in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub u64); // milliseconds

impl Time {
    pub const ZERO: Time = Time(0);

    pub fn from_millis(ms: u64) -> Self {
        Time(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn after(self, ms: u64) -> Self {
        Time(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Time) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, duration_ms: u64) -> Self {
        Self {
            start,
            end: start.after(duration_ms),
        }
    }

    pub fn duration(&self) -> u64 {
        self.end.since(self.start)
    }

    pub fn contains(&self, t: Time) -> bool {
        t >= self.start && t < self.end
    }

    /// Fraction of the span covered at `t`, clamped to `[0, 1]`.
    ///
    /// A zero-length span is complete as soon as it starts.
    pub fn progress(&self, t: Time) -> f64 {
        let d = self.duration();
        if d == 0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        (t.since(self.start) as f64 / d as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn after_and_since_saturate() {
        assert_eq!(Time(10).after(5), Time(15));
        assert_eq!(Time(u64::MAX).after(1), Time(u64::MAX));
        assert_eq!(Time(10).since(Time(4)), 6);
        assert_eq!(Time(4).since(Time(10)), 0);
    }

    #[test]
    fn span_progress_is_clamped() {
        let span = TimeSpan::starting_at(Time(100), 250);
        assert_eq!(span.progress(Time(50)), 0.0);
        assert_eq!(span.progress(Time(225)), 0.5);
        assert_eq!(span.progress(Time(1000)), 1.0);
        assert!(span.contains(Time(349)));
        assert!(!span.contains(Time(350)));
    }

    #[test]
    fn zero_length_span_completes_immediately() {
        let span = TimeSpan::starting_at(Time(7), 0);
        assert_eq!(span.progress(Time(6)), 0.0);
        assert_eq!(span.progress(Time(7)), 1.0);
    }
}
