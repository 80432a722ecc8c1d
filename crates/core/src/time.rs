use chrono::{DateTime, Utc};

/// Time source used throughout the quiz engine.
///
/// Production code uses [`Clock::Default`], which reads the system clock;
/// tests use [`Clock::Fixed`] so session timestamps are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// System time.
    #[default]
    Default,
    /// Frozen at a specific instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock frozen at `instant`.
    #[must_use]
    pub fn fixed(instant: DateTime<Utc>) -> Self {
        Self::Fixed(instant)
    }

    /// Returns the current time according to this clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

/// Deterministic timestamp for tests (2024-10-27T03:33:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_730_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` frozen at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clock_tracks_system_time() {
        let clock = Clock::default();
        let before = Utc::now();
        let observed = clock.now();
        let after = Utc::now();
        assert!(before <= observed && observed <= after);
    }

    #[test]
    fn fixed_clock_always_returns_the_same_instant() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn fixed_now_matches_the_reference_timestamp() {
        assert_eq!(fixed_now().timestamp(), FIXED_TEST_TIMESTAMP);
    }
}
