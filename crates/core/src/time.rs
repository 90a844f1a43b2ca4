use chrono::{DateTime, Duration, Utc};

/// Time source for session timestamps.
///
/// Sessions stamp `started_at`/`completed_at` through this so tests can pin time.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now() - fixed_now(), Duration::seconds(90));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::System;
        let before = clock.now();
        clock.advance(Duration::days(365));
        assert!(clock.now() - before < Duration::days(1));
    }
}
