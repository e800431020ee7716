use chrono::{DateTime, Duration, Utc};

/// Where mistake timestamps come from.
///
/// `System` reads the wall clock; `Fixed` pins time so ledger ordering can be
/// asserted exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Clock pinned at `at`.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Timestamp for a mistake recorded now.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a pinned clock forward, e.g. between two misses of one question.
    /// The system clock is left alone.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Unix seconds of the pinned quiz timestamp (2024-09-01T08:00:00Z).
pub const QUIZ_EPOCH_SECS: i64 = 1_725_177_600;

/// The pinned quiz timestamp used by fixed clocks.
///
/// # Panics
///
/// Never in practice; `QUIZ_EPOCH_SECS` is well inside chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(QUIZ_EPOCH_SECS, 0).expect("quiz epoch is representable")
}

/// Clock pinned at [`fixed_now`].
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
        assert_eq!(clock.now(), fixed_now());
        clock.advance(Duration::seconds(30));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(30));
        assert!(clock.is_fixed());
    }

    #[test]
    fn fixed_now_is_the_quiz_epoch() {
        assert_eq!(fixed_now().to_rfc3339(), "2024-09-01T08:00:00+00:00");
        assert_eq!(fixed_clock(), Clock::Fixed(fixed_now()));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::default();
        clock.advance(Duration::days(1));
        assert!(!clock.is_fixed());
        assert_eq!(clock, Clock::System);
    }
}
