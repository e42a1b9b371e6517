//! Timestamp utilities
//!
//! Show classification (past vs upcoming) is always relative to the moment a
//! query runs. Handlers read that moment from a [`Clock`] so tests can pin it.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Source of the query-time "now"
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant (tests, demos)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert stored unix seconds back to a UTC timestamp
///
/// Out-of-range values collapse to the unix epoch rather than failing a whole
/// listing.
pub fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_never_moves() {
        let instant = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let before = Utc::now();
        let reading = SystemClock.now();
        assert!(reading >= before);
    }

    #[test]
    fn test_from_unix_round_trip_seconds() {
        let instant = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(from_unix(instant.timestamp()), instant);
    }

    #[test]
    fn test_from_unix_out_of_range_falls_back_to_epoch() {
        assert_eq!(from_unix(i64::MAX), DateTime::<Utc>::default());
    }
}
