//! Open-hours and accessibility checks for landmarks.
//!
//! All checks use a single canonical time zone supplied through a [`Clock`],
//! so a request served at 23:30 local time is never judged against another
//! zone's weekday.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::model::{DayHours, Landmark};

/// Canonical zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// What to do when a landmark's weekly schedule does not have seven entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedHoursPolicy {
    /// Treat the landmark as open.
    FailOpen,
}

/// Policy applied by [`is_open_at`].
pub const MALFORMED_HOURS_POLICY: MalformedHoursPolicy = MalformedHoursPolicy::FailOpen;

/// Source of "now" for availability checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Wall clock in a fixed zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Tz>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}

/// Whether a weekly schedule is open at `at`.
///
/// Day 0 is Sunday. Bounds are inclusive on both ends.
pub fn is_open_at<Z: TimeZone>(hours: &[DayHours], at: &DateTime<Z>) -> bool {
    if hours.len() != 7 {
        tracing::debug!(
            entries = hours.len(),
            policy = ?MALFORMED_HOURS_POLICY,
            "schedule does not have seven entries"
        );
        return match MALFORMED_HOURS_POLICY {
            MalformedHoursPolicy::FailOpen => true,
        };
    }

    let day = at.weekday().num_days_from_sunday() as usize;
    let minute = (at.hour() * 60 + at.minute()) as u16;
    let today = hours[day];

    today.is_open && minute >= today.open && minute <= today.close
}

/// Whether a landmark is usable at `now`: not flagged inaccessible and open.
pub fn is_available<Z: TimeZone>(landmark: &Landmark, now: &DateTime<Z>) -> bool {
    if landmark.accessible == Some(false) {
        return false;
    }
    is_open_at(&landmark.hours, now)
}
