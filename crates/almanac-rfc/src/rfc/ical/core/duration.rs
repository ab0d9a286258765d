//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

/// Duration value (RFC 5545 §3.3.6).
///
/// Either week-based (`P2W`) or day/time-based (`P1DT2H30M`). Year and
/// month designators do not exist in iCalendar durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub negative: bool,
    /// Number of weeks (mutually exclusive with the other fields when rendered).
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    /// Creates a new zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self { weeks, ..Self::zero() }
    }

    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self { days, ..Self::zero() }
    }

    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self { hours, ..Self::zero() }
    }

    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self { minutes, ..Self::zero() }
    }

    #[must_use]
    pub const fn seconds(seconds: u32) -> Self {
        Self { seconds, ..Self::zero() }
    }

    /// Adds a time-of-day part to a day-based duration.
    #[must_use]
    pub const fn and_time(mut self, hours: u32, minutes: u32, seconds: u32) -> Self {
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
        self
    }

    /// Returns whether this is a week-based duration.
    #[must_use]
    pub const fn is_week_based(&self) -> bool {
        self.weeks > 0
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Returns the total duration as seconds.
    #[must_use]
    pub const fn as_seconds(&self) -> i64 {
        let total = (self.weeks as i64 * 7 * 24 * 3600)
            + (self.days as i64 * 24 * 3600)
            + (self.hours as i64 * 3600)
            + (self.minutes as i64 * 60)
            + (self.seconds as i64);
        if self.negative { -total } else { total }
    }

    /// Converts to a chrono `TimeDelta`.
    #[must_use]
    pub fn to_chrono(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::seconds(self.as_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.days == 0 {
            write!(f, "0D")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_display_weeks() {
        assert_eq!(Duration::weeks(2).to_string(), "P2W");
    }

    #[test]
    fn duration_display_days_time() {
        let d = Duration::days(1).and_time(2, 30, 0);
        assert_eq!(d.to_string(), "P1DT2H30M");
    }

    #[test]
    fn duration_display_negative_and_zero() {
        assert_eq!(Duration::minutes(15).negate().to_string(), "-PT15M");
        assert_eq!(Duration::zero().to_string(), "P0D");
    }

    #[test]
    fn duration_as_seconds() {
        let d = Duration::days(1).and_time(2, 30, 0);
        assert_eq!(d.as_seconds(), 24 * 3600 + 2 * 3600 + 30 * 60);
        assert_eq!(d.to_chrono().num_minutes(), 24 * 60 + 150);
        assert_eq!(Duration::minutes(15).negate().as_seconds(), -15 * 60);
    }
}
