//! iCalendar DATE, DATE-TIME, TIME and UTC-OFFSET value types
//! (RFC 5545 §3.3.4, §3.3.5, §3.3.12, §3.3.14).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// UTC offset representation (e.g., +0530, -0800).
///
/// Stored as total seconds from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    /// Total seconds from UTC (positive = east, negative = west).
    seconds: i32,
}

impl UtcOffset {
    /// UTC offset (zero).
    pub const UTC: Self = Self { seconds: 0 };

    /// Creates a UTC offset from a sign and its magnitude.
    #[must_use]
    pub fn new(negative: bool, hours: u8, minutes: u8, seconds: u8) -> Self {
        let magnitude =
            i32::from(hours) * 3600 + i32::from(minutes) * 60 + i32::from(seconds);
        Self {
            seconds: if negative { -magnitude } else { magnitude },
        }
    }

    /// Creates a UTC offset from total seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    /// Returns the offset as total seconds from UTC.
    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }

    /// Returns this offset moved by a number of hours.
    #[must_use]
    pub const fn shifted_hours(self, hours: i32) -> Self {
        Self {
            seconds: self.seconds + hours * 3600,
        }
    }

    /// Renders the vCalendar 1.0 form, `±HH:MM`.
    #[must_use]
    pub fn to_legacy_string(self) -> String {
        let (sign, hours, minutes, _) = self.parts();
        format!("{sign}{hours:02}:{minutes:02}")
    }

    fn parts(self) -> (char, i32, i32, i32) {
        let sign = if self.seconds >= 0 { '+' } else { '-' };
        let abs = self.seconds.abs();
        (sign, abs / 3600, (abs % 3600) / 60, abs % 60)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, hours, minutes, seconds) = self.parts();
        write!(f, "{sign}{hours:02}{minutes:02}")?;
        if seconds != 0 {
            write!(f, "{seconds:02}")?;
        }
        Ok(())
    }
}

/// DATE value (RFC 5545 §3.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Converts to a chrono date; `None` if the calendar date does not exist.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Time value (RFC 5545 §3.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-60, allowing for leap seconds).
    pub second: u8,
    /// Whether this time is in UTC (indicated by 'Z' suffix).
    pub is_utc: bool,
}

impl Time {
    /// Creates a new time value.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, is_utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            is_utc,
        }
    }

    /// Creates a UTC time.
    #[must_use]
    pub const fn utc(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(hour, minute, second, true)
    }

    /// Creates a local (non-UTC) time.
    #[must_use]
    pub const fn local(hour: u8, minute: u8, second: u8) -> Self {
        Self::new(hour, minute, second, false)
    }

    /// Converts to a chrono time. A leap second maps to chrono's leap representation.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveTime> {
        if self.second == 60 {
            return NaiveTime::from_hms_milli_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                59,
                1_000,
            );
        }
        NaiveTime::from_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.is_utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Form of DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// Floating time - same wall-clock time in any timezone.
    Floating,
    /// UTC time, indicated by the 'Z' suffix.
    Utc,
    /// Local time qualified by the property's TZID parameter.
    Zoned {
        /// The timezone identifier, never resolved against a database.
        tzid: String,
    },
}

/// DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// The form of this DATE-TIME (floating, UTC, or zoned).
    pub form: DateTimeForm,
}

impl DateTime {
    /// Creates a floating DATE-TIME.
    #[must_use]
    pub const fn floating(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a UTC DATE-TIME.
    #[must_use]
    pub const fn utc(date: Date, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a zoned DATE-TIME.
    #[must_use]
    pub fn zoned(date: Date, hour: u8, minute: u8, second: u8, tzid: impl Into<String>) -> Self {
        Self {
            date,
            hour,
            minute,
            second,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// Returns whether this is a UTC time.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// Returns whether this is a floating time.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns the timezone ID if this is a zoned time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }

    /// Returns the time-of-day part.
    #[must_use]
    pub fn time(&self) -> Time {
        Time::new(self.hour, self.minute, self.second, self.is_utc())
    }

    /// Converts the wall-clock value to chrono, ignoring the form.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(self.date.to_naive()?.and_time(self.time().to_naive()?))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time())
    }
}
