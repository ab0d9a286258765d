//! iCalendar PERIOD, GEO and legacy DAYLIGHT values and the [`Value`] enum
//! (RFC 5545 §3.3, vCalendar 1.0 §2.1.3).

use std::fmt;

use super::{
    Attendee, DataType, Date, DateTime, Duration, Organizer, RRule, Time, UtcOffset,
};

/// PERIOD value (RFC 5545 §3.3.9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// Explicit start and end times.
    Explicit { start: DateTime, end: DateTime },
    /// Start time and duration.
    Duration { start: DateTime, duration: Duration },
}

impl Period {
    /// Creates an explicit period from start to end.
    #[must_use]
    pub fn explicit(start: DateTime, end: DateTime) -> Self {
        Self::Explicit { start, end }
    }

    /// Creates a period from a start time and duration.
    #[must_use]
    pub fn from_duration(start: DateTime, duration: Duration) -> Self {
        Self::Duration { start, duration }
    }

    /// Returns the start of the period.
    #[must_use]
    pub fn start(&self) -> &DateTime {
        match self {
            Self::Explicit { start, .. } | Self::Duration { start, .. } => start,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit { start, end } => write!(f, "{start}/{end}"),
            Self::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// GEO value: latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

/// vCalendar 1.0 DAYLIGHT value.
///
/// `TRUE;-0400;20140309T020000Z;20141102T020000Z;EST;EDT` carries the
/// daylight offset, the start and end of daylight time and the standard
/// and daylight names. `FALSE` disables daylight time and carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Daylight {
    pub enabled: bool,
    pub offset: Option<UtcOffset>,
    pub start: Option<DateTime>,
    pub end: Option<DateTime>,
    pub standard_name: Option<String>,
    pub daylight_name: Option<String>,
}

impl Daylight {
    /// Daylight time not observed.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// BINARY value, already base64-decoded.
    Binary(Vec<u8>),
    Boolean(bool),
    CalAddress(String),
    Date(Date),
    DateTime(DateTime),
    DateList(Vec<Date>),
    DateTimeList(Vec<DateTime>),
    Duration(Duration),
    Float(f64),
    Integer(i32),
    Period(Period),
    PeriodList(Vec<Period>),
    Recur(Box<RRule>),
    /// TEXT value (unescaped).
    Text(String),
    TextList(Vec<String>),
    Time(Time),
    Uri(String),
    UtcOffset(UtcOffset),
    Geo(Geo),
    Attendee(Box<Attendee>),
    Organizer(Box<Organizer>),
    Daylight(Box<Daylight>),
    /// Raw text of a property with no scribe or one that failed to parse.
    /// Written back verbatim.
    Unknown(String),
}

impl Value {
    /// Returns the data type naturally carried by this value.
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Self::Binary(_) => DataType::Binary,
            Self::Boolean(_) => DataType::Boolean,
            Self::CalAddress(_) | Self::Attendee(_) | Self::Organizer(_) => DataType::CalAddress,
            Self::Date(_) | Self::DateList(_) => DataType::Date,
            Self::DateTime(_) | Self::DateTimeList(_) => DataType::DateTime,
            Self::Duration(_) => DataType::Duration,
            Self::Float(_) | Self::Geo(_) => DataType::Float,
            Self::Integer(_) => DataType::Integer,
            Self::Period(_) | Self::PeriodList(_) => DataType::Period,
            Self::Recur(_) => DataType::Recur,
            Self::Text(_) | Self::TextList(_) => DataType::Text,
            Self::Time(_) => DataType::Time,
            Self::Uri(_) => DataType::Uri,
            Self::UtcOffset(_) => DataType::UtcOffset,
            Self::Daylight(_) | Self::Unknown(_) => return None,
        })
    }

    /// Returns this value as text, if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_utc_offset(&self) -> Option<UtcOffset> {
        match self {
            Self::UtcOffset(o) => Some(*o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attendee(&self) -> Option<&Attendee> {
        match self {
            Self::Attendee(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the raw text of an unknown value.
    #[must_use]
    pub fn as_unknown(&self) -> Option<&str> {
        match self {
            Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns whether this is an unknown/unparsed value.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
