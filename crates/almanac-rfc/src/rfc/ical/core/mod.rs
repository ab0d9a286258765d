//! iCalendar core models (RFC 5545, vCalendar 1.0).
//!
//! This module defines the data structures produced by the reader and
//! consumed by the writer:
//! - Round-trip fidelity: unknown properties and components keep their raw text
//! - Version awareness: [`ICalVersion`] drives every dialect difference
//! - Type safety: values are parsed into typed variants where a scribe exists

mod attendee;
mod component;
mod data_type;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;
mod version;
mod warning;

pub use attendee::{Attendee, Organizer, ParticipationLevel, ParticipationStatus};
pub use component::{Component, ComponentKind, Document, ICalendar};
pub use data_type::DataType;
pub use datetime::{Date, DateTime, DateTimeForm, Time, UtcOffset};
pub use duration::Duration;
pub use parameter::{Parameter, Parameters, names as param_names};
pub use property::{ContentLine, Property, names};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::{Daylight, Geo, Period, Value};
pub use version::ICalVersion;
pub use warning::Warning;
