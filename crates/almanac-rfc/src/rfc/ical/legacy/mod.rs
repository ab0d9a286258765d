//! vCalendar 1.0 conversions that are more than a different spelling.
//!
//! - `recur`: the positional recurrence grammar
//! - `timezone`: root-level `DAYLIGHT`/`TZ` properties versus `VTIMEZONE`

mod recur;
mod timezone;

pub use recur::{legacy_dropped_parts, parse_legacy_rrule, render_legacy_rrule};
pub use timezone::{LEGACY_TZID, flatten_timezone, synthesize_timezone};
