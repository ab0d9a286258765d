//! iCalendar serialization (RFC 5545, vCalendar 1.0).
//!
//! This module provides the writing half of the engine:
//! - Escape: Text and parameter value escaping
//! - Fold: Content line folding at 75 octets
//! - Values: Per-version value rendering
//! - Writer: Document serialization through the scribe index

mod escape;
mod fold;
mod values;
mod writer;

pub use escape::{escape_param_value, escape_text};
pub use fold::{MAX_LINE_OCTETS, fold_line};
pub use values::{
    list_separator, render_attendee, render_binary, render_boolean, render_daylight, render_geo,
    render_list, render_organizer, render_text_list, render_utc_offset, render_value,
};
pub use writer::{ICalWriter, write_to_string};
