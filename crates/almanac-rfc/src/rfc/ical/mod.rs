//! iCalendar implementation (RFC 5545, RFC 2445, vCalendar 1.0).
//!
//! This module reads and writes calendar data in both the 2.0 iCalendar
//! dialect and the legacy 1.0 vCalendar dialect.
//!
//! ## Overview
//!
//! Every property and component name is handled by a scribe looked up in a
//! [`ScribeIndex`]. Names without a scribe are kept as raw text and written
//! back untouched. Malformed data never aborts a read: it is reported as a
//! [`Warning`] on the [`Document`].
//!
//! ## Usage
//!
//! ### Reading
//!
//! ```rust
//! use almanac_rfc::rfc::ical::parse_all;
//!
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Example//EN\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:1\r\n\
//! SUMMARY:Team meeting\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let documents = parse_all(input).unwrap();
//! assert_eq!(documents[0].calendar.events()[0].summary(), Some("Team meeting"));
//! assert!(documents[0].warnings.is_empty());
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use almanac_rfc::rfc::ical::{
//!     Component, ICalVersion, ICalendar, Property, WriterOptions, write_to_string,
//! };
//!
//! let mut calendar = ICalendar::new("-//Example//EN");
//! let mut event = Component::event();
//! event.add_property(Property::text("SUMMARY", "Lunch"));
//! calendar.add_event(event);
//!
//! let output = write_to_string(&calendar, &WriterOptions::default().with_version(ICalVersion::V1_0));
//! assert!(output.starts_with("BEGIN:VCALENDAR\r\nVERSION:1.0\r\n"));
//! assert!(output.contains("SUMMARY:Lunch\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`ICalendar`, `Component`, `Property`, `Value`, etc.)
//! - [`parse`] - Line reader, lexer, value parsers and the document reader
//! - [`build`] - Escaping, folding, value rendering and the document writer
//! - [`scribe`] - Per-name parse/write behavior and the scribe index
//! - [`legacy`] - vCalendar 1.0 recurrence and time zone translation
//! - [`validate`] - Structural validation

pub mod build;
pub mod core;
pub mod legacy;
pub mod options;
pub mod parse;
pub mod scribe;
pub mod validate;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use build::{ICalWriter, write_to_string};
pub use core::{
    Attendee, Component, ComponentKind, DataType, Document, ICalVersion, ICalendar, Parameters,
    Property, RRule, Value, Warning,
};
pub use options::{ReaderOptions, WriterOptions};
pub use parse::{ICalReader, parse_all};
pub use scribe::{ComponentScribe, PropertyScribe, ScribeError, ScribeIndex};
pub use validate::validate;
