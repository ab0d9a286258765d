//! iCalendar parsing (RFC 5545, RFC 2445, vCalendar 1.0).
//!
//! This module provides parsers for iCalendar content:
//! - Line reader: physical lines to unfolded logical lines
//! - Lexer: content line and parameter parsing
//! - Values: value type parsing (DATE, DATE-TIME, DURATION, etc.)
//! - Reader: the streaming document builder driven by the scribe index

mod error;
mod lexer;
mod line_reader;
mod reader;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{decode_caret, parse_content_line};
pub use line_reader::{LineReader, unfold};
pub use reader::{ICalReader, parse_all};
pub use values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_geo, parse_integer, parse_period, parse_rrule, parse_time, parse_until,
    parse_utc_offset, parse_weekday_num, split_list, unescape_text,
};
