//! iCalendar content lines and properties (RFC 5545 §3.1, §3.8).

use super::{DataType, Date, DateTime, Duration, Parameters, Value};

/// One unfolded line split into name, parameters and raw value.
///
/// Exists only while the reader processes the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    pub params: Parameters,
    /// Everything after the first unquoted colon, untouched.
    pub raw_value: String,
}

impl ContentLine {
    #[must_use]
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            raw_value: raw_value.into(),
        }
    }
}

/// A property attached to a component.
///
/// A property whose name has no scribe, or whose value could not be parsed,
/// holds [`Value::Unknown`] with the raw text and is written back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance, minus those a scribe consumed.
    pub params: Parameters,
    pub value: Value,
    /// Data type declared with `VALUE=` on a raw property.
    pub data_type: Option<DataType>,
}

impl Property {
    /// Creates a property with the given value and no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            value,
            data_type: None,
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::Text(value.into()))
    }

    /// Creates a property with an integer value.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, Value::Integer(value))
    }

    /// Creates a property with a datetime value.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: DateTime) -> Self {
        Self::new(name, Value::DateTime(dt))
    }

    /// Creates a property with a date value.
    #[must_use]
    pub fn date(name: impl Into<String>, d: Date) -> Self {
        Self::new(name, Value::Date(d))
    }

    /// Creates a property with a duration value.
    #[must_use]
    pub fn duration(name: impl Into<String>, d: Duration) -> Self {
        Self::new(name, Value::Duration(d))
    }

    /// Creates an untyped property that keeps its raw text.
    #[must_use]
    pub fn raw(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(name, Value::Unknown(raw.into()))
    }

    /// Adds a parameter value, builder style.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.put(name, value);
        self
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Returns whether this property keeps raw, unparsed text.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.value.is_unknown()
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the value as an integer if it is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        self.value.as_datetime()
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        self.value.as_date()
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<&Duration> {
        self.value.as_duration()
    }
}

/// Common property names as constants.
pub mod names {
    // Calendar properties
    pub const CALSCALE: &str = "CALSCALE";
    pub const METHOD: &str = "METHOD";
    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";

    // Descriptive properties
    pub const ATTACH: &str = "ATTACH";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const CLASS: &str = "CLASS";
    pub const COMMENT: &str = "COMMENT";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const GEO: &str = "GEO";
    pub const LOCATION: &str = "LOCATION";
    pub const PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
    pub const PRIORITY: &str = "PRIORITY";
    pub const RESOURCES: &str = "RESOURCES";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time properties
    pub const COMPLETED: &str = "COMPLETED";
    pub const DTEND: &str = "DTEND";
    pub const DUE: &str = "DUE";
    pub const DTSTART: &str = "DTSTART";
    pub const DURATION: &str = "DURATION";
    pub const FREEBUSY: &str = "FREEBUSY";
    pub const TRANSP: &str = "TRANSP";

    // Timezone properties
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const TZURL: &str = "TZURL";

    // Relationship properties
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const CONTACT: &str = "CONTACT";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const RELATED_TO: &str = "RELATED-TO";
    pub const URL: &str = "URL";
    pub const UID: &str = "UID";

    // Recurrence properties
    pub const EXDATE: &str = "EXDATE";
    pub const EXRULE: &str = "EXRULE";
    pub const RDATE: &str = "RDATE";
    pub const RRULE: &str = "RRULE";

    // Alarm properties
    pub const ACTION: &str = "ACTION";
    pub const REPEAT: &str = "REPEAT";
    pub const TRIGGER: &str = "TRIGGER";

    // Change management properties
    pub const CREATED: &str = "CREATED";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";

    // RFC 7986 extensions
    pub const COLOR: &str = "COLOR";
    pub const NAME: &str = "NAME";
    pub const SOURCE: &str = "SOURCE";

    // vCalendar 1.0
    pub const DAYLIGHT: &str = "DAYLIGHT";
    pub const TZ: &str = "TZ";
}
