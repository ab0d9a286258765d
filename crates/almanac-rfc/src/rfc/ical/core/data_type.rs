//! iCalendar value data types (RFC 5545 §3.3, vCalendar 1.0 §2.1.3).

use std::fmt;

/// Data type declared by a `VALUE` parameter or implied by a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Binary,
    Boolean,
    CalAddress,
    /// vCalendar 1.0 `CONTENT-ID` (also accepted as `CID`).
    ContentId,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    /// vCalendar 1.0 `URL`.
    Url,
    UtcOffset,
    /// Any other declared type; keeps its name for round-tripping.
    Other(String),
}

impl DataType {
    /// Returns the name used in a `VALUE` parameter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::CalAddress => "CAL-ADDRESS",
            Self::ContentId => "CONTENT-ID",
            Self::Date => "DATE",
            Self::DateTime => "DATE-TIME",
            Self::Duration => "DURATION",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::Period => "PERIOD",
            Self::Recur => "RECUR",
            Self::Text => "TEXT",
            Self::Time => "TIME",
            Self::Uri => "URI",
            Self::Url => "URL",
            Self::UtcOffset => "UTC-OFFSET",
            Self::Other(name) => name,
        }
    }

    /// Parses a `VALUE` parameter (case-insensitive). Unknown names are kept.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "CONTENT-ID" | "CID" => Self::ContentId,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "URL" => Self::Url,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Returns whether the value is a URI-like reference in either dialect.
    #[must_use]
    pub const fn is_uri_like(&self) -> bool {
        matches!(self, Self::Uri | Self::Url | Self::ContentId)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
