//! iCalendar format versions (vCalendar 1.0, RFC 2445, RFC 5545).

use std::fmt;

use almanac_core::constants::{PRODUCT_ID, PRODUCT_ID_RFC2445, PRODUCT_ID_VCAL};

/// Format version of a document.
///
/// Both 2.0 variants share grammar and scribe behavior and are written as
/// `VERSION:2.0`; they only differ in the product identifier emitted by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ICalVersion {
    /// Legacy vCalendar 1.0.
    V1_0,
    /// iCalendar 2.0 as defined by RFC 2445.
    V2_0Deprecated,
    /// iCalendar 2.0 as defined by RFC 5545.
    #[default]
    V2_0,
}

impl ICalVersion {
    /// Every version, oldest first.
    pub const ALL: [Self; 3] = [Self::V1_0, Self::V2_0Deprecated, Self::V2_0];

    /// Returns the text written in the VERSION property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V2_0Deprecated | Self::V2_0 => "2.0",
        }
    }

    /// Parses a VERSION value or configuration string.
    ///
    /// A `min;max` pair (`1.0;2.0`) resolves to the highest listed version.
    /// `2.0-deprecated` selects the RFC 2445 flavour and is only meaningful in
    /// configuration.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.contains(';') {
            return s
                .split(';')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .filter_map(Self::parse_single)
                .max();
        }
        Self::parse_single(s.trim())
    }

    fn parse_single(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("2.0-deprecated") {
            return Some(Self::V2_0Deprecated);
        }
        match s {
            "1.0" => Some(Self::V1_0),
            "2.0" => Some(Self::V2_0),
            _ => None,
        }
    }

    /// Returns whether this is the legacy vCalendar dialect.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::V1_0)
    }

    /// Returns the PRODID written when a calendar carries none.
    #[must_use]
    pub const fn default_product_id(self) -> &'static str {
        match self {
            Self::V1_0 => PRODUCT_ID_VCAL,
            Self::V2_0Deprecated => PRODUCT_ID_RFC2445,
            Self::V2_0 => PRODUCT_ID,
        }
    }
}

impl fmt::Display for ICalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
