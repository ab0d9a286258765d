//! Calendar user values for ATTENDEE and ORGANIZER (RFC 5545 §3.8.4.1,
//! §3.8.4.3, vCalendar 1.0 §2.1.4).

use std::fmt;

/// How strongly an attendee is expected to take part.
///
/// Expressed as `ROLE` in 2.0 and `EXPECT` in 1.0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParticipationLevel {
    Required,
    Optional,
    /// For your information only.
    Fyi,
    /// A 1.0 `EXPECT` value outside the standard vocabulary.
    Other(String),
}

impl ParticipationLevel {
    /// Parses a 2.0 `ROLE` value. Roles that are not levels yield `None`.
    #[must_use]
    pub fn from_role(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "REQ-PARTICIPANT" => Some(Self::Required),
            "OPT-PARTICIPANT" => Some(Self::Optional),
            "NON-PARTICIPANT" => Some(Self::Fyi),
            _ => None,
        }
    }

    /// Parses a 1.0 `EXPECT` value; unknown values are kept.
    #[must_use]
    pub fn from_expect(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "REQUIRE" => Self::Required,
            "REQUEST" => Self::Optional,
            "FYI" => Self::Fyi,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Returns the 2.0 `ROLE` value, if the level has one.
    #[must_use]
    pub fn as_role(&self) -> Option<&str> {
        match self {
            Self::Required => Some("REQ-PARTICIPANT"),
            Self::Optional => Some("OPT-PARTICIPANT"),
            Self::Fyi => Some("NON-PARTICIPANT"),
            Self::Other(_) => None,
        }
    }

    /// Returns the 1.0 `EXPECT` value.
    #[must_use]
    pub fn as_expect(&self) -> &str {
        match self {
            Self::Required => "REQUIRE",
            Self::Optional => "REQUEST",
            Self::Fyi => "FYI",
            Self::Other(s) => s,
        }
    }
}

/// Participation status, `PARTSTAT` in 2.0 and `STATUS` in 1.0.
///
/// Stored in 2.0 spelling; `NEEDS ACTION` from 1.0 becomes `NEEDS-ACTION`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipationStatus(String);

impl ParticipationStatus {
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into().to_ascii_uppercase())
    }

    #[must_use]
    pub fn from_legacy(s: &str) -> Self {
        if s.eq_ignore_ascii_case("NEEDS ACTION") {
            Self::new("NEEDS-ACTION")
        } else {
            Self::new(s)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn to_legacy(&self) -> &str {
        if self.0 == "NEEDS-ACTION" {
            "NEEDS ACTION"
        } else {
            &self.0
        }
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ATTENDEE value with its parameters lifted into fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attendee {
    pub common_name: Option<String>,
    pub email: Option<String>,
    /// Non-mailto address; takes precedence over `email` when written.
    pub uri: Option<String>,
    /// Role other than a participation level (CHAIR, ATTENDEE, ...).
    pub role: Option<String>,
    pub level: Option<ParticipationLevel>,
    pub status: Option<ParticipationStatus>,
    pub rsvp: Option<bool>,
}

impl Attendee {
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }
}

/// An ORGANIZER value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organizer {
    pub common_name: Option<String>,
    pub email: Option<String>,
    pub uri: Option<String>,
}
