//! Scribes: per-name parse and write behavior.
//!
//! A [`PropertyScribe`] turns the raw text of one property name into a
//! typed [`Value`] and back, for every version it supports. A
//! [`ComponentScribe`] creates components by name, post-processes them when
//! they close, and contributes validation warnings. Both are looked up by
//! name in a [`ScribeIndex`], which callers may extend or override.

mod attendee;
mod component;
mod datetime;
mod legacy;
mod registry;
mod simple;

use thiserror::Error;

pub use attendee::{AttendeeScribe, OrganizerScribe};
pub use component::{
    BasicComponentScribe, CalendarScribe, RawComponentScribe, TimezoneScribe,
};
pub use datetime::{
    DateListScribe, DateOrDateTimeScribe, DurationScribe, FreeBusyScribe, RecurScribe,
    TriggerScribe, UtcOffsetScribe,
};
pub use legacy::{DaylightScribe, TzScribe};
pub use registry::ScribeIndex;
pub use simple::{
    AttachScribe, GeoScribe, IntegerScribe, TextListScribe, TextScribe, UriScribe, VersionScribe,
};

use crate::rfc::ical::build::render_value;
use crate::rfc::ical::core::{
    Component, DataType, ICalVersion, Parameters, Property, Value, Warning,
};
use crate::rfc::ical::parse::ParseError;

/// Versions for names vCalendar 1.0 has no equivalent for.
pub const MODERN_ONLY: &[ICalVersion] = &[ICalVersion::V2_0Deprecated, ICalVersion::V2_0];

/// Why a scribe refused a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScribeError {
    /// The property is unusable and is dropped.
    #[error("property skipped: {0}")]
    Skip(String),

    /// The value does not follow its grammar; the property is kept raw.
    #[error("cannot parse value: {0}")]
    CannotParse(String),
}

impl From<ParseError> for ScribeError {
    fn from(err: ParseError) -> Self {
        Self::CannotParse(err.to_string())
    }
}

/// State handed to [`PropertyScribe::parse_text`] for one property.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub version: ICalVersion,
    /// Whether caret escapes were decoded in parameter values.
    pub caret_encoding: bool,
    /// Line the property starts on (1-based).
    pub line: usize,
    /// Non-fatal problems; the property is still kept.
    pub warnings: Vec<String>,
    /// Extra properties produced from the same line, inserted right after it.
    pub siblings: Vec<Property>,
}

impl ParseContext {
    #[must_use]
    pub fn new(version: ICalVersion, line: usize) -> Self {
        Self {
            version,
            caret_encoding: true,
            line,
            warnings: Vec::new(),
            siblings: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// State handed to [`PropertyScribe::write_text`].
#[derive(Debug, Clone, Copy)]
pub struct WriteContext {
    pub version: ICalVersion,
}

/// Parse and write behavior for one property name.
pub trait PropertyScribe: Send + Sync {
    /// Property name, uppercase.
    fn name(&self) -> &str;

    /// Data type assumed when no `VALUE` parameter is given.
    fn default_data_type(&self, version: ICalVersion) -> Option<DataType>;

    fn supported_versions(&self) -> &[ICalVersion] {
        &ICalVersion::ALL
    }

    /// Parses the raw value text.
    ///
    /// Parameters the scribe folds into the value are removed from `params`.
    ///
    /// ## Errors
    /// [`ScribeError::Skip`] drops the property, [`ScribeError::CannotParse`]
    /// keeps it as raw text.
    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError>;

    /// Renders the value text for the target version.
    fn write_text(&self, property: &Property, ctx: &WriteContext) -> String {
        render_value(&property.value, ctx.version)
    }

    /// Parameters to write, given the value and target version.
    fn prepare_parameters(&self, property: &Property, _version: ICalVersion) -> Parameters {
        property.params.clone()
    }

    /// Data type of the value as it will be written.
    fn data_type(&self, property: &Property, _version: ICalVersion) -> Option<DataType> {
        property.value.data_type()
    }

    /// Adds warnings about the property's value.
    fn validate(&self, _property: &Property, _version: ICalVersion, _warnings: &mut Vec<Warning>) {}
}

/// Creation, completion and validation behavior for one component name.
pub trait ComponentScribe: Send + Sync {
    /// Component name, uppercase.
    fn name(&self) -> &str;

    fn new_instance(&self) -> Component {
        Component::custom(self.name())
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        &ICalVersion::ALL
    }

    /// Called once the component is closed, with all its properties and
    /// children in place.
    fn finish(&self, _component: &mut Component, _version: ICalVersion, _warnings: &mut Vec<Warning>) {
    }

    /// Adds warnings about the component's own properties.
    fn validate(&self, _component: &Component, _version: ICalVersion, _warnings: &mut Vec<Warning>) {
    }
}

/// Parses a value according to a declared data type.
///
/// Scribes use this when `VALUE=` names a type they have no special
/// handling for. Unknown types keep the raw text.
///
/// ## Errors
/// Returns [`ScribeError::CannotParse`] when the text does not match the type.
pub fn parse_as(
    value: &str,
    data_type: &DataType,
    params: &Parameters,
    ctx: &mut ParseContext,
) -> Result<Value, ScribeError> {
    use crate::rfc::ical::parse::{
        parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
        parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, unescape_text,
    };

    let line = ctx.line;
    Ok(match data_type {
        DataType::Binary => Value::Binary(parse_binary(value, line, 1)?),
        DataType::Boolean => Value::Boolean(parse_boolean(value, line, 1)?),
        DataType::CalAddress => Value::CalAddress(value.to_string()),
        DataType::Date => Value::Date(parse_date(value, line, 1)?),
        DataType::DateTime => Value::DateTime(parse_datetime(value, params.tzid(), line, 1)?),
        DataType::Duration => Value::Duration(parse_duration(value, line, 1)?),
        DataType::Float => Value::Float(parse_float(value, line, 1)?),
        DataType::Integer => Value::Integer(parse_integer(value, line, 1)?),
        DataType::Period => Value::Period(parse_period(value, params.tzid(), line, 1)?),
        DataType::Text => Value::Text(unescape_text(value)),
        DataType::Time => Value::Time(parse_time(value, line, 1)?),
        DataType::Uri | DataType::Url | DataType::ContentId => Value::Uri(value.to_string()),
        DataType::UtcOffset => Value::UtcOffset(parse_utc_offset(value, line, 1)?),
        DataType::Recur => {
            Value::Recur(Box::new(parse_rrule(value, line, 1, &mut ctx.warnings)?))
        }
        DataType::Other(_) => Value::Unknown(value.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, DateTime};
    use crate::rfc::ical::parse::ParseErrorKind;

    #[test]
    fn parse_error_becomes_cannot_parse() {
        let err: ScribeError = ParseError::new(ParseErrorKind::InvalidDate, 3, 1).into();
        assert!(matches!(err, ScribeError::CannotParse(msg) if msg.contains("line 3")));
    }

    #[test]
    fn parse_as_declared_types() {
        let mut ctx = ParseContext::new(ICalVersion::V2_0, 1);
        let mut params = Parameters::new();
        params.put("TZID", "Europe/Paris");

        assert_eq!(
            parse_as("20200101", &DataType::Date, &params, &mut ctx),
            Ok(Value::Date(Date::new(2020, 1, 1)))
        );
        assert_eq!(
            parse_as("20200101T100000", &DataType::DateTime, &params, &mut ctx),
            Ok(Value::DateTime(DateTime::zoned(
                Date::new(2020, 1, 1),
                10,
                0,
                0,
                "Europe/Paris"
            )))
        );
        assert_eq!(
            parse_as("a\\,b", &DataType::Text, &params, &mut ctx),
            Ok(Value::Text("a,b".to_string()))
        );
        assert_eq!(
            parse_as("whatever", &DataType::Other("X-THING".into()), &params, &mut ctx),
            Ok(Value::Unknown("whatever".to_string()))
        );
        assert!(matches!(
            parse_as("nope", &DataType::Integer, &params, &mut ctx),
            Err(ScribeError::CannotParse(_))
        ));
    }
}
