//! vCalendar 1.0 root properties DAYLIGHT and TZ.

use super::{ParseContext, PropertyScribe, ScribeError};
use crate::rfc::ical::core::{DataType, Daylight, ICalVersion, Parameters, Value, names};
use crate::rfc::ical::parse::{parse_boolean, parse_datetime, parse_utc_offset};

const LEGACY_ONLY: [ICalVersion; 1] = [ICalVersion::V1_0];

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|f| !f.is_empty())
}

/// `DAYLIGHT:TRUE;offset;start;end;standard-name;daylight-name` or
/// `DAYLIGHT:FALSE`.
#[derive(Debug, Clone, Default)]
pub struct DaylightScribe;

impl PropertyScribe for DaylightScribe {
    fn name(&self) -> &str {
        names::DAYLIGHT
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        None
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        &LEGACY_ONLY
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let line = ctx.line;
        let mut fields = value.split(';');
        let enabled = parse_boolean(fields.next().unwrap_or_default(), line, 1)?;
        if !enabled {
            return Ok(Value::Daylight(Box::new(Daylight::disabled())));
        }

        let offset = non_empty(fields.next())
            .map(|f| parse_utc_offset(f, line, 1))
            .transpose()?;
        let start = non_empty(fields.next())
            .map(|f| parse_datetime(f, None, line, 1))
            .transpose()?;
        let end = non_empty(fields.next())
            .map(|f| parse_datetime(f, None, line, 1))
            .transpose()?;
        let standard_name = non_empty(fields.next()).map(ToString::to_string);
        let daylight_name = non_empty(fields.next()).map(ToString::to_string);

        if offset.is_none() {
            ctx.warn("DAYLIGHT:TRUE without an offset");
        }
        Ok(Value::Daylight(Box::new(Daylight {
            enabled,
            offset,
            start,
            end,
            standard_name,
            daylight_name,
        })))
    }
}

/// `TZ:-05:00`, the standard offset from UTC.
#[derive(Debug, Clone, Default)]
pub struct TzScribe;

impl PropertyScribe for TzScribe {
    fn name(&self) -> &str {
        names::TZ
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::UtcOffset)
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        &LEGACY_ONLY
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        Ok(Value::UtcOffset(parse_utc_offset(value, ctx.line, 1)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::build::render_value;
    use crate::rfc::ical::core::{Date, DateTime, UtcOffset};

    fn parse_daylight(value: &str) -> Result<Value, ScribeError> {
        let mut ctx = ParseContext::new(ICalVersion::V1_0, 1);
        DaylightScribe.parse_text(value, None, &mut Parameters::new(), &mut ctx)
    }

    #[test]
    fn daylight_true() {
        let value = parse_daylight("TRUE;-0400;20140309T020000Z;20141102T020000Z;EST;EDT").unwrap();
        let Value::Daylight(daylight) = &value else {
            panic!("expected a DAYLIGHT value");
        };
        assert!(daylight.enabled);
        assert_eq!(daylight.offset, Some(UtcOffset::from_seconds(-4 * 3600)));
        assert_eq!(
            daylight.start,
            Some(DateTime::utc(Date::new(2014, 3, 9), 2, 0, 0))
        );
        assert_eq!(daylight.standard_name.as_deref(), Some("EST"));
        assert_eq!(daylight.daylight_name.as_deref(), Some("EDT"));
        assert_eq!(
            render_value(&value, ICalVersion::V1_0),
            "TRUE;-04:00;20140309T020000Z;20141102T020000Z;EST;EDT"
        );
    }

    #[test]
    fn daylight_false() {
        assert_eq!(
            parse_daylight("FALSE").unwrap(),
            Value::Daylight(Box::new(Daylight::disabled()))
        );
    }

    #[test]
    fn daylight_garbage() {
        assert!(matches!(parse_daylight("sometimes"), Err(ScribeError::CannotParse(_))));
        assert!(matches!(
            parse_daylight("TRUE;-0400;not-a-date"),
            Err(ScribeError::CannotParse(_))
        ));
    }

    #[test]
    fn tz_offset() {
        let mut ctx = ParseContext::new(ICalVersion::V1_0, 1);
        let value = TzScribe
            .parse_text("-05:00", None, &mut Parameters::new(), &mut ctx)
            .unwrap();
        assert_eq!(value, Value::UtcOffset(UtcOffset::from_seconds(-5 * 3600)));
        assert_eq!(render_value(&value, ICalVersion::V1_0), "-05:00");
        assert_eq!(TzScribe.supported_versions(), [ICalVersion::V1_0]);
    }
}
