//! Scribes for date, time, duration and recurrence properties.

use super::{MODERN_ONLY, ParseContext, PropertyScribe, ScribeError, parse_as};
use crate::rfc::ical::build::list_separator;
use crate::rfc::ical::core::{
    DataType, DateTime, ICalVersion, Parameters, Period, Property, Value, Warning, param_names,
};
use crate::rfc::ical::legacy::parse_legacy_rrule;
use crate::rfc::ical::parse::{
    parse_date, parse_datetime, parse_duration, parse_period, parse_rrule, parse_utc_offset,
    split_list,
};

fn looks_like_date(value: &str) -> bool {
    let value = value.trim();
    !value.contains(['T', 't']) && (value.len() == 8 || value.len() == 10)
}

/// Writes the TZID of a zoned date-time and drops a stale one otherwise.
fn tzid_parameters(property: &Property, first: Option<&DateTime>, version: ICalVersion) -> Parameters {
    let mut params = property.params.clone();
    match first.and_then(DateTime::tzid) {
        Some(tzid) if !version.is_legacy() => params.replace(param_names::TZID, tzid),
        _ => {
            params.remove(param_names::TZID);
        }
    }
    params
}

/// A single DATE or DATE-TIME, such as DTSTART.
///
/// A value without a time part is read as a DATE even without `VALUE=DATE`.
#[derive(Debug, Clone)]
pub struct DateOrDateTimeScribe {
    name: String,
}

impl DateOrDateTimeScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for DateOrDateTimeScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::DateTime)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        match data_type {
            Some(DataType::Date) => Ok(Value::Date(parse_date(value.trim(), ctx.line, 1)?)),
            None | Some(DataType::DateTime) if looks_like_date(value) => {
                Ok(Value::Date(parse_date(value.trim(), ctx.line, 1)?))
            }
            None | Some(DataType::DateTime) => Ok(Value::DateTime(parse_datetime(
                value,
                params.tzid(),
                ctx.line,
                1,
            )?)),
            Some(other) => parse_as(value, other, params, ctx),
        }
    }

    fn prepare_parameters(&self, property: &Property, version: ICalVersion) -> Parameters {
        match &property.value {
            Value::DateTime(dt) => tzid_parameters(property, Some(dt), version),
            Value::Date(_) => tzid_parameters(property, None, version),
            _ => property.params.clone(),
        }
    }
}

/// EXDATE and RDATE: a list of dates, date-times or (RDATE) periods.
#[derive(Debug, Clone)]
pub struct DateListScribe {
    name: String,
}

impl DateListScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for DateListScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::DateTime)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let items = split_list(value, list_separator(ctx.version));
        let line = ctx.line;
        let tzid = params.tzid();

        let as_dates = match data_type {
            Some(DataType::Date) => true,
            None | Some(DataType::DateTime) => items.first().is_some_and(|v| looks_like_date(v)),
            _ => false,
        };
        let as_periods = match data_type {
            Some(DataType::Period) => true,
            None | Some(DataType::DateTime) => items.iter().any(|v| v.contains('/')),
            _ => false,
        };

        if as_dates {
            let dates = items
                .iter()
                .map(|v| parse_date(v.trim(), line, 1))
                .collect::<Result<_, _>>()?;
            return Ok(Value::DateList(dates));
        }
        if as_periods {
            let periods = items
                .iter()
                .map(|v| parse_period(v.trim(), tzid, line, 1))
                .collect::<Result<_, _>>()?;
            return Ok(Value::PeriodList(periods));
        }
        match data_type {
            None | Some(DataType::DateTime) => {
                let datetimes = items
                    .iter()
                    .map(|v| parse_datetime(v, tzid, line, 1))
                    .collect::<Result<_, _>>()?;
                Ok(Value::DateTimeList(datetimes))
            }
            Some(other) => parse_as(value, other, params, ctx),
        }
    }

    fn prepare_parameters(&self, property: &Property, version: ICalVersion) -> Parameters {
        match &property.value {
            Value::DateTimeList(list) => tzid_parameters(property, list.first(), version),
            Value::PeriodList(list) => {
                tzid_parameters(property, list.first().map(Period::start), version)
            }
            _ => property.params.clone(),
        }
    }
}

/// FREEBUSY: a list of periods.
#[derive(Debug, Clone, Default)]
pub struct FreeBusyScribe;

impl PropertyScribe for FreeBusyScribe {
    fn name(&self) -> &str {
        "FREEBUSY"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Period)
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        MODERN_ONLY
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let periods = split_list(value, ',')
            .into_iter()
            .map(|v| parse_period(v.trim(), params.tzid(), ctx.line, 1))
            .collect::<Result<_, _>>()?;
        Ok(Value::PeriodList(periods))
    }
}

/// A DURATION property.
#[derive(Debug, Clone, Default)]
pub struct DurationScribe;

impl PropertyScribe for DurationScribe {
    fn name(&self) -> &str {
        "DURATION"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Duration)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        match data_type {
            None | Some(DataType::Duration) => {
                Ok(Value::Duration(parse_duration(value.trim(), ctx.line, 1)?))
            }
            Some(other) => parse_as(value, other, params, ctx),
        }
    }
}

/// TRIGGER: a duration relative to the parent, or an absolute UTC time.
#[derive(Debug, Clone, Default)]
pub struct TriggerScribe;

impl PropertyScribe for TriggerScribe {
    fn name(&self) -> &str {
        "TRIGGER"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Duration)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let value = value.trim();
        match data_type {
            Some(DataType::DateTime) => Ok(Value::DateTime(parse_datetime(
                value,
                params.tzid(),
                ctx.line,
                1,
            )?)),
            None | Some(DataType::Duration) if !value.starts_with(['P', 'p', '+', '-']) => {
                Ok(Value::DateTime(parse_datetime(value, params.tzid(), ctx.line, 1)?))
            }
            None | Some(DataType::Duration) => {
                Ok(Value::Duration(parse_duration(value, ctx.line, 1)?))
            }
            Some(other) => parse_as(value, other, params, ctx),
        }
    }
}

/// TZOFFSETFROM and TZOFFSETTO.
#[derive(Debug, Clone)]
pub struct UtcOffsetScribe {
    name: String,
}

impl UtcOffsetScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for UtcOffsetScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::UtcOffset)
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        MODERN_ONLY
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        Ok(Value::UtcOffset(parse_utc_offset(value.trim(), ctx.line, 1)?))
    }
}

/// RRULE and EXRULE.
///
/// Under 1.0 the value uses the positional grammar unless it contains `=`.
/// A 1.0 value with several rule groups yields one property per group.
#[derive(Debug, Clone)]
pub struct RecurScribe {
    name: String,
}

impl RecurScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for RecurScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Recur)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let value = value.trim();
        if !ctx.version.is_legacy() || value.contains('=') {
            let rule = parse_rrule(value, ctx.line, 1, &mut ctx.warnings)?;
            return Ok(Value::Recur(Box::new(rule)));
        }

        let mut rules = parse_legacy_rrule(value, ctx.line, &mut ctx.warnings)?.into_iter();
        let Some(first) = rules.next() else {
            return Err(ScribeError::CannotParse(format!("no recurrence in \"{value}\"")));
        };
        for rule in rules {
            let mut sibling = Property::new(&self.name, Value::Recur(Box::new(rule)));
            sibling.params = params.clone();
            ctx.siblings.push(sibling);
        }
        Ok(Value::Recur(Box::new(first)))
    }

    fn validate(&self, property: &Property, _version: ICalVersion, warnings: &mut Vec<Warning>) {
        let Some(rule) = property.value.as_recur() else {
            return;
        };
        if rule.freq.is_none() {
            warnings.push(Warning::new("recurrence rule has no FREQ").with_property(&self.name));
        }
        if rule.count.is_some() && rule.until.is_some() {
            warnings.push(
                Warning::new("COUNT and UNTIL must not both be set").with_property(&self.name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::ical::core::{Date, Duration, Frequency, RRule, RRuleUntil};

    fn parse(
        scribe: &dyn PropertyScribe,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        scribe.parse_text(value, data_type, params, ctx)
    }

    fn ctx(version: ICalVersion) -> ParseContext {
        ParseContext::new(version, 1)
    }

    #[test]
    fn date_or_datetime_detects_dates() {
        let scribe = DateOrDateTimeScribe::new("DTSTART");
        let mut params = Parameters::new();
        let value = parse(&scribe, "20200101", None, &mut params, &mut ctx(ICalVersion::V2_0));
        assert_eq!(value, Ok(Value::Date(Date::new(2020, 1, 1))));

        let value = parse(
            &scribe,
            "20200101",
            Some(&DataType::DateTime),
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert_eq!(value, Ok(Value::Date(Date::new(2020, 1, 1))));

        let value = parse(
            &scribe,
            "20200101T090000",
            Some(&DataType::Date),
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert!(matches!(value, Err(ScribeError::CannotParse(_))));
    }

    #[test]
    fn zoned_datetime_keeps_tzid() {
        let scribe = DateOrDateTimeScribe::new("DTSTART");
        let mut params = Parameters::new();
        params.put("TZID", "America/New_York");
        let value = parse(
            &scribe,
            "20200101T090000",
            None,
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        )
        .unwrap();
        assert_eq!(
            value.as_datetime().and_then(DateTime::tzid),
            Some("America/New_York")
        );

        let property = Property::new("DTSTART", value);
        let written = scribe.prepare_parameters(&property, ICalVersion::V2_0);
        assert_eq!(written.tzid(), Some("America/New_York"));
        let legacy = scribe.prepare_parameters(&property, ICalVersion::V1_0);
        assert!(legacy.tzid().is_none());
    }

    #[test]
    fn utc_datetime_drops_stale_tzid() {
        let scribe = DateOrDateTimeScribe::new("DTSTART");
        let property = Property::datetime("DTSTART", DateTime::utc(Date::new(2020, 1, 1), 9, 0, 0))
            .with_param("TZID", "Europe/Paris");
        assert!(scribe
            .prepare_parameters(&property, ICalVersion::V2_0)
            .tzid()
            .is_none());
    }

    #[test]
    fn date_list_variants() {
        let scribe = DateListScribe::new("EXDATE");
        let mut params = Parameters::new();
        let dates = parse(
            &scribe,
            "20200101,20200102",
            None,
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert_eq!(
            dates,
            Ok(Value::DateList(vec![Date::new(2020, 1, 1), Date::new(2020, 1, 2)]))
        );

        let datetimes = parse(
            &scribe,
            "20200101T100000Z;20200102T100000Z",
            None,
            &mut params,
            &mut ctx(ICalVersion::V1_0),
        );
        assert!(matches!(datetimes, Ok(Value::DateTimeList(list)) if list.len() == 2));

        let periods = parse(
            &DateListScribe::new("RDATE"),
            "20200101T100000Z/PT1H",
            None,
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert_eq!(
            periods,
            Ok(Value::PeriodList(vec![Period::from_duration(
                DateTime::utc(Date::new(2020, 1, 1), 10, 0, 0),
                Duration::hours(1)
            )]))
        );
    }

    #[test]
    fn trigger_duration_or_datetime() {
        let mut params = Parameters::new();
        let relative = parse(
            &TriggerScribe,
            "-PT15M",
            None,
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert_eq!(relative, Ok(Value::Duration(Duration::minutes(15).negate())));

        let absolute = parse(
            &TriggerScribe,
            "20200101T100000Z",
            Some(&DataType::DateTime),
            &mut params,
            &mut ctx(ICalVersion::V2_0),
        );
        assert!(matches!(absolute, Ok(Value::DateTime(_))));
    }

    #[test]
    fn rrule_2_0_keeps_count_and_until() {
        let scribe = RecurScribe::new("RRULE");
        let mut context = ctx(ICalVersion::V2_0);
        let value = parse(
            &scribe,
            "FREQ=DAILY;COUNT=3;UNTIL=20200101",
            None,
            &mut Parameters::new(),
            &mut context,
        )
        .unwrap();
        let rule = value.as_recur().unwrap();
        assert_eq!(rule.count, Some(3));
        assert_eq!(rule.until, Some(RRuleUntil::Date(Date::new(2020, 1, 1))));

        let mut warnings = Vec::new();
        scribe.validate(&Property::new("RRULE", value), ICalVersion::V2_0, &mut warnings);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn legacy_rrule_groups_become_siblings() {
        let scribe = RecurScribe::new("RRULE");
        let mut context = ctx(ICalVersion::V1_0);
        let value = parse(
            &scribe,
            "MD1 1 #1 D2 20000101T000000Z M3",
            None,
            &mut Parameters::new(),
            &mut context,
        )
        .unwrap();

        assert_eq!(
            value.as_recur().map(|r| r.freq),
            Some(Some(Frequency::Monthly))
        );
        assert_eq!(context.siblings.len(), 2);
        assert_eq!(context.siblings[0].name, "RRULE");
        assert_eq!(
            context.siblings[1].value.as_recur(),
            Some(&RRule::new(Frequency::Minutely).with_interval(3).with_count(2))
        );
    }

    #[test]
    fn legacy_version_accepts_2_0_grammar() {
        let scribe = RecurScribe::new("RRULE");
        let mut context = ctx(ICalVersion::V1_0);
        let value = parse(
            &scribe,
            "FREQ=WEEKLY",
            None,
            &mut Parameters::new(),
            &mut context,
        );
        assert_eq!(value, Ok(Value::Recur(Box::new(RRule::weekly()))));
    }

    #[test]
    fn offsets() {
        let scribe = UtcOffsetScribe::new("TZOFFSETTO");
        let value = parse(
            &scribe,
            "-0500",
            None,
            &mut Parameters::new(),
            &mut ctx(ICalVersion::V2_0),
        );
        assert!(matches!(value, Ok(Value::UtcOffset(o)) if o.as_seconds() == -5 * 3600));
    }
}
