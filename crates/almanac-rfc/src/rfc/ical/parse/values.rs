//! Value type parsers for iCalendar (RFC 5545 §3.3, vCalendar 1.0 §2.1.3).
//!
//! Error sources are discarded (`map_err_ignore`): the reader reports value
//! failures by kind and position only.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers report failures by kind and position only"
)]

use std::borrow::Cow;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, Geo, Period, RRule, RRuleUntil, Time,
    UtcOffset, Weekday, WeekdayNum,
};

/// Drops the `-` and `:` separators of the ISO 8601 extended layout.
fn compact(s: &str) -> Cow<'_, str> {
    if s.contains(['-', ':']) {
        Cow::Owned(s.chars().filter(|c| !matches!(c, '-' | ':')).collect())
    } else {
        Cow::Borrowed(s)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714"). The extended form `1997-07-14` is
/// accepted as well.
///
/// ## Errors
/// Returns an error if the string is not an existing calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    let err = || ParseError::new(ParseErrorKind::InvalidDate, line, col);
    let s = compact(s.trim());
    if s.len() != 8 || !all_digits(&s) {
        return Err(err());
    }

    let year = s[0..4].parse::<u16>().map_err(|_| err())?;
    let month = s[4..6].parse::<u8>().map_err(|_| err())?;
    let day = s[6..8].parse::<u8>().map_err(|_| err())?;

    let date = Date::new(year, month, day);
    if date.to_naive().is_none() {
        return Err(err().with_context(format!("{s} is not a calendar date")));
    }
    Ok(date)
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let err = || ParseError::new(ParseErrorKind::InvalidTime, line, col);
    let s = compact(s.trim());
    let (time_str, is_utc) = match s.strip_suffix(['Z', 'z']) {
        Some(stripped) => (stripped, true),
        None => (&*s, false),
    };

    if time_str.len() != 6 || !all_digits(time_str) {
        return Err(err());
    }

    let hour = time_str[0..2].parse::<u8>().map_err(|_| err())?;
    let minute = time_str[2..4].parse::<u8>().map_err(|_| err())?;
    let second = time_str[4..6].parse::<u8>().map_err(|_| err())?;

    // 60 is a leap second
    if hour > 23 || minute > 59 || second > 60 {
        return Err(err());
    }

    Ok(Time::new(hour, minute, second, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// TZID comes from the property parameter, not from the value.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let s = s.trim();
    let t_pos = s
        .find(['T', 't'])
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(&s[..t_pos], line, col)?;
    let time = parse_time(&s[t_pos + 1..], line, col + t_pos + 1)?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        date,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Accepts `±HH`, `±HHMM`, `±HHMMSS` and the vCalendar `±HH:MM`.
///
/// ## Errors
/// Returns an error if the sign is missing or the fields are out of range.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let err = || ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col);
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => return Err(err()),
    };

    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if !all_digits(&digits) || !matches!(digits.len(), 2 | 4 | 6) {
        return Err(err());
    }

    let hours = digits[0..2].parse::<u8>().map_err(|_| err())?;
    let minutes = match digits.get(2..4) {
        Some(m) => m.parse::<u8>().map_err(|_| err())?,
        None => 0,
    };
    let seconds = match digits.get(4..6) {
        Some(sec) => sec.parse::<u8>().map_err(|_| err())?,
        None => 0,
    };
    if minutes > 59 || seconds > 59 {
        return Err(err());
    }

    Ok(UtcOffset::new(negative, hours, minutes, seconds))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]. A week count mixed with
/// other designators is folded into days.
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix(['P', 'p']).ok_or_else(err)?;

    let mut dur = Duration::zero();
    dur.negative = negative;
    let mut in_time = false;
    let mut seen = false;
    let mut number = String::new();

    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let c = c.to_ascii_uppercase();
        if c == 'T' {
            if in_time || !number.is_empty() {
                return Err(err());
            }
            in_time = true;
            continue;
        }

        let n = number.parse::<u32>().map_err(|_| err())?;
        number.clear();
        match (c, in_time) {
            ('W', false) => dur.weeks = n,
            ('D', false) => dur.days = n,
            ('H', true) => dur.hours = n,
            ('M', true) => dur.minutes = n,
            ('S', true) => dur.seconds = n,
            _ => return Err(err()),
        }
        seen = true;
    }

    if !seen || !number.is_empty() {
        return Err(err());
    }
    if dur.weeks > 0 && (dur.days > 0 || dur.hours > 0 || dur.minutes > 0 || dur.seconds > 0) {
        dur.days = dur.days.saturating_add(dur.weeks.saturating_mul(7));
        dur.weeks = 0;
    }
    Ok(dur)
}

/// Parses a PERIOD value (RFC 5545 §3.3.9).
///
/// Format: start"/"end or start"/"duration
///
/// ## Errors
/// Returns an error if the string is not a valid period format.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let (start_str, end_str) = s
        .split_once('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;
    let end_col = col + start_str.len() + 1;

    let start = parse_datetime(start_str, tzid, line, col)?;

    if end_str.starts_with(['P', 'p', '+', '-']) {
        let duration = parse_duration(end_str, line, end_col)?;
        Ok(Period::Duration { start, duration })
    } else {
        let end = parse_datetime(end_str, tzid, line, end_col)?;
        Ok(Period::Explicit { start, end })
    }
}

/// Parses a RECUR value (RFC 5545 §3.3.10).
///
/// Parts this model does not know are kept in [`RRule::x_rules`]. A
/// malformed part is skipped and described in `warnings`; the rest of the
/// rule survives.
///
/// ## Errors
/// Returns an error if no part of the value could be used.
pub fn parse_rrule(
    s: &str,
    line: usize,
    col: usize,
    warnings: &mut Vec<String>,
) -> ParseResult<RRule> {
    let mut rrule = RRule::default();
    let mut recognized = 0usize;

    for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            warnings.push(format!("ignoring malformed recurrence rule part \"{part}\""));
            continue;
        };
        match parse_rrule_part(&mut rrule, key.trim(), value.trim(), line, col) {
            Ok(()) => recognized += 1,
            Err(e) => warnings.push(format!("ignoring recurrence rule part \"{part}\": {}", e.kind)),
        }
    }

    if recognized == 0 {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
            .with_context(format!("no usable rule parts in \"{s}\"")));
    }
    Ok(rrule)
}

/// Parses a single RRULE key-value pair.
fn parse_rrule_part(
    rrule: &mut RRule,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<()> {
    let err = || ParseError::new(ParseErrorKind::InvalidRRule, line, col);
    match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            rrule.freq = Some(
                Frequency::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?,
            );
        }
        "INTERVAL" => rrule.interval = Some(value.parse().map_err(|_| err())?),
        "COUNT" => rrule.count = Some(value.parse().map_err(|_| err())?),
        "UNTIL" => rrule.until = Some(parse_until(value, line, col)?),
        "WKST" => {
            rrule.wkst = Some(
                Weekday::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?,
            );
        }
        "BYSECOND" => rrule.by_second = parse_list(value, line, col)?,
        "BYMINUTE" => rrule.by_minute = parse_list(value, line, col)?,
        "BYHOUR" => rrule.by_hour = parse_list(value, line, col)?,
        "BYDAY" => {
            rrule.by_day = value
                .split(',')
                .map(|v| parse_weekday_num(v, line, col))
                .collect::<ParseResult<_>>()?;
        }
        "BYMONTHDAY" => rrule.by_monthday = parse_list(value, line, col)?,
        "BYYEARDAY" => rrule.by_yearday = parse_list(value, line, col)?,
        "BYWEEKNO" => rrule.by_weekno = parse_list(value, line, col)?,
        "BYMONTH" => rrule.by_month = parse_list(value, line, col)?,
        "BYSETPOS" => rrule.by_setpos = parse_list(value, line, col)?,
        other => rrule.x_rules.push((other.to_string(), value.to_string())),
    }
    Ok(())
}

/// Parses an UNTIL boundary: DATE-TIME when it has a time part, else DATE.
///
/// ## Errors
/// Returns an error if the value is neither.
pub fn parse_until(value: &str, line: usize, col: usize) -> ParseResult<RRuleUntil> {
    if value.contains(['T', 't']) {
        Ok(RRuleUntil::DateTime(parse_datetime(value, None, line, col)?))
    } else {
        Ok(RRuleUntil::Date(parse_date(value, line, col)?))
    }
}

/// Parses a comma-separated list of numbers.
fn parse_list<T: std::str::FromStr>(s: &str, line: usize, col: usize) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))
        })
        .collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
///
/// ## Errors
/// Returns an error for an unknown weekday or a bad ordinal.
pub fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    let s = s.trim();
    let split = s.len().checked_sub(2);
    let (Some(ordinal_str), Some(weekday_str)) = (
        split.and_then(|i| s.get(..i)),
        split.and_then(|i| s.get(i..)),
    ) else {
        return Err(ParseError::new(ParseErrorKind::InvalidWeekday, line, col));
    };

    let weekday = Weekday::parse(weekday_str)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;

    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        let n = ordinal_str
            .parse::<i8>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?;
        if n == 0 || !(-53..=53).contains(&n) {
            return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col));
        }
        Some(n)
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N. Any other escaped character stands for
/// itself, and a trailing lone backslash is kept.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

/// Splits a list value on every separator that is not backslash-escaped.
///
/// The pieces are returned still escaped. An empty value yields no pieces.
#[must_use]
pub fn split_list(s: &str, separator: char) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            pieces.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    pieces.push(&s[start..]);
    pieces
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// `YES`/`NO` of vCalendar are accepted in every version.
///
/// ## Errors
/// Returns an error for any other token.
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.trim().to_ascii_uppercase().as_str() {
        "TRUE" | "YES" => Ok(true),
        "FALSE" | "NO" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col)),
    }
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.trim()
        .parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}

/// Parses a FLOAT value (RFC 5545 §3.3.7).
///
/// ## Errors
/// Returns an error if the string is not a valid floating-point number.
pub fn parse_float(s: &str, line: usize, col: usize) -> ParseResult<f64> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloat, line, col))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::new(ParseErrorKind::InvalidFloat, line, col))
    }
}

/// Parses a GEO value: `lat;lon` (2.0) or `lat,lon` (1.0).
///
/// ## Errors
/// Returns an error if either coordinate is missing or not a number.
pub fn parse_geo(s: &str, line: usize, col: usize) -> ParseResult<Geo> {
    let (lat, lon) = s
        .split_once(';')
        .or_else(|| s.split_once(','))
        .ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidValue, line, col)
                .with_context("expected latitude and longitude")
        })?;
    Ok(Geo {
        latitude: parse_float(lat, line, col)?,
        longitude: parse_float(lon, line, col + lat.len() + 1)?,
    })
}

/// Decodes a base64 BINARY value (RFC 5545 §3.3.1). Whitespace is ignored.
///
/// ## Errors
/// Returns an error if the text is not valid base64.
pub fn parse_binary(s: &str, line: usize, col: usize) -> ParseResult<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidBinary, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_basic() {
        let date = parse_date("20260123", 1, 1).unwrap();
        assert_eq!(date, Date::new(2026, 1, 23));
        assert_eq!(parse_date("2026-01-23", 1, 1).unwrap(), date);
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("2026012", 1, 1).is_err());
        assert!(parse_date("20261301", 1, 1).is_err());
        assert!(parse_date("20260230", 1, 1).is_err());
        assert!(parse_date("2026０123", 1, 1).is_err());
    }

    #[test]
    fn parse_time_utc_and_local() {
        let time = parse_time("120000Z", 1, 1).unwrap();
        assert_eq!(time, Time::utc(12, 0, 0));
        let time = parse_time("133000", 1, 1).unwrap();
        assert_eq!(time, Time::local(13, 30, 0));
        assert!(parse_time("250000", 1, 1).is_err());
    }

    #[test]
    fn parse_datetime_forms() {
        let dt = parse_datetime("20260123T120000Z", None, 1, 1).unwrap();
        assert!(dt.is_utc());
        assert_eq!(dt.date.year, 2026);

        let dt = parse_datetime("20260123T120000", None, 1, 1).unwrap();
        assert!(dt.is_floating());

        let dt = parse_datetime("20260123T120000", Some("America/New_York"), 1, 1).unwrap();
        assert_eq!(dt.tzid(), Some("America/New_York"));

        // UTC marker wins over a TZID parameter
        let dt = parse_datetime("20260123T120000Z", Some("America/New_York"), 1, 1).unwrap();
        assert!(dt.is_utc());
    }

    #[test]
    fn parse_datetime_extended_layout() {
        let dt = parse_datetime("2026-01-23T12:30:00Z", None, 1, 1).unwrap();
        assert_eq!(dt, DateTime::utc(Date::new(2026, 1, 23), 12, 30, 0));
    }

    #[test]
    fn parse_utc_offset_layouts() {
        assert_eq!(parse_utc_offset("+0530", 1, 1).unwrap().as_seconds(), 19_800);
        assert_eq!(parse_utc_offset("-0800", 1, 1).unwrap().as_seconds(), -28_800);
        assert_eq!(parse_utc_offset("-05:00", 1, 1).unwrap().as_seconds(), -18_000);
        assert_eq!(parse_utc_offset("+01", 1, 1).unwrap().as_seconds(), 3_600);
        assert_eq!(parse_utc_offset("-003015", 1, 1).unwrap().as_seconds(), -1_815);
        assert!(parse_utc_offset("0500", 1, 1).is_err());
        assert!(parse_utc_offset("+0575", 1, 1).is_err());
    }

    #[test]
    fn parse_duration_weeks() {
        assert_eq!(parse_duration("P2W", 1, 1).unwrap(), Duration::weeks(2));
    }

    #[test]
    fn parse_duration_days_time() {
        let dur = parse_duration("P1DT2H30M", 1, 1).unwrap();
        assert_eq!(dur, Duration::days(1).and_time(2, 30, 0));
        assert_eq!(parse_duration("PT0S", 1, 1).unwrap().as_seconds(), 0);
    }

    #[test]
    fn parse_duration_negative() {
        let dur = parse_duration("-PT15M", 1, 1).unwrap();
        assert!(dur.negative);
        assert_eq!(dur.minutes, 15);
    }

    #[test]
    fn parse_duration_invalid() {
        assert!(parse_duration("P", 1, 1).is_err());
        assert!(parse_duration("1D", 1, 1).is_err());
        assert!(parse_duration("PT5", 1, 1).is_err());
        assert!(parse_duration("P5H", 1, 1).is_err());
    }

    #[test]
    fn parse_rrule_basic() {
        let mut warnings = Vec::new();
        let rrule = parse_rrule("FREQ=DAILY;COUNT=10", 1, 1, &mut warnings).unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Daily));
        assert_eq!(rrule.count, Some(10));
        assert!(warnings.is_empty());
    }

    #[test]
    fn parse_rrule_byday_ordinals() {
        let mut warnings = Vec::new();
        let rrule = parse_rrule("FREQ=MONTHLY;BYDAY=-1FR,+2MO,TU", 1, 1, &mut warnings).unwrap();
        assert_eq!(
            rrule.by_day,
            [
                WeekdayNum::nth(-1, Weekday::Friday),
                WeekdayNum::nth(2, Weekday::Monday),
                WeekdayNum::every(Weekday::Tuesday),
            ]
        );
    }

    #[test]
    fn parse_rrule_keeps_unknown_parts_and_skips_broken_ones() {
        let mut warnings = Vec::new();
        let rrule = parse_rrule(
            "FREQ=WEEKLY;X-NAME=value;BYDAY=XX;INTERVAL=2;garbage",
            1,
            1,
            &mut warnings,
        )
        .unwrap();
        assert_eq!(rrule.freq, Some(Frequency::Weekly));
        assert_eq!(rrule.interval, Some(2));
        assert!(rrule.by_day.is_empty());
        assert_eq!(rrule.x_rules, [("X-NAME".to_string(), "value".to_string())]);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn parse_rrule_keeps_count_and_until_together() {
        let mut warnings = Vec::new();
        let rrule = parse_rrule("FREQ=DAILY;COUNT=10;UNTIL=20260131", 1, 1, &mut warnings).unwrap();
        assert_eq!(rrule.count, Some(10));
        assert_eq!(rrule.until, Some(RRuleUntil::Date(Date::new(2026, 1, 31))));
    }

    #[test]
    fn parse_rrule_nothing_usable() {
        let mut warnings = Vec::new();
        assert!(parse_rrule("nonsense", 1, 1, &mut warnings).is_err());
    }

    #[test]
    fn unescape_text_basic() {
        assert_eq!(unescape_text("hello\\, world"), "hello, world");
        assert_eq!(unescape_text("line1\\nline2\\Nline3"), "line1\nline2\nline3");
        assert_eq!(unescape_text("back\\\\slash\\;"), "back\\slash;");
    }

    #[test]
    fn unescape_text_lenient() {
        assert_eq!(unescape_text("a\\xb"), "axb");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn split_list_respects_escapes() {
        assert_eq!(split_list("a,b\\,c,d", ','), ["a", "b\\,c", "d"]);
        assert_eq!(split_list("a\\\\,b", ','), ["a\\\\", "b"]);
        assert_eq!(split_list("one;two", ';'), ["one", "two"]);
        assert!(split_list("", ',').is_empty());
    }

    #[test]
    fn parse_boolean_both_vocabularies() {
        assert!(parse_boolean("TRUE", 1, 1).unwrap());
        assert!(parse_boolean("yes", 1, 1).unwrap());
        assert!(!parse_boolean("No", 1, 1).unwrap());
        assert!(parse_boolean("maybe", 1, 1).is_err());
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(parse_integer("-42", 1, 1).unwrap(), -42);
        assert!(parse_integer("4.2", 1, 1).is_err());
        assert!((parse_float("37.386013", 1, 1).unwrap() - 37.386_013).abs() < f64::EPSILON);
        assert!(parse_float("NaN", 1, 1).is_err());
    }

    #[test]
    fn parse_geo_both_separators() {
        let geo = parse_geo("37.5;-122.25", 1, 1).unwrap();
        assert!((geo.latitude - 37.5).abs() < f64::EPSILON);
        assert!((geo.longitude + 122.25).abs() < f64::EPSILON);
        let geo = parse_geo("37.5,-122.25", 1, 1).unwrap();
        assert!((geo.longitude + 122.25).abs() < f64::EPSILON);
        assert!(parse_geo("37.5", 1, 1).is_err());
    }

    #[test]
    fn parse_binary_base64() {
        assert_eq!(parse_binary("aGVs\r\n bG8=", 1, 1).unwrap(), b"hello");
        assert!(parse_binary("***", 1, 1).is_err());
    }

    #[test]
    fn parse_period_explicit() {
        let period = parse_period("20260123T090000Z/20260123T170000Z", None, 1, 1).unwrap();
        let Period::Explicit { start, end } = period else {
            panic!("expected explicit period");
        };
        assert_eq!(start.hour, 9);
        assert_eq!(end.hour, 17);
    }

    #[test]
    fn parse_period_duration() {
        let period = parse_period("20260123T090000Z/PT8H", None, 1, 1).unwrap();
        let Period::Duration { start, duration } = period else {
            panic!("expected duration period");
        };
        assert_eq!(start.hour, 9);
        assert_eq!(duration.hours, 8);
    }
}
