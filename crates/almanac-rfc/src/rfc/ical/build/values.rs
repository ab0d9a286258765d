//! Value renderers, the inverse of the parsers in `parse::values`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::escape::escape_text;
use crate::rfc::ical::legacy::{legacy_dropped_parts, render_legacy_rrule};
use crate::rfc::ical::core::{Attendee, Daylight, Geo, ICalVersion, Organizer, UtcOffset, Value};

/// Renders a BOOLEAN: `TRUE`/`FALSE` in 2.0, `YES`/`NO` in 1.0.
#[must_use]
pub fn render_boolean(value: bool, version: ICalVersion) -> &'static str {
    match (value, version.is_legacy()) {
        (true, false) => "TRUE",
        (false, false) => "FALSE",
        (true, true) => "YES",
        (false, true) => "NO",
    }
}

/// Renders a UTC-OFFSET: `±HHMM[SS]` in 2.0, `±HH:MM` in 1.0.
#[must_use]
pub fn render_utc_offset(offset: UtcOffset, version: ICalVersion) -> String {
    if version.is_legacy() {
        offset.to_legacy_string()
    } else {
        offset.to_string()
    }
}

/// Renders a GEO value: `lat;lon` in 2.0, `lat,lon` in 1.0.
#[must_use]
pub fn render_geo(geo: Geo, version: ICalVersion) -> String {
    let separator = if version.is_legacy() { ',' } else { ';' };
    format!("{}{separator}{}", geo.latitude, geo.longitude)
}

/// Encodes a BINARY value as base64.
#[must_use]
pub fn render_binary(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Escapes each item and joins them with the separator.
#[must_use]
pub fn render_text_list<S: AsRef<str>>(items: &[S], separator: char) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(&escape_text(item.as_ref()));
    }
    out
}

/// Joins already-rendered values with the separator.
#[must_use]
pub fn render_list<T: ToString>(items: &[T], separator: char) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Separator between the values of a multi-valued property.
#[must_use]
pub const fn list_separator(version: ICalVersion) -> char {
    if version.is_legacy() { ';' } else { ',' }
}

/// Renders a value in its generic textual form for the target version.
///
/// Scribes fall back to this when the value needs nothing beyond its type's
/// own grammar. Unknown values come back verbatim.
#[must_use]
pub fn render_value(value: &Value, version: ICalVersion) -> String {
    let separator = list_separator(version);
    match value {
        Value::Binary(data) => render_binary(data),
        Value::Boolean(b) => render_boolean(*b, version).to_string(),
        Value::CalAddress(s) | Value::Uri(s) | Value::Unknown(s) => s.clone(),
        Value::Date(d) => d.to_string(),
        Value::DateTime(dt) => dt.to_string(),
        Value::DateList(dates) => render_list(dates, separator),
        Value::DateTimeList(datetimes) => render_list(datetimes, separator),
        Value::Duration(d) => d.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Period(p) => p.to_string(),
        Value::PeriodList(periods) => render_list(periods, separator),
        Value::Recur(rule) if version.is_legacy() => match render_legacy_rrule(rule) {
            Some(text) => {
                for part in legacy_dropped_parts(rule) {
                    tracing::warn!(part, "recurrence rule part has no 1.0 form and is left out");
                }
                text
            }
            None => rule.to_string(),
        },
        Value::Recur(rule) => rule.to_string(),
        Value::Text(s) => escape_text(s),
        Value::TextList(items) => render_text_list(items, separator),
        Value::Time(t) => t.to_string(),
        Value::UtcOffset(o) => render_utc_offset(*o, version),
        Value::Geo(g) => render_geo(*g, version),
        Value::Attendee(a) => render_attendee(a, version),
        Value::Organizer(o) => render_organizer(o, version),
        Value::Daylight(d) => render_daylight(d),
    }
}

/// Renders the address part of an ATTENDEE.
///
/// 2.0 writes a `mailto:` URI; 1.0 writes `Name <email>` or the bare email.
/// A non-mail URI is written as is in both.
#[must_use]
pub fn render_attendee(attendee: &Attendee, version: ICalVersion) -> String {
    render_address(
        attendee.email.as_deref(),
        attendee.uri.as_deref(),
        attendee.common_name.as_deref(),
        version,
    )
}

#[must_use]
pub fn render_organizer(organizer: &Organizer, version: ICalVersion) -> String {
    render_address(
        organizer.email.as_deref(),
        organizer.uri.as_deref(),
        organizer.common_name.as_deref(),
        version,
    )
}

fn render_address(
    email: Option<&str>,
    uri: Option<&str>,
    name: Option<&str>,
    version: ICalVersion,
) -> String {
    match (uri, email) {
        (Some(uri), _) => uri.to_string(),
        (None, Some(email)) if version.is_legacy() => match name {
            Some(name) => format!("{name} <{email}>"),
            None => email.to_string(),
        },
        (None, Some(email)) => format!("mailto:{email}"),
        (None, None) => String::new(),
    }
}

/// Renders a vCalendar DAYLIGHT value.
#[must_use]
pub fn render_daylight(daylight: &Daylight) -> String {
    if !daylight.enabled {
        return "FALSE".to_string();
    }
    let fields = [
        "TRUE".to_string(),
        daylight.offset.map(UtcOffset::to_legacy_string).unwrap_or_default(),
        daylight.start.as_ref().map(ToString::to_string).unwrap_or_default(),
        daylight.end.as_ref().map(ToString::to_string).unwrap_or_default(),
        daylight.standard_name.clone().unwrap_or_default(),
        daylight.daylight_name.clone().unwrap_or_default(),
    ];
    fields.join(";")
}
