//! vCalendar 1.0 time zone properties.
//!
//! 1.0 describes the calendar's zone with root-level `TZ` and `DAYLIGHT`
//! properties. The reader replaces them with one synthetic `VTIMEZONE`;
//! the 1.0 writer goes the other way.

use crate::rfc::ical::core::{
    Component, ComponentKind, DateTime, Daylight, Property, UtcOffset, Value, names,
};

/// TZID given to the synthetic time zone.
pub const LEGACY_TZID: &str = "TZ1";

/// Replaces the root's `DAYLIGHT` and `TZ` properties with a `VTIMEZONE`.
///
/// Properties that failed to parse are left where they are. Nothing
/// happens when the root has neither property.
pub fn synthesize_timezone(root: &mut Component) {
    let daylights: Vec<Daylight> = take_typed(root, names::DAYLIGHT, |value| match value {
        Value::Daylight(daylight) => Some(daylight.as_ref().clone()),
        _ => None,
    });
    let offsets: Vec<UtcOffset> = take_typed(root, names::TZ, |value| value.as_utc_offset());

    if daylights.is_empty() && offsets.is_empty() {
        return;
    }
    tracing::trace!(
        daylight = daylights.len(),
        tz = offsets.len(),
        "building VTIMEZONE from vCal properties"
    );

    let standard_offset = offsets.first().copied();
    let mut timezone = Component::timezone();
    timezone.add_property(Property::text(names::TZID, LEGACY_TZID));

    let mut observed = false;
    for daylight in daylights.iter().filter(|d| d.enabled) {
        let Some(offset) = daylight.offset else {
            continue;
        };
        observed = true;
        let standard_to = standard_offset.unwrap_or_else(|| offset.shifted_hours(-1));

        timezone.add_child(observance(
            ComponentKind::Daylight,
            daylight.start.clone(),
            offset.shifted_hours(-1),
            offset,
            daylight.daylight_name.clone(),
        ));
        timezone.add_child(observance(
            ComponentKind::Standard,
            daylight.end.clone(),
            offset,
            standard_to,
            daylight.standard_name.clone(),
        ));
    }

    if !observed && let Some(offset) = standard_offset {
        timezone.add_child(observance(ComponentKind::Standard, None, offset, offset, None));
    }

    root.add_child(timezone);
}

/// Rebuilds `DAYLIGHT` and `TZ` properties from a `VTIMEZONE`.
///
/// Each `DAYLIGHT` observance is paired with the `STANDARD` observance at
/// the same position. A zone without observances yields `DAYLIGHT:FALSE`.
#[must_use]
pub fn flatten_timezone(timezone: &Component) -> Vec<Property> {
    let daylight_parts = timezone.children_of_kind(ComponentKind::Daylight);
    let standard_parts = timezone.children_of_kind(ComponentKind::Standard);
    let mut properties = Vec::new();

    let standard_offset = standard_parts.first().and_then(|s| offset_of(s, names::TZOFFSETTO));
    if let Some(offset) = standard_offset {
        properties.push(Property::new(names::TZ, Value::UtcOffset(offset)));
    }

    for (i, daylight) in daylight_parts.iter().enumerate() {
        let standard = standard_parts.get(i);
        let value = Daylight {
            enabled: true,
            offset: offset_of(daylight, names::TZOFFSETTO),
            start: daylight.get_property(names::DTSTART).and_then(Property::as_datetime).cloned(),
            end: standard
                .and_then(|s| s.get_property(names::DTSTART))
                .and_then(Property::as_datetime)
                .cloned(),
            standard_name: standard.and_then(|s| text_of(s, names::TZNAME)),
            daylight_name: text_of(daylight, names::TZNAME),
        };
        properties.push(Property::new(names::DAYLIGHT, Value::Daylight(Box::new(value))));
    }

    if daylight_parts.is_empty() && standard_parts.is_empty() {
        properties.push(Property::new(
            names::DAYLIGHT,
            Value::Daylight(Box::new(Daylight::disabled())),
        ));
    }
    properties
}

fn take_typed<T>(root: &mut Component, name: &str, pick: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    let mut taken = Vec::new();
    for property in root.remove_properties(name) {
        match pick(&property.value) {
            Some(value) => taken.push(value),
            None => root.add_property(property),
        }
    }
    taken
}

fn observance(
    kind: ComponentKind,
    start: Option<DateTime>,
    from: UtcOffset,
    to: UtcOffset,
    name: Option<String>,
) -> Component {
    let mut component = Component::new(kind);
    if let Some(start) = start {
        component.add_property(Property::datetime(names::DTSTART, start));
    }
    component.add_property(Property::new(names::TZOFFSETFROM, Value::UtcOffset(from)));
    component.add_property(Property::new(names::TZOFFSETTO, Value::UtcOffset(to)));
    if let Some(name) = name {
        component.add_property(Property::text(names::TZNAME, name));
    }
    component
}

fn offset_of(component: &Component, name: &str) -> Option<UtcOffset> {
    component.get_property(name)?.value.as_utc_offset()
}

fn text_of(component: &Component, name: &str) -> Option<String> {
    component.get_property(name)?.as_text().map(ToString::to_string)
}
