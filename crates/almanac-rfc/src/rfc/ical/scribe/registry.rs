//! Name-keyed scribe lookup.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{
    AttachScribe, AttendeeScribe, BasicComponentScribe, CalendarScribe, ComponentScribe,
    DateListScribe, DateOrDateTimeScribe, DaylightScribe, DurationScribe, FreeBusyScribe,
    GeoScribe, IntegerScribe, MODERN_ONLY, OrganizerScribe, PropertyScribe, RawComponentScribe,
    RecurScribe, TextListScribe, TextScribe, TimezoneScribe, TriggerScribe, TzScribe, UriScribe,
    UtcOffsetScribe, VersionScribe,
};
use crate::rfc::ical::core::{ComponentKind, names};

const TEXT_PROPERTIES: &[&str] = &[
    names::SUMMARY,
    names::DESCRIPTION,
    names::LOCATION,
    names::COMMENT,
    names::CONTACT,
    names::UID,
    names::PRODID,
    names::CALSCALE,
    names::METHOD,
    names::TZID,
    names::TZNAME,
    names::STATUS,
    names::CLASS,
    names::TRANSP,
    names::ACTION,
    names::RELATED_TO,
    names::NAME,
    names::COLOR,
];

const DATE_PROPERTIES: &[&str] = &[
    names::DTSTART,
    names::DTEND,
    names::DUE,
    names::RECURRENCE_ID,
    names::DTSTAMP,
    names::CREATED,
    names::LAST_MODIFIED,
    names::COMPLETED,
];

const EVENT_SINGLE: &[&str] = &[
    names::UID,
    names::DTSTAMP,
    names::DTSTART,
    names::DTEND,
    names::DURATION,
    names::CLASS,
    names::CREATED,
    names::DESCRIPTION,
    names::GEO,
    names::LAST_MODIFIED,
    names::LOCATION,
    names::ORGANIZER,
    names::PRIORITY,
    names::SEQUENCE,
    names::STATUS,
    names::SUMMARY,
    names::TRANSP,
    names::URL,
    names::RECURRENCE_ID,
];

const TODO_SINGLE: &[&str] = &[
    names::UID,
    names::DTSTAMP,
    names::DTSTART,
    names::DUE,
    names::DURATION,
    names::CLASS,
    names::COMPLETED,
    names::CREATED,
    names::DESCRIPTION,
    names::GEO,
    names::LAST_MODIFIED,
    names::LOCATION,
    names::ORGANIZER,
    names::PERCENT_COMPLETE,
    names::PRIORITY,
    names::SEQUENCE,
    names::STATUS,
    names::SUMMARY,
    names::URL,
    names::RECURRENCE_ID,
];

const JOURNAL_SINGLE: &[&str] = &[
    names::UID,
    names::DTSTAMP,
    names::DTSTART,
    names::CLASS,
    names::CREATED,
    names::LAST_MODIFIED,
    names::ORGANIZER,
    names::SEQUENCE,
    names::STATUS,
    names::SUMMARY,
    names::URL,
    names::RECURRENCE_ID,
];

const FREEBUSY_SINGLE: &[&str] = &[
    names::UID,
    names::DTSTAMP,
    names::DTSTART,
    names::DTEND,
    names::CONTACT,
    names::ORGANIZER,
    names::URL,
];

const OBSERVANCE_REQUIRED: &[&str] = &[names::DTSTART, names::TZOFFSETFROM, names::TZOFFSETTO];

/// Scribes by uppercase name.
///
/// [`ScribeIndex::default`] holds every standard property and component.
/// Registering a scribe under an existing name replaces it. The index is
/// plain data; share it between readers and writers behind an [`Arc`].
#[derive(Clone)]
pub struct ScribeIndex {
    properties: HashMap<String, Arc<dyn PropertyScribe>>,
    components: HashMap<String, Arc<dyn ComponentScribe>>,
}

impl ScribeIndex {
    /// An index with no scribes at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            properties: HashMap::new(),
            components: HashMap::new(),
        }
    }

    pub fn register_property(&mut self, scribe: impl PropertyScribe + 'static) {
        let name = scribe.name().to_ascii_uppercase();
        self.properties.insert(name, Arc::new(scribe));
    }

    pub fn register_component(&mut self, scribe: impl ComponentScribe + 'static) {
        let name = scribe.name().to_ascii_uppercase();
        self.components.insert(name, Arc::new(scribe));
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Arc<dyn PropertyScribe>> {
        self.properties.get(&name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Arc<dyn ComponentScribe>> {
        self.components.get(&name.to_ascii_uppercase())
    }

    /// Returns the component scribe for `name`, or a raw one keeping the name.
    #[must_use]
    pub fn component_or_raw(&self, name: &str) -> Arc<dyn ComponentScribe> {
        match self.component(name) {
            Some(scribe) => Arc::clone(scribe),
            None => Arc::new(RawComponentScribe::new(name)),
        }
    }

    fn seed_properties(&mut self) {
        for &name in TEXT_PROPERTIES {
            self.register_property(TextScribe::new(name));
        }
        for name in [names::CATEGORIES, names::RESOURCES] {
            self.register_property(TextListScribe::new(name));
        }
        self.register_property(IntegerScribe::new(names::PRIORITY).with_range(0..=9));
        self.register_property(IntegerScribe::new(names::SEQUENCE));
        self.register_property(IntegerScribe::new(names::REPEAT));
        self.register_property(IntegerScribe::new(names::PERCENT_COMPLETE).with_range(0..=100));
        for &name in DATE_PROPERTIES {
            self.register_property(DateOrDateTimeScribe::new(name));
        }
        for name in [names::EXDATE, names::RDATE] {
            self.register_property(DateListScribe::new(name));
        }
        self.register_property(FreeBusyScribe);
        self.register_property(DurationScribe);
        self.register_property(TriggerScribe);
        for name in [names::RRULE, names::EXRULE] {
            self.register_property(RecurScribe::new(name));
        }
        for name in [names::TZOFFSETFROM, names::TZOFFSETTO] {
            self.register_property(UtcOffsetScribe::new(name));
        }
        for name in [names::URL, names::TZURL, names::SOURCE] {
            self.register_property(UriScribe::new(name));
        }
        self.register_property(AttachScribe);
        self.register_property(GeoScribe);
        self.register_property(AttendeeScribe);
        self.register_property(OrganizerScribe);
        self.register_property(VersionScribe);
        self.register_property(DaylightScribe);
        self.register_property(TzScribe);
    }

    fn seed_components(&mut self) {
        self.register_component(CalendarScribe::default());
        self.register_component(
            BasicComponentScribe::new(ComponentKind::Event.as_str())
                .with_required(&[names::UID, names::DTSTAMP])
                .with_single(EVENT_SINGLE)
                .with_exclusive(&[(names::DTEND, names::DURATION)]),
        );
        self.register_component(
            BasicComponentScribe::new(ComponentKind::Todo.as_str())
                .with_required(&[names::UID, names::DTSTAMP])
                .with_single(TODO_SINGLE)
                .with_exclusive(&[(names::DUE, names::DURATION)]),
        );
        self.register_component(
            BasicComponentScribe::new(ComponentKind::Journal.as_str())
                .with_required(&[names::UID, names::DTSTAMP])
                .with_single(JOURNAL_SINGLE)
                .with_versions(MODERN_ONLY),
        );
        self.register_component(
            BasicComponentScribe::new(ComponentKind::FreeBusy.as_str())
                .with_required(&[names::UID, names::DTSTAMP])
                .with_single(FREEBUSY_SINGLE)
                .with_versions(MODERN_ONLY),
        );
        self.register_component(TimezoneScribe::default());
        for kind in [ComponentKind::Standard, ComponentKind::Daylight] {
            self.register_component(
                BasicComponentScribe::new(kind.as_str())
                    .with_required(OBSERVANCE_REQUIRED)
                    .with_single(OBSERVANCE_REQUIRED),
            );
        }
        self.register_component(
            BasicComponentScribe::new(ComponentKind::Alarm.as_str())
                .with_required(&[names::ACTION, names::TRIGGER])
                .with_single(&[names::ACTION, names::TRIGGER, names::DURATION, names::REPEAT])
                .with_versions(MODERN_ONLY),
        );
    }
}

impl Default for ScribeIndex {
    fn default() -> Self {
        let mut index = Self::empty();
        index.seed_properties();
        index.seed_components();
        index
    }
}

impl fmt::Debug for ScribeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        let mut components: Vec<&str> = self.components.keys().map(String::as_str).collect();
        properties.sort_unstable();
        components.sort_unstable();
        f.debug_struct("ScribeIndex")
            .field("properties", &properties)
            .field("components", &components)
            .finish()
    }
}
