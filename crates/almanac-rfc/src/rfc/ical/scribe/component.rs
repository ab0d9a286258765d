//! Component scribes.

use super::ComponentScribe;
use crate::rfc::ical::core::{Component, ComponentKind, ICalVersion, Warning, names};
use crate::rfc::ical::legacy::synthesize_timezone;

/// A component described by its property rules.
///
/// `required` properties are only enforced for 2.0; vCalendar 1.0 makes
/// everything optional.
#[derive(Debug, Clone)]
pub struct BasicComponentScribe {
    name: String,
    required: &'static [&'static str],
    single: &'static [&'static str],
    exclusive: &'static [(&'static str, &'static str)],
    versions: &'static [ICalVersion],
}

impl BasicComponentScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            required: &[],
            single: &[],
            exclusive: &[],
            versions: &ICalVersion::ALL,
        }
    }

    #[must_use]
    pub const fn with_required(mut self, required: &'static [&'static str]) -> Self {
        self.required = required;
        self
    }

    /// Properties that may appear at most once.
    #[must_use]
    pub const fn with_single(mut self, single: &'static [&'static str]) -> Self {
        self.single = single;
        self
    }

    /// Pairs of properties that must not both be present.
    #[must_use]
    pub const fn with_exclusive(mut self, exclusive: &'static [(&'static str, &'static str)]) -> Self {
        self.exclusive = exclusive;
        self
    }

    #[must_use]
    pub const fn with_versions(mut self, versions: &'static [ICalVersion]) -> Self {
        self.versions = versions;
        self
    }

    fn warning(&self, message: String, property: &str) -> Warning {
        Warning::new(message)
            .with_component(&self.name)
            .with_property(property)
    }
}

impl ComponentScribe for BasicComponentScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_versions(&self) -> &[ICalVersion] {
        self.versions
    }

    fn validate(&self, component: &Component, version: ICalVersion, warnings: &mut Vec<Warning>) {
        if !version.is_legacy() {
            for &name in self.required {
                if component.get_property(name).is_none() {
                    warnings.push(self.warning(format!("missing required property {name}"), name));
                }
            }
        }

        for &name in self.single {
            let count = component.get_properties(name).len();
            if count > 1 {
                warnings.push(self.warning(
                    format!("{name} may appear at most once, found {count}"),
                    name,
                ));
            }
        }

        for &(first, second) in self.exclusive {
            if component.get_property(first).is_some() && component.get_property(second).is_some() {
                warnings.push(self.warning(format!("{first} and {second} are mutually exclusive"), second));
            }
        }
    }
}

/// VCALENDAR. Turns vCalendar 1.0 `DAYLIGHT`/`TZ` into a `VTIMEZONE` once
/// the root closes.
#[derive(Debug, Clone)]
pub struct CalendarScribe {
    rules: BasicComponentScribe,
}

impl Default for CalendarScribe {
    fn default() -> Self {
        Self {
            rules: BasicComponentScribe::new(ComponentKind::Calendar.as_str())
                .with_required(&[names::PRODID, names::VERSION])
                .with_single(&[names::PRODID, names::VERSION, names::CALSCALE, names::METHOD]),
        }
    }
}

impl ComponentScribe for CalendarScribe {
    fn name(&self) -> &str {
        self.rules.name()
    }

    fn new_instance(&self) -> Component {
        Component::calendar()
    }

    fn finish(&self, component: &mut Component, version: ICalVersion, _warnings: &mut Vec<Warning>) {
        if version.is_legacy() {
            synthesize_timezone(component);
        }
    }

    fn validate(&self, component: &Component, version: ICalVersion, warnings: &mut Vec<Warning>) {
        self.rules.validate(component, version, warnings);
    }
}

/// VTIMEZONE.
#[derive(Debug, Clone)]
pub struct TimezoneScribe {
    rules: BasicComponentScribe,
}

impl Default for TimezoneScribe {
    fn default() -> Self {
        Self {
            rules: BasicComponentScribe::new(ComponentKind::Timezone.as_str())
                .with_required(&[names::TZID])
                .with_single(&[names::TZID, names::LAST_MODIFIED, names::TZURL]),
        }
    }
}

impl ComponentScribe for TimezoneScribe {
    fn name(&self) -> &str {
        self.rules.name()
    }

    fn new_instance(&self) -> Component {
        Component::timezone()
    }

    fn validate(&self, component: &Component, version: ICalVersion, warnings: &mut Vec<Warning>) {
        self.rules.validate(component, version, warnings);
        let observances = component
            .children
            .iter()
            .filter(|c| matches!(c.kind, ComponentKind::Standard | ComponentKind::Daylight))
            .count();
        if !version.is_legacy() && observances == 0 {
            warnings.push(
                Warning::new("VTIMEZONE needs at least one STANDARD or DAYLIGHT")
                    .with_component(self.name()),
            );
        }
    }
}

/// Fallback for component names with no registered scribe.
///
/// Keeps the original name; never warns.
#[derive(Debug, Clone)]
pub struct RawComponentScribe {
    name: String,
}

impl RawComponentScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl ComponentScribe for RawComponentScribe {
    fn name(&self) -> &str {
        &self.name
    }
}
