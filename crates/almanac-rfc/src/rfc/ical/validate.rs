//! Structural validation of a built calendar.
//!
//! Separate from reading and writing: callers ask for it explicitly and get
//! warnings back, never errors.

use super::core::{Component, ICalVersion, ICalendar, Warning};
use super::scribe::ScribeIndex;

/// Collects warnings for every component and property in the calendar.
///
/// Covers component rules (required, at-most-once and mutually exclusive
/// properties), property value checks, and names that do not exist in the
/// target version.
#[must_use]
pub fn validate(calendar: &ICalendar, version: ICalVersion, scribes: &ScribeIndex) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut pending: Vec<&Component> = vec![&calendar.root];

    while let Some(component) = pending.pop() {
        if let Some(scribe) = scribes.component(&component.name) {
            if !scribe.supported_versions().contains(&version) {
                warnings.push(
                    Warning::new(format!("{} is not supported in version {version}", component.name))
                        .with_component(&component.name),
                );
            }
            scribe.validate(component, version, &mut warnings);
        }

        for property in &component.properties {
            let Some(scribe) = scribes.property(&property.name) else {
                continue;
            };
            let first_new = warnings.len();
            if scribe.supported_versions().contains(&version) {
                scribe.validate(property, version, &mut warnings);
            } else {
                warnings.push(
                    Warning::new(format!("{} is not supported in version {version}", property.name))
                        .with_property(&property.name),
                );
            }
            for warning in &mut warnings[first_new..] {
                warning.component.get_or_insert_with(|| component.name.clone());
            }
        }

        pending.extend(component.children.iter().rev());
    }

    tracing::debug!(count = warnings.len(), %version, "calendar validated");
    warnings
}
