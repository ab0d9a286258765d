//! iCalendar component types (RFC 5545 §3.4-3.6).

use almanac_core::constants::PRODUCT_ID;

use super::{ICalVersion, Property, Warning, property::names};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    Event,
    Todo,
    Journal,
    FreeBusy,
    Timezone,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Experimental or otherwise unrecognized component; see [`Component::name`].
    #[default]
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Alarm => "VALARM",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VEVENT" => Self::Event,
            "VTODO" => Self::Todo,
            "VJOURNAL" => Self::Journal,
            "VFREEBUSY" => Self::FreeBusy,
            "VTIMEZONE" => Self::Timezone,
            "VALARM" => Self::Alarm,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }

    /// Returns whether this is a schedulable component (VEVENT, VTODO, VJOURNAL).
    #[must_use]
    pub const fn is_schedulable(self) -> bool {
        matches!(self, Self::Event | Self::Todo | Self::Journal)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
/// For example, a VCALENDAR contains VEVENTs, which may contain VALARMs.
/// Dropping a tree is iterative, so arbitrarily deep nesting is safe.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub kind: ComponentKind,
    /// Component name as read or constructed (uppercase).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a new component from its name; known names get their kind.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    #[must_use]
    pub fn journal() -> Self {
        Self::new(ComponentKind::Journal)
    }

    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all properties with the given name.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Removes and returns every property with the given name.
    pub fn remove_properties(&mut self, name: &str) -> Vec<Property> {
        let (removed, kept): (Vec<Property>, Vec<Property>) = std::mem::take(&mut self.properties)
            .into_iter()
            .partition(|p| p.name.eq_ignore_ascii_case(name));
        self.properties = kept;
        removed
    }

    /// Replaces every property of the same name with `prop`.
    pub fn set_property(&mut self, prop: Property) {
        self.remove_properties(&prop.name);
        self.properties.push(prop);
    }

    /// Returns properties with an `X-` name.
    #[must_use]
    pub fn experimental_properties(&self) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.name.starts_with("X-"))
            .collect()
    }

    /// Returns the UID property value if present.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property(names::UID)?.as_text()
    }

    /// Returns the SUMMARY property value if present.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.get_property(names::SUMMARY)?.as_text()
    }

    /// Returns the DESCRIPTION property value if present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get_property(names::DESCRIPTION)?.as_text()
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Returns the first child of a specific kind.
    #[must_use]
    pub fn first_child(&self, kind: ComponentKind) -> Option<&Component> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Returns the first child with the given name (case-insensitive).
    #[must_use]
    pub fn child_named(&self, name: &str) -> Option<&Component> {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Event)
    }

    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Todo)
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn journals(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Journal)
    }

    #[must_use]
    pub fn freebusy(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::FreeBusy)
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Alarm)
    }
}

impl Drop for Component {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Top-level iCalendar object, a wrapper around the VCALENDAR component.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Creates a new empty iCalendar with required properties.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text(names::VERSION, "2.0"));
        root.add_property(Property::text(names::PRODID, prodid));
        Self { root }
    }

    /// Wraps an existing VCALENDAR component.
    #[must_use]
    pub fn from_root(root: Component) -> Self {
        Self { root }
    }

    /// Returns the PRODID value.
    #[must_use]
    pub fn prodid(&self) -> Option<&str> {
        self.root.get_property(names::PRODID)?.as_text()
    }

    /// Returns the VERSION text.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.root.get_property(names::VERSION)?.as_text()
    }

    /// Returns the CALSCALE value (defaults to "GREGORIAN").
    #[must_use]
    pub fn calscale(&self) -> &str {
        self.root
            .get_property(names::CALSCALE)
            .and_then(|p| p.as_text())
            .unwrap_or("GREGORIAN")
    }

    pub fn add_property(&mut self, prop: Property) {
        self.root.add_property(prop);
    }

    pub fn add_component(&mut self, component: Component) {
        self.root.add_child(component);
    }

    pub fn add_event(&mut self, event: Component) {
        self.root.add_child(event);
    }

    pub fn add_todo(&mut self, todo: Component) {
        self.root.add_child(todo);
    }

    pub fn add_timezone(&mut self, tz: Component) {
        self.root.add_child(tz);
    }

    #[must_use]
    pub fn events(&self) -> Vec<&Component> {
        self.root.events()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<&Component> {
        self.root.todos()
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.timezones()
    }

    #[must_use]
    pub fn journals(&self) -> Vec<&Component> {
        self.root.journals()
    }

    #[must_use]
    pub fn freebusy(&self) -> Vec<&Component> {
        self.root.freebusy()
    }

    /// Returns all unique UIDs in this calendar.
    #[must_use]
    pub fn uids(&self) -> Vec<&str> {
        let mut uids: Vec<&str> = self.root.children.iter().filter_map(|c| c.uid()).collect();
        uids.sort_unstable();
        uids.dedup();
        uids
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self::new(PRODUCT_ID)
    }
}

/// One calendar read from a stream, with the diagnostics gathered while
/// building it.
#[derive(Debug, Clone)]
pub struct Document {
    pub calendar: ICalendar,
    /// Version in effect when the document finished.
    pub version: ICalVersion,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_kind_parse() {
        assert_eq!(ComponentKind::parse("VEVENT"), ComponentKind::Event);
        assert_eq!(ComponentKind::parse("vtodo"), ComponentKind::Todo);
        assert_eq!(ComponentKind::parse("X-CUSTOM"), ComponentKind::Unknown);
    }

    #[test]
    fn icalendar_new() {
        let ical = ICalendar::new("-//Test//Test//EN");
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));
        assert_eq!(ical.calscale(), "GREGORIAN");
    }

    #[test]
    fn component_properties() {
        let mut event = Component::event();
        event.add_property(Property::text("UID", "test-uid-123"));
        event.add_property(Property::text("SUMMARY", "Test Event"));
        event.add_property(Property::raw("X-ONE", "1"));
        event.add_property(Property::raw("X-ONE", "2"));

        assert_eq!(event.uid(), Some("test-uid-123"));
        assert_eq!(event.summary(), Some("Test Event"));
        assert_eq!(event.experimental_properties().len(), 2);

        let removed = event.remove_properties("x-one");
        assert_eq!(removed.len(), 2);
        assert_eq!(event.properties.len(), 2);
    }

    #[test]
    fn custom_component_keeps_name() {
        let c = Component::custom("x-party");
        assert_eq!(c.kind, ComponentKind::Unknown);
        assert_eq!(c.name, "X-PARTY");
    }

    #[test]
    fn icalendar_events() {
        let mut ical = ICalendar::default();

        let mut event1 = Component::event();
        event1.add_property(Property::text("UID", "event1"));
        ical.add_event(event1);

        let mut event2 = Component::event();
        event2.add_property(Property::text("UID", "event2"));
        ical.add_event(event2);

        assert_eq!(ical.events().len(), 2);
        assert_eq!(ical.uids(), vec!["event1", "event2"]);
        assert_eq!(ical.prodid(), Some(PRODUCT_ID));
    }

    #[test]
    fn deep_tree_drops_without_recursion() {
        let mut root = Component::calendar();
        for _ in 0..200_000 {
            let mut parent = Component::event();
            parent.add_child(root);
            root = parent;
        }
        drop(root);
    }
}
