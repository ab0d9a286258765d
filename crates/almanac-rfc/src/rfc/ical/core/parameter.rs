//! iCalendar property parameters (RFC 5545 §3.2).

/// Well-known parameter names.
pub mod names {
    pub const CN: &str = "CN";
    pub const ENCODING: &str = "ENCODING";
    pub const EXPECT: &str = "EXPECT";
    pub const FMTTYPE: &str = "FMTTYPE";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const ROLE: &str = "ROLE";
    pub const RSVP: &str = "RSVP";
    pub const STATUS: &str = "STATUS";
    pub const TYPE: &str = "TYPE";
    pub const TZID: &str = "TZID";
    pub const VALUE: &str = "VALUE";
}

/// A named parameter and its values, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// Ordered, case-insensitive parameter multimap.
///
/// Names keep the order in which they were first added; values of a repeated
/// name are appended to the same entry. Bare tokens without `=` live in a
/// separate valueless slot so they are never confused with a named parameter
/// that has an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<Parameter>,
    valueless: Vec<String>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).and_then(|i| self.entries[i].value())
    }

    /// Returns every value of a parameter (empty when absent).
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        match self.position(name) {
            Some(i) => &self.entries[i].values,
            None => &[],
        }
    }

    /// Returns whether the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Appends a value to a parameter, creating it if needed.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].values.push(value.into()),
            None => self.entries.push(Parameter::new(name, value)),
        }
    }

    /// Appends several values to a parameter.
    pub fn put_all(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = String>) {
        let name = name.into();
        for value in values {
            self.put(name.clone(), value);
        }
    }

    /// Replaces every value of a parameter with a single value.
    pub fn replace(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].values = vec![value.into()],
            None => self.entries.push(Parameter::new(name, value)),
        }
    }

    /// Removes a parameter, returning its values.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        self.position(name)
            .map(|i| self.entries.remove(i).values)
            .unwrap_or_default()
    }

    /// Removes one value (case-insensitive) from a parameter.
    ///
    /// The parameter disappears once its last value is removed.
    pub fn remove_value(&mut self, name: &str, value: &str) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let values = &mut self.entries[i].values;
        let Some(j) = values.iter().position(|v| v.eq_ignore_ascii_case(value)) else {
            return false;
        };
        values.remove(j);
        if values.is_empty() {
            self.entries.remove(i);
        }
        true
    }

    /// Number of named parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.valueless.is_empty()
    }

    /// Iterates named parameters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    /// Bare tokens that carried no `=`.
    #[must_use]
    pub fn valueless(&self) -> &[String] {
        &self.valueless
    }

    pub fn push_valueless(&mut self, token: impl Into<String>) {
        self.valueless.push(token.into());
    }

    /// Drains the valueless slot.
    pub fn take_valueless(&mut self) -> Vec<String> {
        std::mem::take(&mut self.valueless)
    }

    // --- Typed accessors ---

    /// Returns the VALUE parameter.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.get(names::VALUE)
    }

    /// Returns the TZID parameter.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get(names::TZID)
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.get(names::LANGUAGE)
    }

    /// Returns the CN (common name) parameter.
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.get(names::CN)
    }

    #[must_use]
    pub fn fmt_type(&self) -> Option<&str> {
        self.get(names::FMTTYPE)
    }

    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.get(names::ENCODING)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
