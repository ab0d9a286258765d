//! Non-fatal diagnostics collected while reading or validating a document.

use std::fmt;

/// A recoverable anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    /// Line number of the logical line (1-based), when produced by the reader.
    pub line: Option<usize>,
    pub property: Option<String>,
    pub component: Option<String>,
}

impl Warning {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            property: None,
            component: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        match (&self.component, &self.property) {
            (Some(c), Some(p)) => write!(f, "[{c}/{p}] ")?,
            (Some(c), None) => write!(f, "[{c}] ")?,
            (None, Some(p)) => write!(f, "[{p}] ")?,
            (None, None) => {}
        }
        f.write_str(&self.message)
    }
}
