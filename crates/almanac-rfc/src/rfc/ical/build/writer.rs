//! Document writer.
//!
//! Walks the component tree depth-first with an explicit stack and renders
//! each property through its scribe for the target version.

use std::io::Write;
use std::sync::Arc;

use super::escape::escape_param_value;
use super::fold::fold_line;
use super::values::render_value;
use crate::error::RfcResult;
use crate::rfc::ical::core::{
    Component, ComponentKind, ICalendar, Parameters, Property, names, param_names,
};
use crate::rfc::ical::legacy::flatten_timezone;
use crate::rfc::ical::options::WriterOptions;
use crate::rfc::ical::scribe::{ComponentScribe, PropertyScribe, ScribeIndex, WriteContext};

enum Step<'a> {
    Open(&'a Component, bool),
    Close(&'a str),
}

/// Writes calendars to a byte stream.
pub struct ICalWriter<W> {
    inner: W,
    options: WriterOptions,
    scribes: Arc<ScribeIndex>,
}

impl<W: Write> ICalWriter<W> {
    #[must_use]
    pub fn new(inner: W, options: WriterOptions) -> Self {
        Self {
            inner,
            options,
            scribes: Arc::new(ScribeIndex::default()),
        }
    }

    /// Uses a shared scribe index instead of the default one.
    #[must_use]
    pub fn with_scribes(mut self, scribes: Arc<ScribeIndex>) -> Self {
        self.scribes = scribes;
        self
    }

    pub fn register_property_scribe(&mut self, scribe: impl PropertyScribe + 'static) {
        Arc::make_mut(&mut self.scribes).register_property(scribe);
    }

    pub fn register_component_scribe(&mut self, scribe: impl ComponentScribe + 'static) {
        Arc::make_mut(&mut self.scribes).register_component(scribe);
    }

    /// Writes one calendar.
    ///
    /// ## Errors
    /// Returns an error if the underlying stream fails.
    #[tracing::instrument(skip_all, fields(version = %self.options.version))]
    pub fn write(&mut self, calendar: &ICalendar) -> RfcResult<()> {
        let text = self.render(calendar);
        self.inner.write_all(text.as_bytes())?;
        tracing::debug!(bytes = text.len(), "calendar written");
        Ok(())
    }

    /// ## Errors
    /// Returns an error if the underlying stream fails.
    pub fn flush(&mut self) -> RfcResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W> ICalWriter<W> {
    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    #[must_use]
    pub fn scribes(&self) -> &ScribeIndex {
        &self.scribes
    }

    fn render(&self, calendar: &ICalendar) -> String {
        let mut out = String::new();
        let mut stack = vec![Step::Open(&calendar.root, true)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Close(name) => self.push_line(&mut out, &format!("END:{name}")),
                Step::Open(component, is_root) => {
                    if !is_root && !self.writes_component(component) {
                        continue;
                    }
                    self.push_line(&mut out, &format!("BEGIN:{}", component.name));
                    if is_root {
                        self.write_header(component, &mut out);
                    } else {
                        for property in &component.properties {
                            self.write_property(property, &mut out);
                        }
                    }
                    stack.push(Step::Close(&component.name));
                    stack.extend(component.children.iter().rev().map(|c| Step::Open(c, false)));
                }
            }
        }
        out
    }

    fn writes_component(&self, component: &Component) -> bool {
        let version = self.options.version;
        if version.is_legacy() && component.kind == ComponentKind::Timezone {
            // rewritten as DAYLIGHT/TZ on the root
            return false;
        }
        let supported = self
            .scribes
            .component(&component.name)
            .is_none_or(|s| s.supported_versions().contains(&version));
        if !supported {
            tracing::debug!(component = %component.name, %version, "component skipped");
        }
        supported
    }

    /// VERSION, PRODID, the root's other properties, then for 1.0 the time
    /// zone flattened into DAYLIGHT/TZ.
    fn write_header(&self, root: &Component, out: &mut String) {
        let version = self.options.version;
        self.write_property(&Property::text(names::VERSION, version.as_str()), out);
        match root.get_property(names::PRODID) {
            Some(prodid) => self.write_property(prodid, out),
            None => self.write_property(
                &Property::text(names::PRODID, self.options.product_id()),
                out,
            ),
        }

        for property in root
            .properties
            .iter()
            .filter(|p| p.name != names::VERSION && p.name != names::PRODID)
        {
            self.write_property(property, out);
        }

        if version.is_legacy()
            && let Some(timezone) = root.first_child(ComponentKind::Timezone)
        {
            for property in flatten_timezone(timezone) {
                self.write_property(&property, out);
            }
        }
    }

    fn write_property(&self, property: &Property, out: &mut String) {
        let version = self.options.version;

        let (params, text) = if let Some(raw) = property.value.as_unknown() {
            let mut params = property.params.clone();
            if let Some(data_type) = &property.data_type {
                params.replace(param_names::VALUE, data_type.as_str());
            }
            (params, raw.to_string())
        } else if let Some(scribe) = self.scribes.property(&property.name) {
            if !scribe.supported_versions().contains(&version) {
                tracing::debug!(property = %property.name, %version, "property skipped");
                return;
            }
            let mut params = scribe.prepare_parameters(property, version);
            if let Some(data_type) = scribe.data_type(property, version)
                && scribe.default_data_type(version).as_ref() != Some(&data_type)
            {
                params.replace(param_names::VALUE, data_type.as_str());
            }
            (params, scribe.write_text(property, &WriteContext { version }))
        } else {
            (property.params.clone(), render_value(&property.value, version))
        };

        let mut line = property.name.clone();
        self.push_parameters(&params, &mut line);
        line.push(':');
        line.push_str(&text);
        self.push_line(out, &line);
    }

    fn push_parameters(&self, params: &Parameters, line: &mut String) {
        let legacy = self.options.version.is_legacy();
        let caret = self.options.caret_encoding;

        for param in params.iter() {
            if legacy && param.name == param_names::TYPE {
                for value in &param.values {
                    line.push(';');
                    line.push_str(value);
                }
                continue;
            }
            line.push(';');
            line.push_str(&param.name);
            line.push('=');
            for (i, value) in param.values.iter().enumerate() {
                if i > 0 {
                    line.push(',');
                }
                line.push_str(&escape_param_value(value, caret));
            }
        }
        for token in params.valueless() {
            line.push(';');
            line.push_str(token);
        }
    }

    fn push_line(&self, out: &mut String, line: &str) {
        out.push_str(&fold_line(line, self.options.fold_line_length));
    }
}

/// Renders one calendar with the default scribes.
#[must_use]
pub fn write_to_string(calendar: &ICalendar, options: &WriterOptions) -> String {
    ICalWriter::new(std::io::sink(), options.clone()).render(calendar)
}
