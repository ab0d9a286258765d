//! Streaming document reader.
//!
//! Pulls logical lines one at a time and builds each `VCALENDAR` on a stack
//! of open components. Lines before the first `BEGIN:VCALENDAR` and between
//! documents are ignored. Malformed data becomes a [`Warning`]; only I/O
//! failures are returned as errors.

use std::io::BufRead;
use std::sync::Arc;

use super::lexer::parse_content_line;
use super::line_reader::LineReader;
use crate::error::RfcResult;
use crate::rfc::ical::core::{
    Component, ComponentKind, ContentLine, DataType, Document, ICalVersion, ICalendar, Parameters,
    Property, Value, Warning, names, param_names,
};
use crate::rfc::ical::options::ReaderOptions;
use crate::rfc::ical::scribe::{
    ComponentScribe, ParseContext, PropertyScribe, ScribeError, ScribeIndex,
};

const BEGIN: &str = "BEGIN";
const END: &str = "END";

struct Open {
    component: Component,
    scribe: Arc<dyn ComponentScribe>,
}

/// Reads calendars from a buffered stream, one per call.
pub struct ICalReader<R> {
    lines: LineReader<R>,
    options: ReaderOptions,
    scribes: Arc<ScribeIndex>,
    version: ICalVersion,
    version_seen: bool,
    warnings: Vec<Warning>,
}

impl<'a> ICalReader<&'a [u8]> {
    /// Reader over in-memory text with default options.
    #[must_use]
    pub fn from_text(input: &'a str) -> Self {
        Self::new(input.as_bytes(), ReaderOptions::default())
    }
}

impl<R: BufRead> ICalReader<R> {
    #[must_use]
    pub fn new(inner: R, options: ReaderOptions) -> Self {
        Self {
            lines: LineReader::new(inner),
            version: options.default_version,
            options,
            scribes: Arc::new(ScribeIndex::default()),
            version_seen: false,
            warnings: Vec::new(),
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

    /// Warnings of the last document read.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Version of the last document read.
    #[must_use]
    pub fn version(&self) -> ICalVersion {
        self.version
    }

    /// Reads the next calendar, or `None` once the stream holds no more.
    ///
    /// ## Errors
    /// Returns an error if the underlying stream fails.
    pub fn read_next(&mut self) -> RfcResult<Option<ICalendar>> {
        Ok(self.read_document()?.map(|document| document.calendar))
    }

    /// Reads the next calendar along with its version and warnings.
    ///
    /// ## Errors
    /// Returns an error if the underlying stream fails.
    #[tracing::instrument(skip_all)]
    pub fn read_document(&mut self) -> RfcResult<Option<Document>> {
        self.warnings.clear();
        self.version = self.options.default_version;
        self.version_seen = false;

        let mut stack: Vec<Open> = Vec::new();
        while let Some((line, text)) = self.lines.next_line()? {
            tracing::trace!(line, "logical line");

            let content = match parse_content_line(&text, line, self.options.caret_encoding) {
                Ok(content) => content,
                Err(err) => {
                    if !stack.is_empty() {
                        self.warn(Warning::new(format!("line skipped: {err}")).with_line(line));
                    }
                    continue;
                }
            };

            if stack.is_empty() {
                if content.name == BEGIN
                    && content.raw_value.trim().eq_ignore_ascii_case(ComponentKind::Calendar.as_str())
                {
                    tracing::debug!(line, "document started");
                    stack.push(self.open(ComponentKind::Calendar.as_str()));
                }
                continue;
            }

            match content.name.as_str() {
                BEGIN => {
                    let name = content.raw_value.trim().to_ascii_uppercase();
                    stack.push(self.open(&name));
                }
                END => {
                    let name = content.raw_value.trim().to_ascii_uppercase();
                    let Some(depth) = stack.iter().rposition(|o| o.component.name == name) else {
                        self.warn(
                            Warning::new(format!("END:{name} has no matching BEGIN")).with_line(line),
                        );
                        continue;
                    };
                    while stack.len() > depth + 1 {
                        self.close_top(&mut stack);
                    }
                    if let Some(root) = self.close_top(&mut stack) {
                        return Ok(Some(self.finish_document(root)));
                    }
                }
                _ => {
                    let at_root = stack.len() == 1;
                    if let Some(open) = stack.last_mut() {
                        self.read_property(content, line, &mut open.component, at_root);
                    }
                }
            }
        }

        // end of input: whatever is still open is closed as it stands
        let mut root = None;
        while !stack.is_empty() {
            root = self.close_top(&mut stack);
        }
        Ok(root.map(|root| self.finish_document(root)))
    }

    /// Iterates over the remaining documents. Stops after the first error.
    pub fn into_documents(mut self) -> impl Iterator<Item = RfcResult<Document>> {
        let mut failed = false;
        std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let next = self.read_document().transpose();
            failed = matches!(next, Some(Err(_)));
            next
        })
    }

    fn open(&self, name: &str) -> Open {
        let scribe = self.scribes.component_or_raw(name);
        Open {
            component: scribe.new_instance(),
            scribe,
        }
    }

    /// Pops the innermost component and attaches it to its parent. Returns
    /// the root once the stack is empty.
    fn close_top(&mut self, stack: &mut Vec<Open>) -> Option<Component> {
        let Open {
            mut component,
            scribe,
        } = stack.pop()?;

        let mut warnings = Vec::new();
        scribe.finish(&mut component, self.version, &mut warnings);
        for warning in warnings {
            self.warn(warning);
        }

        match stack.last_mut() {
            Some(parent) => {
                parent.component.add_child(component);
                None
            }
            None => Some(component),
        }
    }

    fn finish_document(&self, root: Component) -> Document {
        tracing::debug!(
            version = %self.version,
            warnings = self.warnings.len(),
            "document finished"
        );
        Document {
            calendar: ICalendar::from_root(root),
            version: self.version,
            warnings: self.warnings.clone(),
        }
    }

    fn read_property(
        &mut self,
        content: ContentLine,
        line: usize,
        component: &mut Component,
        at_root: bool,
    ) {
        let ContentLine {
            name,
            mut params,
            raw_value,
        } = content;

        if at_root && name == names::VERSION && !self.version_seen {
            self.version_seen = true;
            if let Some(version) = ICalVersion::parse(&raw_value) {
                self.version = version;
            }
        }
        let version = self.version;

        let valueless = params.take_valueless();
        if !valueless.is_empty() {
            if !version.is_legacy() {
                self.warn(
                    Warning::new(format!("valueless parameter {} treated as TYPE", valueless.join(",")))
                        .with_line(line)
                        .with_property(&name)
                        .with_component(&component.name),
                );
            }
            params.put_all(param_names::TYPE, valueless);
        }

        let declared = params
            .remove(param_names::VALUE)
            .into_iter()
            .next()
            .map(|v| DataType::parse(&v));

        let scribe = self
            .scribes
            .property(&name)
            .filter(|s| s.supported_versions().contains(&version))
            .map(Arc::clone);
        let Some(scribe) = scribe else {
            component.add_property(raw_property(name, params, raw_value, declared));
            return;
        };

        let data_type = declared.clone().or_else(|| scribe.default_data_type(version));
        let original_params = params.clone();
        let mut ctx = ParseContext {
            caret_encoding: self.options.caret_encoding,
            ..ParseContext::new(version, line)
        };

        match scribe.parse_text(&raw_value, data_type.as_ref(), &mut params, &mut ctx) {
            Ok(value) => {
                for message in ctx.warnings {
                    self.warn(
                        Warning::new(message)
                            .with_line(line)
                            .with_property(&name)
                            .with_component(&component.name),
                    );
                }
                let data_type = if value.is_unknown() { declared } else { None };
                component.add_property(Property {
                    name,
                    params,
                    value,
                    data_type,
                });
                for sibling in ctx.siblings {
                    component.add_property(sibling);
                }
            }
            Err(ScribeError::Skip(message)) => {
                self.warn(
                    Warning::new(format!("property skipped: {message}"))
                        .with_line(line)
                        .with_property(&name)
                        .with_component(&component.name),
                );
            }
            Err(ScribeError::CannotParse(message)) => {
                self.warn(
                    Warning::new(format!("value kept as raw text: {message}"))
                        .with_line(line)
                        .with_property(&name)
                        .with_component(&component.name),
                );
                component.add_property(raw_property(name, original_params, raw_value, declared));
            }
        }
    }

    fn warn(&mut self, warning: Warning) {
        tracing::warn!(%warning, "recoverable problem in calendar data");
        self.warnings.push(warning);
    }
}

fn raw_property(
    name: String,
    params: Parameters,
    raw_value: String,
    data_type: Option<DataType>,
) -> Property {
    Property {
        name,
        params,
        value: Value::Unknown(raw_value),
        data_type,
    }
}

/// Reads every calendar in `input`.
///
/// ## Errors
/// Never fails for in-memory input; the signature matches the streaming
/// reader.
pub fn parse_all(input: &str) -> RfcResult<Vec<Document>> {
    ICalReader::from_text(input).into_documents().collect()
}
