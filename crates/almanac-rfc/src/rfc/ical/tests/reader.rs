//! Reader behavior over whole documents: recovery, warnings, versions and
//! custom scribes.

use std::fmt::Write as _;

use anyhow::Context as _;

use crate::rfc::ical::core::{
    Attendee, ComponentKind, DataType, Date, ICalVersion, ParticipationLevel, Parameters, Property,
    UtcOffset, Value, names,
};
use crate::rfc::ical::scribe::{ParseContext, PropertyScribe, ScribeError, WriteContext};
use crate::rfc::ical::{ICalReader, ICalWriter, ReaderOptions, WriterOptions, parse_all};

/// PRODID that reads upper case and writes lower case.
struct LoudProdId;

impl PropertyScribe for LoudProdId {
    fn name(&self) -> &str {
        names::PRODID
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        _ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        Ok(Value::Text(value.to_ascii_uppercase()))
    }

    fn write_text(&self, property: &Property, _ctx: &WriteContext) -> String {
        property.as_text().unwrap_or_default().to_ascii_lowercase()
    }
}

/// Test scribe whose outcome is fixed.
enum Outcome {
    Warn,
    Skip,
    CannotParse,
}

struct FixedOutcome(Outcome);

impl PropertyScribe for FixedOutcome {
    fn name(&self) -> &str {
        "X-FIXED"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        // consumed on success, must come back on failure
        params.remove("X-CONSUMED");
        match self.0 {
            Outcome::Warn => {
                ctx.warn("suspicious value");
                Ok(Value::Text(value.to_string()))
            }
            Outcome::Skip => {
                ctx.warn("never reported");
                Err(ScribeError::Skip("unusable".to_string()))
            }
            Outcome::CannotParse => Err(ScribeError::CannotParse("garbled".to_string())),
        }
    }
}

fn fixed_outcome_document(outcome: Outcome) -> (crate::rfc::ical::Document, usize) {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:prodid\r\n\
X-FIXED;X-CONSUMED=1:value\r\n\
END:VCALENDAR\r\n";
    let mut reader = ICalReader::from_text(input);
    reader.register_property_scribe(FixedOutcome(outcome));
    let document = reader.read_document().unwrap().unwrap();
    let count = reader.warnings().len();
    (document, count)
}

#[test_log::test]
fn basic_document() {
    let input = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//xyz Corp//NONSGML PDA Calendar Version 1.0//EN\r\n\
VERSION:2.0\r\n\
X-TEST:a test\r\n\
BEGIN:VEVENT\r\n\
SUMMARY;LANGUAGE=en:Networld+Interop Conference\r\n\
DESCRIPTION:Networld+Interop Conference\r\n \
and Exhibit\\nAtlanta World Congress Center\\n\r\n \
Atlanta\\, Georgia\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let mut reader = ICalReader::from_text(input);
    let document = reader.read_document().unwrap().unwrap();
    let calendar = &document.calendar;

    assert_eq!(calendar.root.properties.len(), 3);
    assert_eq!(calendar.root.children.len(), 1);
    assert_eq!(calendar.prodid(), Some("-//xyz Corp//NONSGML PDA Calendar Version 1.0//EN"));
    assert_eq!(document.version, ICalVersion::V2_0);
    assert_eq!(
        calendar.root.get_property("X-TEST").and_then(|p| p.value.as_unknown()),
        Some("a test")
    );

    let event = calendar.events()[0];
    assert_eq!(event.properties.len(), 2);
    assert_eq!(event.summary(), Some("Networld+Interop Conference"));
    assert_eq!(
        event.get_property(names::SUMMARY).unwrap().params.language(),
        Some("en")
    );
    assert_eq!(
        event.description(),
        Some("Networld+Interop Conferenceand Exhibit\nAtlanta World Congress Center\nAtlanta, Georgia")
    );

    assert!(document.warnings.is_empty());
    assert!(reader.read_next().unwrap().is_none());
}

#[test]
fn reads_documents_in_sequence() -> anyhow::Result<()> {
    let input = "\
BEGIN:VCALENDAR\r\n\
PRODID:prodid\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:event summary\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n\
BEGIN:VCALENDAR\r\n\
PRODID:prodid\r\n\
VERSION:2.0\r\n\
BEGIN:VTODO\r\n\
SUMMARY:todo summary\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

    let mut reader = ICalReader::from_text(input);
    let first = reader.read_next()?.context("first calendar")?;
    assert_eq!(first.events()[0].summary(), Some("event summary"));
    assert!(reader.warnings().is_empty());

    let second = reader.read_next()?.context("second calendar")?;
    assert!(second.events().is_empty());
    assert_eq!(second.todos()[0].summary(), Some("todo summary"));
    assert!(reader.warnings().is_empty());

    assert!(reader.read_next()?.is_none());
    Ok(())
}

#[test]
fn caret_encoding_toggle() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID;X-TEST=^'test^':prodid\r\n\
END:VCALENDAR\r\n";

    let decoded = ICalReader::new(input.as_bytes(), ReaderOptions::default())
        .read_next()
        .unwrap()
        .unwrap();
    let prodid = decoded.root.get_property(names::PRODID).unwrap();
    assert_eq!(prodid.get_param_value("X-TEST"), Some("\"test\""));

    let literal = ICalReader::new(
        input.as_bytes(),
        ReaderOptions::default().with_caret_encoding(false),
    )
    .read_next()
    .unwrap()
    .unwrap();
    let prodid = literal.root.get_property(names::PRODID).unwrap();
    assert_eq!(prodid.get_param_value("X-TEST"), Some("^'test^'"));
}

#[test]
fn content_outside_calendar_is_ignored() {
    let mut reader = ICalReader::from_text("PRODID:prodid\r\nVERSION:2.0\r\n");
    assert!(reader.read_next().unwrap().is_none());

    let input = "\
PRODID:prodid\r\n\
VERSION:1.0\r\n\
BEGIN:VCALENDAR\r\n\
PRODID:prodid2\r\n\
VERSION:2.0\r\n\
END:VCALENDAR\r\n";
    let documents = parse_all(input).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].calendar.prodid(), Some("prodid2"));
    assert_eq!(documents[0].version, ICalVersion::V2_0);
}

#[test_log::test]
fn missing_end_closes_inner_component() {
    let input = "\
BEGIN:VCALENDAR\r\n\
PRODID:prodid\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:summary\r\n\
BEGIN:VTODO\r\n\
SUMMARY:one\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
SUMMARY:two\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    let root = &document.calendar.root;
    assert_eq!(root.properties.len(), 2);
    assert_eq!(root.children.len(), 2);

    let event = document.calendar.events()[0];
    assert_eq!(event.properties.len(), 1);
    assert_eq!(event.children.len(), 1);
    assert_eq!(event.summary(), Some("summary"));
    assert_eq!(event.todos()[0].summary(), Some("one"));

    assert_eq!(document.calendar.todos()[0].summary(), Some("two"));
    assert!(document.warnings.is_empty());
}

#[test]
fn unmatched_end_is_reported() {
    let input = "\
BEGIN:VCALENDAR\r\n\
PRODID:prodid\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:summary\r\n\
END:FOOBAR\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert_eq!(document.calendar.root.properties.len(), 2);
    assert_eq!(document.calendar.root.children.len(), 1);
    assert_eq!(document.calendar.events()[0].properties.len(), 1);
    assert_eq!(document.warnings.len(), 1);
    assert_eq!(document.warnings[0].line, Some(6));
}

#[test]
fn experimental_names_are_kept_silently() {
    let input = "\
BEGIN:VCALENDAR\r\n\
PRODID:prodid\r\n\
VERSION:2.0\r\n\
X-TEST1:one\r\n\
X-TEST1:one point five\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:summary\r\n\
X-TEST2:two\r\n\
END:VEVENT\r\n\
BEGIN:X-PARTY\r\n\
X-GUESTS:12\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:inside\r\n\
END:VEVENT\r\n\
END:X-PARTY\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert!(document.warnings.is_empty());

    let root = &document.calendar.root;
    let x_test: Vec<_> = root
        .get_properties("X-TEST1")
        .into_iter()
        .filter_map(|p| p.value.as_unknown())
        .collect();
    assert_eq!(x_test, ["one", "one point five"]);
    assert_eq!(root.experimental_properties().len(), 2);

    let party = root.child_named("X-PARTY").unwrap();
    assert_eq!(party.kind, ComponentKind::Unknown);
    assert_eq!(party.properties.len(), 1);
    assert_eq!(party.events()[0].summary(), Some("inside"));
}

#[test]
fn custom_scribe_overrides_default() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:Acme\r\n\
END:VCALENDAR\r\n";
    let mut reader = ICalReader::from_text(input);
    reader.register_property_scribe(LoudProdId);
    let calendar = reader.read_next().unwrap().unwrap();
    assert_eq!(calendar.prodid(), Some("ACME"));

    let mut writer = ICalWriter::new(Vec::new(), WriterOptions::default());
    writer.register_property_scribe(LoudProdId);
    writer.write(&calendar).unwrap();
    let output = String::from_utf8(writer.into_inner()).unwrap();
    assert!(output.contains("\r\nPRODID:acme\r\n"));
}

#[test]
fn line_without_colon_is_skipped() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:prodid\r\n\
bad-line\r\n\
SUMMARY:after\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert_eq!(document.warnings.len(), 1);
    assert_eq!(document.warnings[0].line, Some(4));
    assert_eq!(document.calendar.root.properties.len(), 3);
}

#[test]
fn scribe_warning_keeps_property() {
    let (document, count) = fixed_outcome_document(Outcome::Warn);
    assert_eq!(count, 1);
    assert_eq!(document.warnings[0].property.as_deref(), Some("X-FIXED"));
    assert_eq!(document.warnings[0].component.as_deref(), Some("VCALENDAR"));

    let property = document.calendar.root.get_property("X-FIXED").unwrap();
    assert_eq!(property.as_text(), Some("value"));
    assert!(!property.params.contains("X-CONSUMED"));
}

#[test]
fn skipped_property_is_dropped() {
    let (document, count) = fixed_outcome_document(Outcome::Skip);
    assert_eq!(count, 1);
    assert!(document.warnings[0].message.contains("unusable"));
    assert!(document.calendar.root.get_property("X-FIXED").is_none());
}

#[test]
fn unparseable_property_is_kept_raw() {
    let (document, count) = fixed_outcome_document(Outcome::CannotParse);
    assert_eq!(count, 1);

    let property = document.calendar.root.get_property("X-FIXED").unwrap();
    assert_eq!(property.value.as_unknown(), Some("value"));
    assert_eq!(property.get_param_value("X-CONSUMED"), Some("1"));
}

#[test]
fn warnings_reset_between_documents() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
END:BOGUS\r\n\
END:VCALENDAR\r\n\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
END:VCALENDAR\r\n";

    let mut reader = ICalReader::from_text(input);
    reader.read_next().unwrap().unwrap();
    assert_eq!(reader.warnings().len(), 1);
    reader.read_next().unwrap().unwrap();
    assert!(reader.warnings().is_empty());
}

#[test]
fn builtin_value_errors_keep_raw_text() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART:not-a-date\r\n\
PRIORITY;X-A=b:high\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert_eq!(document.warnings.len(), 2);
    let event = document.calendar.events()[0];
    assert_eq!(
        event.get_property(names::DTSTART).unwrap().value.as_unknown(),
        Some("not-a-date")
    );
    let priority = event.get_property(names::PRIORITY).unwrap();
    assert!(priority.is_raw());
    assert_eq!(priority.get_param_value("X-A"), Some("b"));
}

#[test]
fn valueless_parameters_become_type() {
    let template = |version: &str| {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:{version}\r\nPRODID;PARAM:prodid\r\nEND:VCALENDAR\r\n"
        )
    };

    let legacy = parse_all(&template("1.0")).unwrap().remove(0);
    assert!(legacy.warnings.is_empty());
    let prodid = legacy.calendar.root.get_property(names::PRODID).unwrap();
    assert_eq!(prodid.params.get_all("TYPE"), ["PARAM"]);
    assert!(prodid.params.valueless().is_empty());

    let modern = parse_all(&template("2.0")).unwrap().remove(0);
    assert_eq!(modern.warnings.len(), 1);
    let prodid = modern.calendar.root.get_property(names::PRODID).unwrap();
    assert_eq!(prodid.params.get_all("TYPE"), ["PARAM"]);
}

#[test]
fn declared_data_types() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20240101\r\n\
ATTACH;VALUE=BINARY;ENCODING=BASE64:aGVsbG8=\r\n\
X-SIZE;VALUE=INTEGER:12\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert!(document.warnings.is_empty());
    let event = document.calendar.events()[0];

    let start = event.get_property(names::DTSTART).unwrap();
    assert_eq!(start.as_date(), Some(&Date::new(2024, 1, 1)));
    assert!(!start.params.contains("VALUE"));

    let attach = event.get_property(names::ATTACH).unwrap();
    assert_eq!(attach.value, Value::Binary(b"hello".to_vec()));

    let size = event.get_property("X-SIZE").unwrap();
    assert_eq!(size.value.as_unknown(), Some("12"));
    assert_eq!(size.data_type, Some(DataType::Integer));
    assert!(!size.params.contains("VALUE"));
}

#[test]
fn utf8_text() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:\u{dc}ml\u{e4}ut und \u{65e5}\u{672c}\u{8a9e}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert_eq!(
        document.calendar.events()[0].summary(),
        Some("\u{dc}ml\u{e4}ut und \u{65e5}\u{672c}\u{8a9e}")
    );
}

#[test]
fn deeply_nested_components() {
    const DEPTH: usize = 100_000;
    let mut input = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
    for _ in 0..DEPTH {
        input.push_str("BEGIN:VEVENT\r\n");
    }
    for _ in 0..DEPTH {
        input.push_str("END:VEVENT\r\n");
    }
    input.push_str("END:VCALENDAR\r\n");

    let document = parse_all(&input).unwrap().remove(0);
    assert!(document.warnings.is_empty());

    let mut depth = 0;
    let mut current = &document.calendar.root;
    while let Some(child) = current.children.first() {
        depth += 1;
        current = child;
    }
    assert_eq!(depth, DEPTH);
}

#[test]
fn attendee_vocabularies_agree() {
    let modern = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
ATTENDEE;ROLE=OPT-PARTICIPANT:mailto:guest@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let legacy = "\
BEGIN:VCALENDAR\r\n\
VERSION:1.0\r\n\
BEGIN:VEVENT\r\n\
ATTENDEE;EXPECT=REQUEST:guest@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let attendee = |input: &str| -> Attendee {
        let document = parse_all(input).unwrap().remove(0);
        assert!(document.warnings.is_empty());
        let event = document.calendar.events()[0];
        let property = event.get_property(names::ATTENDEE).unwrap();
        assert!(property.params.is_empty());
        property.value.as_attendee().cloned().unwrap()
    };

    let expected = Attendee {
        level: Some(ParticipationLevel::Optional),
        ..Attendee::with_email("guest@example.com")
    };
    assert_eq!(attendee(modern), expected);
    assert_eq!(attendee(legacy), expected);
}

#[test]
fn streams_from_buffered_source() {
    let mut input = String::new();
    for i in 0..3 {
        write!(
            input,
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nUID:{i}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        )
        .unwrap();
    }

    let reader = ICalReader::new(std::io::BufReader::new(input.as_bytes()), ReaderOptions::default());
    let uids: Vec<String> = reader
        .into_documents()
        .map(|document| document.unwrap().calendar.uids()[0].to_string())
        .collect();
    assert_eq!(uids, ["0", "1", "2"]);
}

#[test]
fn utc_offsets_in_modern_timezone() {
    let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Test\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19701025T030000\r\n\
TZOFFSETFROM:+0200\r\n\
TZOFFSETTO:+0100\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
END:VCALENDAR\r\n";

    let document = parse_all(input).unwrap().remove(0);
    assert!(document.warnings.is_empty());
    let standard = document.calendar.timezones()[0]
        .first_child(ComponentKind::Standard)
        .unwrap();
    assert_eq!(
        standard.get_property(names::TZOFFSETTO).unwrap().value.as_utc_offset(),
        Some(UtcOffset::new(false, 1, 0, 0))
    );
}
