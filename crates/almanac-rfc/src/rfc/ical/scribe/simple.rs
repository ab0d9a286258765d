//! Scribes for single-token values: text, integers, URIs, GEO, VERSION.

use std::ops::RangeInclusive;

use super::{ParseContext, PropertyScribe, ScribeError, WriteContext, parse_as};
use crate::rfc::ical::build::{list_separator, render_value};
use crate::rfc::ical::core::{
    DataType, ICalVersion, Parameters, Property, Value, Warning, param_names,
};
use crate::rfc::ical::parse::{parse_binary, parse_geo, parse_integer, split_list, unescape_text};

/// A TEXT property such as SUMMARY or UID.
#[derive(Debug, Clone)]
pub struct TextScribe {
    name: String,
}

impl TextScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for TextScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        match data_type {
            None | Some(DataType::Text) => Ok(Value::Text(unescape_text(value))),
            Some(other) => parse_as(value, other, params, ctx),
        }
    }
}

/// A multi-valued TEXT property such as CATEGORIES.
///
/// Values are separated by `,` in 2.0 and `;` in 1.0.
#[derive(Debug, Clone)]
pub struct TextListScribe {
    name: String,
}

impl TextListScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

impl PropertyScribe for TextListScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        if let Some(other) = data_type.filter(|t| **t != DataType::Text) {
            return parse_as(value, other, params, ctx);
        }
        let items = split_list(value, list_separator(ctx.version))
            .into_iter()
            .map(unescape_text)
            .collect();
        Ok(Value::TextList(items))
    }
}

/// An INTEGER property, optionally range-checked during validation.
#[derive(Debug, Clone)]
pub struct IntegerScribe {
    name: String,
    range: Option<RangeInclusive<i32>>,
}

impl IntegerScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            range: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.range = Some(range);
        self
    }
}

impl PropertyScribe for IntegerScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Integer)
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        match data_type {
            None | Some(DataType::Integer) => {
                Ok(Value::Integer(parse_integer(value, ctx.line, 1)?))
            }
            Some(other) => parse_as(value, other, params, ctx),
        }
    }

    fn validate(&self, property: &Property, _version: ICalVersion, warnings: &mut Vec<Warning>) {
        let (Some(range), Some(n)) = (&self.range, property.as_integer()) else {
            return;
        };
        if !range.contains(&n) {
            warnings.push(
                Warning::new(format!(
                    "value {n} is outside {}..={}",
                    range.start(),
                    range.end()
                ))
                .with_property(&self.name),
            );
        }
    }
}

/// A URI property. 1.0 calls the type URL.
#[derive(Debug, Clone)]
pub struct UriScribe {
    name: String,
}

impl UriScribe {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
        }
    }
}

fn uri_type(version: ICalVersion) -> DataType {
    if version.is_legacy() {
        DataType::Url
    } else {
        DataType::Uri
    }
}

impl PropertyScribe for UriScribe {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_data_type(&self, version: ICalVersion) -> Option<DataType> {
        Some(uri_type(version))
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        match data_type {
            None => Ok(Value::Uri(value.to_string())),
            Some(declared) if declared.is_uri_like() => Ok(Value::Uri(value.to_string())),
            Some(other) => parse_as(value, other, params, ctx),
        }
    }

    fn data_type(&self, property: &Property, version: ICalVersion) -> Option<DataType> {
        match property.value {
            Value::Uri(_) => Some(uri_type(version)),
            ref other => other.data_type(),
        }
    }
}

/// ATTACH: a URI, or inline base64 data marked with `ENCODING=BASE64`.
#[derive(Debug, Clone, Default)]
pub struct AttachScribe;

impl PropertyScribe for AttachScribe {
    fn name(&self) -> &str {
        "ATTACH"
    }

    fn default_data_type(&self, version: ICalVersion) -> Option<DataType> {
        Some(uri_type(version))
    }

    fn parse_text(
        &self,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let base64 = params
            .encoding()
            .is_some_and(|e| e.eq_ignore_ascii_case("BASE64") || e.eq_ignore_ascii_case("B"));
        if base64 || data_type == Some(&DataType::Binary) {
            let data = parse_binary(value, ctx.line, 1)?;
            params.remove(param_names::ENCODING);
            return Ok(Value::Binary(data));
        }
        match data_type {
            Some(other) if !other.is_uri_like() => parse_as(value, other, params, ctx),
            _ => Ok(Value::Uri(value.to_string())),
        }
    }

    fn prepare_parameters(&self, property: &Property, _version: ICalVersion) -> Parameters {
        let mut params = property.params.clone();
        if matches!(property.value, Value::Binary(_)) {
            params.replace(param_names::ENCODING, "BASE64");
        }
        params
    }

    fn data_type(&self, property: &Property, version: ICalVersion) -> Option<DataType> {
        match property.value {
            Value::Uri(_) => Some(uri_type(version)),
            ref other => other.data_type(),
        }
    }
}

/// GEO: latitude and longitude.
#[derive(Debug, Clone, Default)]
pub struct GeoScribe;

impl PropertyScribe for GeoScribe {
    fn name(&self) -> &str {
        "GEO"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Float)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        Ok(Value::Geo(parse_geo(value, ctx.line, 1)?))
    }
}

/// VERSION. The text is kept as read; writers replace it with the target
/// version.
#[derive(Debug, Clone, Default)]
pub struct VersionScribe;

impl PropertyScribe for VersionScribe {
    fn name(&self) -> &str {
        "VERSION"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::Text)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        _params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let value = value.trim();
        if ICalVersion::parse(value).is_none() {
            ctx.warn(format!("unrecognized version \"{value}\""));
        }
        Ok(Value::Text(value.to_string()))
    }

    fn write_text(&self, property: &Property, ctx: &WriteContext) -> String {
        match property.as_text() {
            Some(_) => ctx.version.as_str().to_string(),
            None => render_value(&property.value, ctx.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(
        scribe: &dyn PropertyScribe,
        value: &str,
        data_type: Option<&DataType>,
        params: &mut Parameters,
        version: ICalVersion,
    ) -> Result<Value, ScribeError> {
        let mut ctx = ParseContext::new(version, 1);
        scribe.parse_text(value, data_type, params, &mut ctx)
    }

    #[test]
    fn text_unescapes() {
        let scribe = TextScribe::new("summary");
        assert_eq!(scribe.name(), "SUMMARY");
        let value = parse(&scribe, "a\\, b\\nc", None, &mut Parameters::new(), ICalVersion::V2_0);
        assert_eq!(value, Ok(Value::Text("a, b\nc".to_string())));
    }

    #[test]
    fn text_honours_declared_type() {
        let scribe = TextScribe::new("X-WHEN");
        let value = parse(
            &scribe,
            "20200101",
            Some(&DataType::Date),
            &mut Parameters::new(),
            ICalVersion::V2_0,
        );
        assert!(matches!(value, Ok(Value::Date(_))));
    }

    #[test]
    fn text_list_separator_per_version() {
        let scribe = TextListScribe::new("CATEGORIES");
        let v2 = parse(&scribe, "a,b\\,c", None, &mut Parameters::new(), ICalVersion::V2_0);
        assert_eq!(
            v2,
            Ok(Value::TextList(vec!["a".to_string(), "b,c".to_string()]))
        );
        let v1 = parse(&scribe, "a;b", None, &mut Parameters::new(), ICalVersion::V1_0);
        assert_eq!(
            v1,
            Ok(Value::TextList(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn integer_range_validation() {
        let scribe = IntegerScribe::new("PRIORITY").with_range(0..=9);
        let mut warnings = Vec::new();
        scribe.validate(&Property::integer("PRIORITY", 5), ICalVersion::V2_0, &mut warnings);
        assert!(warnings.is_empty());
        scribe.validate(&Property::integer("PRIORITY", 12), ICalVersion::V2_0, &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].property.as_deref(), Some("PRIORITY"));
    }

    #[test]
    fn integer_rejects_text() {
        let scribe = IntegerScribe::new("SEQUENCE");
        let value = parse(&scribe, "one", None, &mut Parameters::new(), ICalVersion::V2_0);
        assert!(matches!(value, Err(ScribeError::CannotParse(_))));
    }

    #[test]
    fn uri_type_name_per_version() {
        let scribe = UriScribe::new("URL");
        let property = Property::new("URL", Value::Uri("http://example.com".into()));
        assert_eq!(scribe.data_type(&property, ICalVersion::V2_0), Some(DataType::Uri));
        assert_eq!(scribe.data_type(&property, ICalVersion::V1_0), Some(DataType::Url));
        assert_eq!(scribe.default_data_type(ICalVersion::V1_0), Some(DataType::Url));
    }

    #[test]
    fn attach_binary_round() {
        let mut params = Parameters::new();
        params.put("ENCODING", "BASE64");
        let value = parse(
            &AttachScribe,
            "aGVsbG8=",
            Some(&DataType::Binary),
            &mut params,
            ICalVersion::V2_0,
        )
        .unwrap();
        assert_eq!(value, Value::Binary(b"hello".to_vec()));
        assert!(params.is_empty());

        let property = Property::new("ATTACH", value);
        let written = AttachScribe.prepare_parameters(&property, ICalVersion::V2_0);
        assert_eq!(written.encoding(), Some("BASE64"));
        assert_eq!(
            AttachScribe.data_type(&property, ICalVersion::V2_0),
            Some(DataType::Binary)
        );
    }

    #[test]
    fn geo_accepts_both_separators() {
        let v2 = parse(&GeoScribe, "1.5;-2", None, &mut Parameters::new(), ICalVersion::V2_0);
        let v1 = parse(&GeoScribe, "1.5,-2", None, &mut Parameters::new(), ICalVersion::V1_0);
        assert_eq!(v2, v1);
    }

    #[test]
    fn version_rewritten_for_target() {
        let property = Property::text("VERSION", "1.0");
        let ctx = WriteContext {
            version: ICalVersion::V2_0,
        };
        assert_eq!(VersionScribe.write_text(&property, &ctx), "2.0");

        let mut ctx = ParseContext::new(ICalVersion::V2_0, 1);
        let value = VersionScribe.parse_text("3.0", None, &mut Parameters::new(), &mut ctx);
        assert_eq!(value, Ok(Value::Text("3.0".to_string())));
        assert_eq!(ctx.warnings.len(), 1);
    }
}
