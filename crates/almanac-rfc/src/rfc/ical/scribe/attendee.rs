//! ATTENDEE and ORGANIZER.
//!
//! Parameters that describe the calendar user are lifted into the value and
//! removed from the property, then written back in the target version's
//! vocabulary: `ROLE`/`PARTSTAT`/`RSVP=TRUE` with a `mailto:` address in
//! 2.0, `EXPECT`/`STATUS`/`RSVP=YES` with `Name <email>` in 1.0.

use super::{ParseContext, PropertyScribe, ScribeError};
use crate::rfc::ical::build::render_boolean;
use crate::rfc::ical::core::{
    Attendee, DataType, ICalVersion, Organizer, Parameters, ParticipationLevel,
    ParticipationStatus, Property, Value, param_names,
};
use crate::rfc::ical::parse::parse_boolean;

/// Splits an address into (name, email, uri).
fn parse_address(value: &str, version: ICalVersion) -> (Option<String>, Option<String>, Option<String>) {
    let value = value.trim();
    if let Some(email) = value
        .get(..7)
        .filter(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
        .and_then(|_| value.get(7..))
    {
        return (None, Some(email.to_string()), None);
    }

    if version.is_legacy() {
        if let (Some(open), true) = (value.rfind('<'), value.ends_with('>')) {
            let name = value[..open].trim();
            let email = value[open + 1..value.len() - 1].trim();
            let name = (!name.is_empty()).then(|| name.to_string());
            return (name, Some(email.to_string()), None);
        }
        if value.contains('@') && !value.contains(':') {
            return (None, Some(value.to_string()), None);
        }
    }
    (None, None, Some(value.to_string()))
}

fn take_first(params: &mut Parameters, name: &str) -> Option<String> {
    params.remove(name).into_iter().next()
}

/// Removes `RSVP` if it holds a boolean; anything else stays as a parameter.
fn take_rsvp(params: &mut Parameters, ctx: &mut ParseContext) -> Option<bool> {
    let raw = params.get(param_names::RSVP)?;
    match parse_boolean(raw, ctx.line, 1) {
        Ok(rsvp) => {
            params.remove(param_names::RSVP);
            Some(rsvp)
        }
        Err(_) => {
            ctx.warn(format!("unrecognized RSVP value \"{raw}\""));
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttendeeScribe;

impl PropertyScribe for AttendeeScribe {
    fn name(&self) -> &str {
        "ATTENDEE"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::CalAddress)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let (name, email, uri) = parse_address(value, ctx.version);
        let mut attendee = Attendee {
            common_name: take_first(params, param_names::CN).or(name),
            email,
            uri,
            ..Attendee::default()
        };

        if ctx.version.is_legacy() {
            attendee.level =
                take_first(params, param_names::EXPECT).map(|e| ParticipationLevel::from_expect(&e));
            attendee.role = take_first(params, param_names::ROLE);
            attendee.status =
                take_first(params, param_names::STATUS).map(|s| ParticipationStatus::from_legacy(&s));
        } else {
            if let Some(role) = take_first(params, param_names::ROLE) {
                match ParticipationLevel::from_role(&role) {
                    Some(level) => attendee.level = Some(level),
                    None => attendee.role = Some(role),
                }
            }
            attendee.status = take_first(params, param_names::PARTSTAT).map(ParticipationStatus::new);
        }
        attendee.rsvp = take_rsvp(params, ctx);

        Ok(Value::Attendee(Box::new(attendee)))
    }

    fn prepare_parameters(&self, property: &Property, version: ICalVersion) -> Parameters {
        let mut params = property.params.clone();
        let Some(attendee) = property.value.as_attendee() else {
            return params;
        };

        if version.is_legacy() {
            if attendee.email.is_none()
                && let Some(name) = &attendee.common_name
            {
                params.replace(param_names::CN, name);
            }
            if let Some(level) = &attendee.level {
                params.replace(param_names::EXPECT, level.as_expect());
            }
            if let Some(role) = &attendee.role {
                params.replace(param_names::ROLE, role);
            }
            if let Some(status) = &attendee.status {
                params.replace(param_names::STATUS, status.to_legacy());
            }
        } else {
            if let Some(name) = &attendee.common_name {
                params.replace(param_names::CN, name);
            }
            let role = attendee
                .role
                .as_deref()
                .or_else(|| attendee.level.as_ref().and_then(ParticipationLevel::as_role));
            if let Some(role) = role {
                params.replace(param_names::ROLE, role);
            }
            if let Some(status) = &attendee.status {
                params.replace(param_names::PARTSTAT, status.as_str());
            }
        }
        if let Some(rsvp) = attendee.rsvp {
            params.replace(param_names::RSVP, render_boolean(rsvp, version));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrganizerScribe;

impl PropertyScribe for OrganizerScribe {
    fn name(&self) -> &str {
        "ORGANIZER"
    }

    fn default_data_type(&self, _version: ICalVersion) -> Option<DataType> {
        Some(DataType::CalAddress)
    }

    fn parse_text(
        &self,
        value: &str,
        _data_type: Option<&DataType>,
        params: &mut Parameters,
        ctx: &mut ParseContext,
    ) -> Result<Value, ScribeError> {
        let (name, email, uri) = parse_address(value, ctx.version);
        Ok(Value::Organizer(Box::new(Organizer {
            common_name: take_first(params, param_names::CN).or(name),
            email,
            uri,
        })))
    }

    fn prepare_parameters(&self, property: &Property, version: ICalVersion) -> Parameters {
        let mut params = property.params.clone();
        if let Value::Organizer(organizer) = &property.value
            && let Some(name) = &organizer.common_name
            && (!version.is_legacy() || organizer.email.is_none())
        {
            params.replace(param_names::CN, name);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str, params: &mut Parameters, version: ICalVersion) -> (Attendee, ParseContext) {
        let mut ctx = ParseContext::new(version, 1);
        let value = AttendeeScribe
            .parse_text(value, None, params, &mut ctx)
            .unwrap();
        (value.as_attendee().unwrap().clone(), ctx)
    }

    #[test]
    fn v2_parameters_are_lifted() {
        let mut params = Parameters::new();
        params.put("ROLE", "OPT-PARTICIPANT");
        params.put("PARTSTAT", "accepted");
        params.put("RSVP", "TRUE");
        params.put("CN", "John Doe");
        params.put("X-OTHER", "kept");

        let (attendee, ctx) = parse("mailto:jdoe@example.com", &mut params, ICalVersion::V2_0);
        assert_eq!(attendee.level, Some(ParticipationLevel::Optional));
        assert_eq!(attendee.status, Some(ParticipationStatus::new("ACCEPTED")));
        assert_eq!(attendee.rsvp, Some(true));
        assert_eq!(attendee.common_name.as_deref(), Some("John Doe"));
        assert_eq!(attendee.email.as_deref(), Some("jdoe@example.com"));
        assert!(ctx.warnings.is_empty());
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("X-OTHER"), Some("kept"));
    }

    #[test]
    fn v1_vocabulary_matches_v2() {
        let mut v2_params = Parameters::new();
        v2_params.put("ROLE", "OPT-PARTICIPANT");
        let (v2, _) = parse("mailto:a@example.com", &mut v2_params, ICalVersion::V2_0);

        let mut v1_params = Parameters::new();
        v1_params.put("EXPECT", "REQUEST");
        v1_params.put("STATUS", "NEEDS ACTION");
        v1_params.put("RSVP", "YES");
        let (v1, _) = parse("John Doe <a@example.com>", &mut v1_params, ICalVersion::V1_0);

        assert_eq!(v1.level, v2.level);
        assert_eq!(v1.email, v2.email);
        assert_eq!(v1.common_name.as_deref(), Some("John Doe"));
        assert_eq!(v1.status, Some(ParticipationStatus::new("NEEDS-ACTION")));
        assert_eq!(v1.rsvp, Some(true));
        assert!(v1_params.is_empty());
    }

    #[test]
    fn chair_role_is_not_a_level() {
        let mut params = Parameters::new();
        params.put("ROLE", "CHAIR");
        let (attendee, _) = parse("mailto:a@example.com", &mut params, ICalVersion::V2_0);
        assert_eq!(attendee.role.as_deref(), Some("CHAIR"));
        assert_eq!(attendee.level, None);
    }

    #[test]
    fn invalid_rsvp_stays() {
        let mut params = Parameters::new();
        params.put("RSVP", "maybe");
        let (attendee, ctx) = parse("mailto:a@example.com", &mut params, ICalVersion::V2_0);
        assert_eq!(attendee.rsvp, None);
        assert_eq!(params.get("RSVP"), Some("maybe"));
        assert_eq!(ctx.warnings.len(), 1);
    }

    #[test]
    fn non_mail_uri() {
        let (attendee, _) = parse(
            "http://example.com/jdoe",
            &mut Parameters::new(),
            ICalVersion::V2_0,
        );
        assert_eq!(attendee.uri.as_deref(), Some("http://example.com/jdoe"));
        assert_eq!(attendee.email, None);
    }

    #[test]
    fn parameters_per_version() {
        let attendee = Attendee {
            common_name: Some("John Doe".to_string()),
            email: Some("jdoe@example.com".to_string()),
            level: Some(ParticipationLevel::Required),
            status: Some(ParticipationStatus::new("NEEDS-ACTION")),
            rsvp: Some(false),
            ..Attendee::default()
        };
        let property = Property::new("ATTENDEE", Value::Attendee(Box::new(attendee)));

        let v2 = AttendeeScribe.prepare_parameters(&property, ICalVersion::V2_0);
        assert_eq!(v2.get("ROLE"), Some("REQ-PARTICIPANT"));
        assert_eq!(v2.get("PARTSTAT"), Some("NEEDS-ACTION"));
        assert_eq!(v2.get("RSVP"), Some("FALSE"));
        assert_eq!(v2.common_name(), Some("John Doe"));

        let v1 = AttendeeScribe.prepare_parameters(&property, ICalVersion::V1_0);
        assert_eq!(v1.get("EXPECT"), Some("REQUIRE"));
        assert_eq!(v1.get("STATUS"), Some("NEEDS ACTION"));
        assert_eq!(v1.get("RSVP"), Some("NO"));
        assert_eq!(v1.common_name(), None);
        assert!(!v1.contains("ROLE"));
    }

    #[test]
    fn chair_wins_over_level() {
        let attendee = Attendee {
            role: Some("CHAIR".to_string()),
            level: Some(ParticipationLevel::Optional),
            ..Attendee::with_email("a@example.com")
        };
        let property = Property::new("ATTENDEE", Value::Attendee(Box::new(attendee)));
        let v2 = AttendeeScribe.prepare_parameters(&property, ICalVersion::V2_0);
        assert_eq!(v2.get_all("ROLE"), ["CHAIR"]);
    }

    #[test]
    fn organizer_common_name() {
        let mut params = Parameters::new();
        params.put("CN", "Boss");
        let mut ctx = ParseContext::new(ICalVersion::V2_0, 1);
        let value = OrganizerScribe
            .parse_text("mailto:boss@example.com", None, &mut params, &mut ctx)
            .unwrap();
        assert!(params.is_empty());
        let property = Property::new("ORGANIZER", value);
        let written = OrganizerScribe.prepare_parameters(&property, ICalVersion::V2_0);
        assert_eq!(written.common_name(), Some("Boss"));
    }
}
