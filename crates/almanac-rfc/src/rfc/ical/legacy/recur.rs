//! vCalendar 1.0 recurrence grammar (vCalendar 1.0 §3.9.4).
//!
//! A 1.0 rule is a space-separated list of groups, each introduced by a
//! frequency head with its interval (`D2`, `W1`, `MP1`, `MD1`, `YD1`,
//! `YM1`, `M15`) and followed by modifiers and an optional terminator
//! (`#count`, `#0` for forever, or an end date). Every group becomes its
//! own [`RRule`]. Unrecognized tokens are reported and skipped.

use crate::rfc::ical::core::{Frequency, RRule, Weekday, WeekdayNum};
use crate::rfc::ical::parse::{ParseError, ParseErrorKind, ParseResult, parse_until};

/// Occurrence count of a group that names neither a count nor an end.
const DEFAULT_COUNT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Head {
    Minutely,
    Daily,
    Weekly,
    MonthlyByPosition,
    MonthlyByDay,
    YearlyByDay,
    YearlyByMonth,
}

impl Head {
    const PREFIXES: [(&'static str, Self); 7] = [
        ("MP", Self::MonthlyByPosition),
        ("MD", Self::MonthlyByDay),
        ("YD", Self::YearlyByDay),
        ("YM", Self::YearlyByMonth),
        ("D", Self::Daily),
        ("W", Self::Weekly),
        ("M", Self::Minutely),
    ];

    /// Largest position magnitude the group accepts, `None` if it takes no
    /// positions.
    const fn max_ordinal(self) -> Option<i16> {
        match self {
            Self::MonthlyByPosition => Some(53),
            Self::MonthlyByDay => Some(31),
            Self::YearlyByDay => Some(366),
            _ => None,
        }
    }

    const fn frequency(self) -> Frequency {
        match self {
            Self::Minutely => Frequency::Minutely,
            Self::Daily => Frequency::Daily,
            Self::Weekly => Frequency::Weekly,
            Self::MonthlyByPosition | Self::MonthlyByDay => Frequency::Monthly,
            Self::YearlyByDay | Self::YearlyByMonth => Frequency::Yearly,
        }
    }

    /// Recognizes a group head such as `MD2`; an absent interval means 1.
    fn parse(token: &str) -> Option<(Self, u32)> {
        Self::PREFIXES.iter().find_map(|&(prefix, head)| {
            let rest = token.strip_prefix(prefix)?;
            if rest.is_empty() {
                return Some((head, 1));
            }
            if !rest.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            rest.parse::<u32>().ok().map(|n| (head, n.max(1)))
        })
    }
}

/// One group being assembled.
struct Group {
    head: Head,
    rule: RRule,
    ordinals: Vec<i8>,
    last_was_weekday: bool,
    terminated: bool,
}

impl Group {
    fn new(head: Head, interval: u32) -> Self {
        Self {
            head,
            rule: RRule::new(head.frequency()).with_interval(interval),
            ordinals: Vec::new(),
            last_was_weekday: false,
            terminated: false,
        }
    }

    fn finish(mut self) -> RRule {
        if !self.terminated {
            self.rule.count = Some(DEFAULT_COUNT);
        }
        self.rule
    }

    fn apply(&mut self, token: &str, line: usize, warnings: &mut Vec<String>) {
        let was_weekday = std::mem::replace(&mut self.last_was_weekday, false);

        if let Some(count) = token.strip_prefix('#') {
            match count.parse::<u32>() {
                Ok(0) => self.terminate(None),
                Ok(n) => self.terminate(Some(n)),
                Err(_) => warnings.push(format!("ignoring bad occurrence count \"{token}\"")),
            }
            return;
        }

        if token.len() >= 8 && token.as_bytes()[..8].iter().all(u8::is_ascii_digit) {
            match parse_until(token, line, 1) {
                Ok(until) => {
                    self.rule.until = Some(until);
                    self.terminated = true;
                }
                Err(e) => warnings.push(format!("ignoring end date \"{token}\": {}", e.kind)),
            }
            return;
        }

        if let Some(ordinal) = parse_ordinal(token) {
            let Some(max) = self.head.max_ordinal() else {
                warnings.push(format!("ignoring position \"{token}\" in a {:?} rule", self.head));
                return;
            };
            if ordinal.abs() > max {
                warnings.push(format!("ignoring out-of-range position \"{token}\""));
                return;
            }
            match (self.head, i8::try_from(ordinal)) {
                (Head::YearlyByDay, _) => self.rule.by_yearday.push(ordinal),
                (Head::MonthlyByPosition, Ok(ordinal)) => {
                    if was_weekday {
                        self.ordinals.clear();
                    }
                    self.ordinals.push(ordinal);
                }
                (Head::MonthlyByDay, Ok(ordinal)) => self.rule.by_monthday.push(ordinal),
                // bounded by max_ordinal
                _ => {}
            }
            return;
        }

        if token == "LD" && self.head == Head::MonthlyByDay {
            self.rule.by_monthday.push(-1);
            return;
        }

        if let Some(weekday) = Weekday::parse(token) {
            match self.head {
                Head::Weekly => self.rule.by_day.push(WeekdayNum::every(weekday)),
                Head::MonthlyByPosition if self.ordinals.is_empty() => {
                    self.rule.by_day.push(WeekdayNum::every(weekday));
                }
                Head::MonthlyByPosition => {
                    for &ordinal in &self.ordinals {
                        self.rule.by_day.push(WeekdayNum::nth(ordinal, weekday));
                    }
                }
                _ => warnings.push(format!("ignoring weekday \"{token}\" in a {:?} rule", self.head)),
            }
            self.last_was_weekday = true;
            return;
        }

        if token.bytes().all(|b| b.is_ascii_digit()) && self.apply_number(token) {
            return;
        }

        warnings.push(format!("ignoring unrecognized recurrence token \"{token}\""));
    }

    /// Applies a bare number; returns `false` if the group has no use for it.
    fn apply_number(&mut self, token: &str) -> bool {
        match self.head {
            Head::MonthlyByDay => match token.parse::<i8>() {
                Ok(day @ 1..=31) => self.rule.by_monthday.push(day),
                _ => return false,
            },
            Head::YearlyByDay => match token.parse::<i16>() {
                Ok(day @ 1..=366) => self.rule.by_yearday.push(day),
                _ => return false,
            },
            Head::YearlyByMonth => match token.parse::<u8>() {
                Ok(month @ 1..=12) => self.rule.by_month.push(month),
                _ => return false,
            },
            Head::Daily | Head::Weekly | Head::Minutely if token.len() == 4 => {
                let (Ok(hour @ 0..=23), Ok(minute @ 0..=59)) =
                    (token[..2].parse::<u8>(), token[2..].parse::<u8>())
                else {
                    return false;
                };
                if !self.rule.by_hour.contains(&hour) {
                    self.rule.by_hour.push(hour);
                }
                if !self.rule.by_minute.contains(&minute) {
                    self.rule.by_minute.push(minute);
                }
            }
            _ => return false,
        }
        true
    }

    fn terminate(&mut self, count: Option<u32>) {
        self.rule.count = count;
        self.terminated = true;
    }
}

/// Parses `3+` or `200-` into a signed ordinal.
fn parse_ordinal(token: &str) -> Option<i16> {
    let (digits, negative) = match token.strip_suffix('+') {
        Some(d) => (d, false),
        None => (token.strip_suffix('-')?, true),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n = digits.parse::<i16>().ok().filter(|n| *n > 0)?;
    Some(if negative { -n } else { n })
}

/// Parses a 1.0 recurrence value into one rule per group.
///
/// Tokens are matched case-sensitively as the 1.0 grammar writes them,
/// except weekdays. A trailing `$` on a token is ignored.
///
/// ## Errors
/// Returns an error if the value holds no group at all.
pub fn parse_legacy_rrule(
    value: &str,
    line: usize,
    warnings: &mut Vec<String>,
) -> ParseResult<Vec<RRule>> {
    let mut rules = Vec::new();
    let mut current: Option<Group> = None;

    for token in value.split_whitespace() {
        let token = token.trim_end_matches('$');
        if token.is_empty() {
            continue;
        }

        if let Some((head, interval)) = Head::parse(token) {
            if let Some(group) = current.replace(Group::new(head, interval)) {
                rules.push(group.finish());
            }
            continue;
        }

        match current.as_mut() {
            Some(group) => group.apply(token, line, warnings),
            None => warnings.push(format!("ignoring \"{token}\" before any frequency")),
        }
    }
    if let Some(group) = current {
        rules.push(group.finish());
    }

    if rules.is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, 1)
            .with_context(format!("no recurrence group in \"{value}\"")));
    }
    Ok(rules)
}

/// Renders a rule in the 1.0 grammar.
///
/// Returns `None` for rules the grammar cannot express (no frequency, or
/// secondly); those are written in the 2.0 grammar instead. Hourly rules
/// become minutely rules with the interval scaled by 60.
#[must_use]
pub fn render_legacy_rrule(rule: &RRule) -> Option<String> {
    let interval = rule.interval.unwrap_or(1);
    let mut parts = Vec::new();

    match rule.freq? {
        Frequency::Secondly => return None,
        Frequency::Minutely => parts.push(format!("M{interval}")),
        Frequency::Hourly => parts.push(format!("M{}", interval.saturating_mul(60))),
        Frequency::Daily => {
            parts.push(format!("D{interval}"));
            push_times(rule, &mut parts);
        }
        Frequency::Weekly => {
            parts.push(format!("W{interval}"));
            push_times(rule, &mut parts);
            parts.extend(rule.by_day.iter().map(|d| d.weekday.to_string()));
        }
        Frequency::Monthly if !rule.by_day.is_empty() => {
            parts.push(format!("MP{interval}"));
            for day in &rule.by_day {
                if let Some(ordinal) = day.ordinal {
                    parts.push(render_ordinal(i16::from(ordinal)));
                }
                parts.push(day.weekday.to_string());
            }
        }
        Frequency::Monthly => {
            parts.push(format!("MD{interval}"));
            for &day in &rule.by_monthday {
                parts.push(match day {
                    -1 => "LD".to_string(),
                    d if d < 0 => render_ordinal(i16::from(d)),
                    d => d.to_string(),
                });
            }
        }
        Frequency::Yearly if !rule.by_yearday.is_empty() => {
            parts.push(format!("YD{interval}"));
            for &day in &rule.by_yearday {
                parts.push(if day < 0 {
                    render_ordinal(day)
                } else {
                    day.to_string()
                });
            }
        }
        Frequency::Yearly => {
            parts.push(format!("YM{interval}"));
            parts.extend(rule.by_month.iter().map(ToString::to_string));
        }
    }

    match (&rule.until, rule.count) {
        (_, Some(count)) => parts.push(format!("#{count}")),
        (Some(until), None) => parts.push(until.to_string()),
        (None, None) => parts.push("#0".to_string()),
    }
    Some(parts.join(" "))
}

/// Names the parts of `rule` that [`render_legacy_rrule`] has no room for
/// and leaves out. Empty when the rule is written in the 2.0 grammar.
#[must_use]
pub fn legacy_dropped_parts(rule: &RRule) -> Vec<&str> {
    let Some(freq) = rule.freq.filter(|f| *f != Frequency::Secondly) else {
        return Vec::new();
    };
    let times = matches!(freq, Frequency::Daily | Frequency::Weekly) && !rule.by_hour.is_empty();
    let by_position = freq == Frequency::Monthly && !rule.by_day.is_empty();
    let by_yearday = freq == Frequency::Yearly && !rule.by_yearday.is_empty();
    let weekly_days =
        freq == Frequency::Weekly && rule.by_day.iter().all(|d| d.ordinal.is_none());

    // (name, present, written)
    let parts = [
        ("BYSECOND", !rule.by_second.is_empty(), false),
        ("BYMINUTE", !rule.by_minute.is_empty(), times),
        ("BYHOUR", !rule.by_hour.is_empty(), times),
        ("BYDAY", !rule.by_day.is_empty(), by_position || weekly_days),
        ("BYMONTHDAY", !rule.by_monthday.is_empty(), freq == Frequency::Monthly && !by_position),
        ("BYYEARDAY", !rule.by_yearday.is_empty(), by_yearday),
        ("BYWEEKNO", !rule.by_weekno.is_empty(), false),
        ("BYMONTH", !rule.by_month.is_empty(), freq == Frequency::Yearly && !by_yearday),
        ("BYSETPOS", !rule.by_setpos.is_empty(), false),
        ("WKST", rule.wkst.is_some(), false),
    ];
    let mut dropped: Vec<&str> = parts
        .into_iter()
        .filter(|&(_, present, written)| present && !written)
        .map(|(name, ..)| name)
        .collect();
    dropped.extend(rule.x_rules.iter().map(|(name, _)| name.as_str()));
    dropped
}

fn render_ordinal(n: i16) -> String {
    if n < 0 {
        format!("{}-", n.unsigned_abs())
    } else {
        format!("{n}+")
    }
}

fn push_times(rule: &RRule, parts: &mut Vec<String>) {
    let minutes: &[u8] = if rule.by_minute.is_empty() {
        &[0]
    } else {
        &rule.by_minute
    };
    for hour in &rule.by_hour {
        for minute in minutes {
            parts.push(format!("{hour:02}{minute:02}"));
        }
    }
}
