//! Content line splitting and parameter decoding (RFC 5545 §3.1, §3.2,
//! RFC 6868).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameters};

/// Splits one unfolded line into name, parameters and raw value.
///
/// The name runs up to the first `;` or `:`. Parameter values may be quoted;
/// quoted values keep `:`, `;` and `,` literally. Bare tokens without `=`
/// land in the valueless slot. When `caret_decoding` is set, `^n`, `^^` and
/// `^'` inside parameter values are decoded.
///
/// ## Errors
/// Returns an error if the name is empty, a quote is never closed, or the
/// line has no unquoted colon.
pub fn parse_content_line(
    line: &str,
    line_num: usize,
    caret_decoding: bool,
) -> ParseResult<ContentLine> {
    let Some(name_end) = line.find([';', ':']) else {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    };

    let name = line[..name_end].trim();
    if name.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let mut params = Parameters::new();
    let colon = if line.as_bytes()[name_end] == b';' {
        parse_parameters(line, name_end + 1, &mut params, line_num, caret_decoding)?
    } else {
        name_end
    };

    let mut content = ContentLine::new(name, &line[colon + 1..]);
    content.params = params;
    Ok(content)
}

/// Parses the parameter segment starting at `pos`, returning the index of
/// the colon that ends it.
fn parse_parameters(
    line: &str,
    mut pos: usize,
    params: &mut Parameters,
    line_num: usize,
    caret_decoding: bool,
) -> ParseResult<usize> {
    let bytes = line.as_bytes();

    loop {
        let start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b'=' | b';' | b':') {
            pos += 1;
        }
        if pos >= bytes.len() {
            return Err(ParseError::new(
                ParseErrorKind::MissingColon,
                line_num,
                line.len(),
            ));
        }

        let name = line[start..pos].trim();
        if bytes[pos] != b'=' {
            // bare token such as `;HOME;` in vCal
            if !name.is_empty() {
                params.push_valueless(name);
            }
            if bytes[pos] == b':' {
                return Ok(pos);
            }
            pos += 1;
            continue;
        }

        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                start + 1,
            )
            .with_context("parameter without a name"));
        }

        pos += 1;
        loop {
            let (value, next) = read_param_value(line, pos, line_num)?;
            let value = if caret_decoding {
                decode_caret(&value)
            } else {
                value
            };
            params.put(name, value);
            pos = next;

            match bytes[pos] {
                b',' => pos += 1,
                b';' => {
                    pos += 1;
                    break;
                }
                _ => return Ok(pos),
            }
        }
    }
}

/// Reads one parameter value, returning it with the index of the delimiter
/// (`,`, `;` or `:`) that follows.
fn read_param_value(line: &str, mut pos: usize, line_num: usize) -> ParseResult<(String, usize)> {
    let bytes = line.as_bytes();
    let mut value = String::new();

    if bytes.get(pos) == Some(&b'"') {
        let Some(len) = line[pos + 1..].find('"') else {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedQuote,
                line_num,
                pos + 1,
            ));
        };
        value.push_str(&line[pos + 1..pos + 1 + len]);
        pos += len + 2;
    }

    // Text between a closing quote and the next delimiter is kept.
    let start = pos;
    while pos < bytes.len() && !matches!(bytes[pos], b',' | b';' | b':') {
        pos += 1;
    }
    if pos >= bytes.len() {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    }
    value.push_str(&line[start..pos]);
    Ok((value, pos))
}

/// Decodes RFC 6868 caret escapes. Unknown sequences are left as written.
#[must_use]
pub fn decode_caret(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                out.push('^');
                chars.next();
            }
            Some('n') => {
                out.push('\n');
                chars.next();
            }
            Some('\'') => {
                out.push('"');
                chars.next();
            }
            _ => out.push('^'),
        }
    }
    out
}
