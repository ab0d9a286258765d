//! iCalendar text and parameter escaping (RFC 5545 §3.3.11, RFC 6868).

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes: backslash, comma, semicolon, and newlines. A CR is dropped so
/// that CRLF and LF both become `\n`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Encodes a parameter value for output, quoting it when it holds `:`, `;`
/// or `,`.
///
/// With `caret_encoding`, `^`, newlines and double quotes become `^^`, `^n`
/// and `^'` (RFC 6868). Without it, characters that cannot appear in a
/// parameter value are replaced: double quotes by single quotes, newlines
/// by spaces.
#[must_use]
pub fn escape_param_value(s: &str, caret_encoding: bool) -> String {
    let mut encoded = String::with_capacity(s.len() + 2);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, caret_encoding) {
            ('^', true) => encoded.push_str("^^"),
            ('"', true) => encoded.push_str("^'"),
            ('"', false) => encoded.push('\''),
            ('\r' | '\n', _) => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                encoded.push_str(if caret_encoding { "^n" } else { " " });
            }
            _ => encoded.push(c),
        }
    }

    if needs_quoting(&encoded) {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.contains([':', ';', ','])
}
