//! Content line folding for iCalendar (RFC 5545 §3.1).

/// Default maximum line length in octets (not including CRLF).
pub const MAX_LINE_OCTETS: usize = 75;

/// Folds a content line and terminates it with CRLF.
///
/// Each physical line holds at most `max_octets` octets, the leading space
/// of continuation lines included. UTF-8 sequences are never split. A
/// `max_octets` of 0 disables folding.
#[must_use]
pub fn fold_line(line: &str, max_octets: usize) -> String {
    if max_octets == 0 || line.len() <= max_octets {
        return format!("{line}\r\n");
    }

    let mut result = String::with_capacity(line.len() + (line.len() / max_octets + 1) * 3);
    let mut pos = 0;
    let mut first_line = true;

    while pos < line.len() {
        // Continuation lines give one octet to the leading space
        let width = if first_line {
            max_octets
        } else {
            max_octets.saturating_sub(1).max(1)
        };

        let mut end = (pos + width).min(line.len());
        while end > pos && !line.is_char_boundary(end) {
            end -= 1;
        }
        if end == pos {
            // one character wider than the limit
            end = line[pos..]
                .chars()
                .next()
                .map_or(line.len(), |c| pos + c.len_utf8());
        }

        if !first_line {
            result.push(' ');
        }
        result.push_str(&line[pos..end]);
        result.push_str("\r\n");

        pos = end;
        first_line = false;
    }

    result
}
