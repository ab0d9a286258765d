//! Streaming line unfolding for iCalendar (RFC 5545 §3.1).
//!
//! Physical lines end at CR, LF or CRLF. A physical line starting with a
//! space or tab continues the previous logical line once that single
//! whitespace character is removed. Logical lines are built incrementally,
//! so memory stays linear in the input however many continuations appear.

use std::io::{self, BufRead, ErrorKind};

/// Pulls unfolded logical lines out of a buffered byte stream.
///
/// Yields `(line_number, text)` where the number is the 1-based physical
/// line on which the logical line starts. Blank lines are skipped.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    physical_line: usize,
    peeked: Option<(usize, String)>,
    /// The last physical line ended in CR at a buffer boundary; a leading LF
    /// in the next buffer belongs to it.
    skip_lf: bool,
    started: bool,
}

impl<R: BufRead> LineReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            physical_line: 0,
            peeked: None,
            skip_lf: false,
            started: false,
        }
    }

    /// Returns the next logical line, or `None` at end of input.
    ///
    /// ## Errors
    /// Propagates failures of the underlying reader.
    pub fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        let (number, mut text) = loop {
            match self.take_physical()? {
                None => return Ok(None),
                Some((_, line)) if line.is_empty() => {}
                Some(line) => break line,
            }
        };

        loop {
            match self.take_physical()? {
                Some((_, line)) if line.starts_with([' ', '\t']) => text.push_str(&line[1..]),
                Some(other) => {
                    self.peeked = Some(other);
                    break;
                }
                None => break,
            }
        }

        Ok(Some((number, text)))
    }

    /// Consumes the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn take_physical(&mut self) -> io::Result<Option<(usize, String)>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        let Some(bytes) = self.read_physical()? else {
            return Ok(None);
        };
        self.physical_line += 1;

        let mut text = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        if !self.started {
            self.started = true;
            if let Some(stripped) = text.strip_prefix('\u{feff}') {
                text = stripped.to_string();
            }
        }
        Ok(Some((self.physical_line, text)))
    }

    fn read_physical(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut bytes = Vec::new();
        let mut seen = false;

        loop {
            let buf = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(seen.then_some(bytes));
            }

            let mut start = 0;
            if self.skip_lf {
                self.skip_lf = false;
                if buf[0] == b'\n' {
                    start = 1;
                }
            }

            match buf[start..].iter().position(|&b| b == b'\r' || b == b'\n') {
                Some(pos) => {
                    let end = start + pos;
                    bytes.extend_from_slice(&buf[start..end]);
                    let mut consumed = end + 1;
                    if buf[end] == b'\r' {
                        match buf.get(consumed) {
                            Some(b'\n') => consumed += 1,
                            Some(_) => {}
                            None => self.skip_lf = true,
                        }
                    }
                    self.inner.consume(consumed);
                    return Ok(Some(bytes));
                }
                None => {
                    let len = buf.len();
                    if len > start {
                        seen = true;
                        bytes.extend_from_slice(&buf[start..]);
                    }
                    self.inner.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Unfolds a complete text into logical lines joined by CRLF.
#[must_use]
pub fn unfold(input: &str) -> String {
    LineReader::new(input.as_bytes())
        .filter_map(Result::ok)
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\r\n")
}
