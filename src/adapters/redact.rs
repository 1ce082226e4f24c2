//! Log redaction for patient identifiers.
//!
//! Assessment logs only carry summary counts, but an identifier can still
//! slip into an error message (a file name holding an MRN, for example).
//! `RedactingMakeWriter` wraps any `tracing_subscriber` writer and scrubs
//! each formatted line before it reaches the sink.
//!
//! Lines longer than `CARDIORISK_REDACT_MAX_BYTES` (default 16 KiB) are
//! truncated before scanning.

use std::io::Write;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_REDACT_MAX_BYTES: usize = 16 * 1024;

static RULES: OnceLock<Rules> = OnceLock::new();

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        let table: [(&str, &'static str); 5] = [
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
            (r"(?i)\bMRN[:\s_-]?\d{6,10}\b", "[REDACTED-MRN]"),
            (
                r"(?i)\b[a-z0-9][a-z0-9._%+-]{0,63}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        let set = RegexSet::new(table.iter().map(|(pattern, _)| *pattern))
            .expect("redaction patterns are valid");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("redaction pattern is valid"),
                replacement,
            })
            .collect();
        Rules { set, rules }
    })
}

fn max_redact_bytes() -> usize {
    std::env::var("CARDIORISK_REDACT_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_REDACT_MAX_BYTES)
}

/// Longest prefix of `input` within `max_bytes` that ends on a char boundary.
fn clip(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace every identifier in `input` with a placeholder.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, max_redact_bytes())
}

fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (text, clipped) = clip(input, max_bytes);

    let mut out = text.to_string();
    for idx in rules.set.matches(text).into_iter() {
        let rule = &rules.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }
    if clipped {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Whether `input` contains anything [`redact`] would replace.
#[must_use]
pub fn contains_identifier(input: &str) -> bool {
    let (text, _) = clip(input, max_redact_bytes());
    rules().set.is_match(text)
}

/// `MakeWriter` that redacts each log line before writing it.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Buffers bytes until a full line is available, then writes it redacted.
pub struct RedactingWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> RedactingWriter<W> {
    fn write_redacted(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.write_redacted(&line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.pending.len() > max_redact_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.pending);
            self.write_redacted(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.write_redacted(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_uuid() {
        let out = redact("loaded patient 550e8400-e29b-41d4-a716-446655440000");
        assert!(out.contains("[REDACTED-UUID]"));
        assert!(!out.contains("550e8400"));
    }

    #[test]
    fn test_redacts_mrn_and_ssn() {
        let out = redact("file MRN:12345678 ssn 123-45-6789");
        assert!(out.contains("[REDACTED-MRN]"));
        assert!(out.contains("[REDACTED-SSN]"));
    }

    #[test]
    fn test_redacts_email_and_phone() {
        let out = redact("contact jane.doe@clinic.org or 555-123-4567");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_leaves_assessment_summaries_alone() {
        let line = "Assessment complete: 2 flags, 1 significant prediction, bp 150/95";
        assert!(!contains_identifier(line));
        assert_eq!(redact(line), line);
    }

    #[test]
    fn test_truncates_long_lines() {
        let out = redact_with_limit("héllo world", 2);
        assert_eq!(out, "h [TRUNCATED]");
    }

    #[test]
    fn test_writer_redacts_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = RedactingWriter {
                inner: &mut sink,
                pending: Vec::new(),
            };
            writer.write_all(b"first 123-45-").expect("write");
            writer.write_all(b"6789\nsecond line\n").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(sink).expect("utf8");
        assert_eq!(text, "first [REDACTED-SSN]\nsecond line\n");
    }
}
