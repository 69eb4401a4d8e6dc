//! Log redaction for patient attributes and identifiers.
//!
//! Log output passes through [`SanitizingMakeWriter`], which replaces:
//! - Clinical key/value pairs (`age=70`, `"bmi": 32.0`, `smoking_status=smokes`)
//! - UUIDs
//! - E-mail addresses and phone numbers
//! - SSN and MRN shaped identifiers
//!
//! Application code should not log raw records in the first place; this is the
//! net underneath that rule. Input is capped at `STROKECHECK_SANITIZE_MAX_BYTES`
//! (default 16 KiB) per line.

use regex::{Regex, RegexSet};
use std::io::Write;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// Attribute names of a patient record, in both field and display spelling.
const CLINICAL_KEYS: &str =
    "age|bmi|avg_glucose_level|glucose|hypertension|heart_disease|smoking_status|smoking|work_type|gender";

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct Redactions {
    set: RegexSet,
    rules: Vec<Redaction>,
}

static REDACTIONS: OnceLock<Redactions> = OnceLock::new();

fn redactions() -> &'static Redactions {
    REDACTIONS.get_or_init(|| {
        let clinical = format!(
            r#"(?i)"?\b({CLINICAL_KEYS})\b"?\s*[:=]\s*(?:"[^"]*"|[A-Za-z0-9_.\-]+)"#
        );
        let rules: Vec<(String, &'static str)> = vec![
            (clinical, "$1=[REDACTED]"),
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}"
                    .to_string(),
                "[REDACTED-UUID]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b"
                    .to_string(),
                "[REDACTED-EMAIL]",
            ),
            (r"\b\d{3}-\d{2}-\d{4}\b".to_string(), "[REDACTED-SSN]"),
            (r"\bMRN[:\s]?\d{6,10}\b".to_string(), "[REDACTED-MRN]"),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b".to_string(),
                "[REDACTED-PHONE]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| p.as_str()))
            .expect("Valid redaction set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Redaction {
                regex: Regex::new(&pattern).expect("Valid redaction regex"),
                replacement,
            })
            .collect();

        Redactions { set, rules }
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("STROKECHECK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact patient attributes and identifiers from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let redactions = redactions();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = prefix.to_string();
    for idx in redactions.set.matches(prefix).into_iter() {
        let rule = &redactions.rules[idx];
        out = rule.regex.replace_all(&out, rule.replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// Check whether a string carries anything [`sanitize`] would redact.
#[must_use]
pub fn contains_sensitive(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    redactions().set.is_match(prefix)
}

/// A `tracing_subscriber` writer factory that redacts each formatted log line
/// before it reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer forever.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.pending);
            self.emit(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_complete_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_complete_lines()?;
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.emit(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
