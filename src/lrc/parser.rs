use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lrc::cue::{CueList, TimedCue};

// [mm:ss], [mm:ss.cc], [mm:ss.ccc], [hh:mm:ss], [hh:mm:ss.cc], [hh:mm:ss.ccc]
static TIME_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]{1,2}):([0-9]{1,2})(?::([0-9]{1,2}))?(?:\.([0-9]{1,3}))?\]")
        .expect("timestamp pattern is valid")
});

static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([a-zA-Z]+)\}\s*").expect("inline tag pattern is valid"));

/// Parser configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseOptions {
    /// Inline tags (without braces) that mark a cue as emphasized. Compared
    /// case-insensitively.
    pub emphasis_tags: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            emphasis_tags: vec!["chorus".to_string(), "sabi".to_string()],
        }
    }
}

impl ParseOptions {
    fn is_emphasis_tag(&self, tag: &str) -> bool {
        self.emphasis_tags
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

/// Parsed cues plus counters for the input that produced no cue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub cues: CueList,
    /// Non-blank lines without any timestamp tag.
    pub skipped_lines: usize,
    /// Timestamp tags whose text was empty after trimming (e.g. glued `][` tags).
    pub dropped_empty: usize,
}

/// Parse LRC text into time-ordered cues using the default emphasis tags.
///
/// Never fails: lines without a timestamp are skipped, empty cues are dropped, and an
/// empty input yields an empty list.
pub fn parse(raw: &str) -> CueList {
    parse_with(raw, &ParseOptions::default())
}

pub fn parse_with(raw: &str, opts: &ParseOptions) -> CueList {
    let report = parse_with_report(raw, opts);
    tracing::debug!(
        cues = report.cues.len(),
        skipped_lines = report.skipped_lines,
        dropped_empty = report.dropped_empty,
        "parsed lyric timing text"
    );
    report.cues
}

pub fn parse_with_report(raw: &str, opts: &ParseOptions) -> ParseReport {
    let normalized = normalize(raw);
    let mut cues = Vec::new();
    let mut skipped_lines = 0usize;
    let mut dropped_empty = 0usize;

    for line in normalized.split('\n') {
        let tags: Vec<Captures<'_>> = TIME_TAG.captures_iter(line).collect();
        if tags.is_empty() {
            if !line.trim().is_empty() {
                skipped_lines += 1;
            }
            continue;
        }

        for (i, caps) in tags.iter().enumerate() {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let text_end = tags
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(line.len(), |m| m.start());
            let (text, is_emphasized) = strip_inline_tag(line[whole.end()..text_end].trim(), opts);
            if text.is_empty() {
                dropped_empty += 1;
                continue;
            }
            cues.push(TimedCue {
                time: decode_time(caps),
                text: text.to_string(),
                is_emphasized,
            });
        }
    }

    ParseReport {
        cues: CueList::from_unsorted(cues),
        skipped_lines,
        dropped_empty,
    }
}

/// Split glued tags (`][` becomes `]\n[`) and unify line endings to `\n`.
fn normalize(raw: &str) -> String {
    raw.replace("][", "]\n[")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

fn decode_time(caps: &Captures<'_>) -> f64 {
    let group = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(f64::from)
    };
    let first = group(1).unwrap_or(0.0);
    let second = group(2).unwrap_or(0.0);

    let (hours, minutes, seconds) = match group(3) {
        Some(third) => (first, second, third),
        None => (0.0, first, second),
    };

    let fraction = match caps.get(4) {
        Some(m) => {
            let value = f64::from(m.as_str().parse::<u32>().unwrap_or(0));
            if m.as_str().len() == 3 {
                value / 1000.0
            } else {
                value / 100.0
            }
        }
        None => 0.0,
    };

    hours * 3600.0 + minutes * 60.0 + seconds + fraction
}

/// Strip a leading `{tag}`; report whether it was an emphasis tag.
fn strip_inline_tag<'a>(text: &'a str, opts: &ParseOptions) -> (&'a str, bool) {
    let Some(caps) = INLINE_TAG.captures(text) else {
        return (text, false);
    };
    let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
        return (text, false);
    };
    (
        text[whole.end()..].trim(),
        opts.is_emphasis_tag(tag.as_str()),
    )
}

/// Format seconds as an LRC tag: `[mm:ss.cc]`, or `[hh:mm:ss.cc]` from one hour on.
pub fn format_timestamp(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let total_cs = (secs * 100.0).round() as u64;
    let cs = total_cs % 100;
    let total_s = total_cs / 100;
    let s = total_s % 60;
    let total_m = total_s / 60;
    if total_m >= 60 {
        format!("[{:02}:{:02}:{:02}.{:02}]", total_m / 60, total_m % 60, s, cs)
    } else {
        format!("[{:02}:{:02}.{:02}]", total_m, s, cs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lrc/parser.rs"]
mod tests;
