use std::ops::Deref;

use crate::lrc::parser::format_timestamp;

/// One timestamped lyric line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedCue {
    /// Seconds from media start, `>= 0`.
    pub time: f64,
    /// Display text, trimmed and non-empty.
    pub text: String,
    /// Set by an inline emphasis tag such as `{chorus}`.
    #[serde(default)]
    pub is_emphasized: bool,
}

impl TimedCue {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
            is_emphasized: false,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.is_emphasized = true;
        self
    }
}

/// Immutable cue sequence sorted ascending by time.
///
/// Ties keep their input order. Every construction path goes through
/// [`CueList::from_unsorted`], so a `CueList` always upholds the ordering invariant the
/// resolver's binary search depends on.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<TimedCue>", into = "Vec<TimedCue>")]
pub struct CueList {
    cues: Vec<TimedCue>,
}

impl CueList {
    /// Sort (stable) and sanitize arbitrary cues.
    ///
    /// Cues with a negative or non-finite time, or with blank text, are dropped; text is
    /// trimmed.
    pub fn from_unsorted(cues: Vec<TimedCue>) -> Self {
        let mut cues: Vec<TimedCue> = cues
            .into_iter()
            .filter(|c| c.time.is_finite() && c.time >= 0.0)
            .filter_map(|mut c| {
                let trimmed = c.text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                if trimmed.len() != c.text.len() {
                    c.text = trimmed.to_string();
                }
                Some(c)
            })
            .collect();
        cues.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { cues }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[TimedCue] {
        &self.cues
    }

    pub fn into_vec(self) -> Vec<TimedCue> {
        self.cues
    }

    /// Render back to LRC text, one `[mm:ss.cc]` line per cue.
    ///
    /// Emphasized cues are written with a leading `{chorus}` tag. Times are rounded to
    /// centiseconds.
    pub fn to_lrc(&self) -> String {
        let mut out = String::new();
        for cue in &self.cues {
            out.push_str(&format_timestamp(cue.time));
            if cue.is_emphasized {
                out.push_str("{chorus}");
            }
            out.push_str(&cue.text);
            out.push('\n');
        }
        out
    }
}

impl Deref for CueList {
    type Target = [TimedCue];

    fn deref(&self) -> &Self::Target {
        &self.cues
    }
}

impl From<Vec<TimedCue>> for CueList {
    fn from(cues: Vec<TimedCue>) -> Self {
        Self::from_unsorted(cues)
    }
}

impl From<CueList> for Vec<TimedCue> {
    fn from(list: CueList) -> Self {
        list.cues
    }
}

impl<'a> IntoIterator for &'a CueList {
    type Item = &'a TimedCue;
    type IntoIter = std::slice::Iter<'a, TimedCue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lrc/cue.rs"]
mod tests;
