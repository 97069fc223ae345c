use crate::{
    animation::ease::Ease,
    animation::interp::progress,
    resolve::cue::CueWindow,
};

/// Lifecycle phase of a cue at a given time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CuePhase {
    Pending,
    Entering,
    Visible,
    Exiting,
    Done,
}

/// Fade-in / fade-out shape applied to a cue's display window.
///
/// The entry ramp runs from `enter - pre_roll` to `enter + fade_in`; the exit ramp ends at
/// `exit - exit_offset`. When both ramps do not fit the window they are shortened
/// proportionally.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub pre_roll: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    pub exit_offset: f64,
    pub ease_in: Ease,
    pub ease_out: Ease,
}

impl Default for Envelope {
    fn default() -> Self {
        // 12 and 15 frames at 30 fps.
        Self {
            pre_roll: 0.0,
            fade_in: 0.4,
            fade_out: 0.5,
            exit_offset: 0.0,
            ease_in: Ease::OutCubic,
            ease_out: Ease::Linear,
        }
    }
}

/// The four phase boundaries of one cue, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EnvelopeBounds {
    /// Entry ramp starts (`Pending -> Entering`).
    pub start: f64,
    /// Entry ramp complete (`Entering -> Visible`).
    pub full: f64,
    /// Exit ramp starts (`Visible -> Exiting`).
    pub fade_start: f64,
    /// Exit ramp complete (`Exiting -> Done`).
    pub end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EnvelopeSample {
    pub phase: CuePhase,
    /// `min(entry, 1 - exit)`.
    pub opacity: f64,
    /// Eased entry progress in `[0, 1]`.
    pub entry: f64,
    /// Eased exit progress in `[0, 1]`.
    pub exit: f64,
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

impl Envelope {
    pub fn bounds(&self, window: CueWindow) -> EnvelopeBounds {
        let start = window.enter - non_negative(self.pre_roll);
        let end = (window.exit - non_negative(self.exit_offset)).max(window.enter);
        let span = end - start;

        let mut ramp_in = non_negative(self.pre_roll) + non_negative(self.fade_in);
        let mut ramp_out = non_negative(self.fade_out);
        let total = ramp_in + ramp_out;
        if total > span && total > 0.0 {
            let k = span / total;
            ramp_in *= k;
            ramp_out *= k;
        }

        let full = (start + ramp_in).min(end);
        EnvelopeBounds {
            start,
            full,
            fade_start: (end - ramp_out).max(full),
            end,
        }
    }

    /// Phase and ramp values at `t`, recomputed from scratch on every call.
    pub fn sample(&self, window: CueWindow, t: f64) -> EnvelopeSample {
        let b = self.bounds(window);
        let phase = if t.is_nan() || t < b.start {
            CuePhase::Pending
        } else if t < b.full {
            CuePhase::Entering
        } else if t < b.fade_start {
            CuePhase::Visible
        } else if t < b.end {
            CuePhase::Exiting
        } else {
            CuePhase::Done
        };

        let entry = progress(t, b.start, b.full, self.ease_in);
        let exit = progress(t, b.fade_start, b.end, self.ease_out);
        let opacity = match phase {
            CuePhase::Pending | CuePhase::Done => 0.0,
            _ => entry.min(1.0 - exit),
        };
        EnvelopeSample {
            phase,
            opacity,
            entry,
            exit,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/envelope.rs"]
mod tests;
