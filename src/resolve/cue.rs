use crate::{
    foundation::core::{Fps, FrameIndex},
    lrc::cue::TimedCue,
    resolve::envelope::{CuePhase, Envelope, EnvelopeSample},
};

/// Smallest window any cue can get, whatever the configuration says.
const MIN_WINDOW_SECS: f64 = 1e-3;

/// Timing policy turning cue start times into display windows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CueTiming {
    /// How long the final cue stays active.
    pub default_tail_secs: f64,
    /// Floor applied to every window so `exit > enter` holds for glued cues.
    pub min_duration_secs: f64,
    /// Optional cap on display windows (see [`display_window`]).
    pub max_display_secs: Option<f64>,
    /// Per-line display adjustments, applied in order.
    pub linger: Vec<ExitRule>,
}

impl Default for CueTiming {
    fn default() -> Self {
        Self {
            default_tail_secs: 5.0,
            min_duration_secs: 1.0 / 30.0,
            max_display_secs: None,
            linger: Vec::new(),
        }
    }
}

impl CueTiming {
    fn min_duration(&self) -> f64 {
        if self.min_duration_secs.is_finite() && self.min_duration_secs > MIN_WINDOW_SECS {
            self.min_duration_secs
        } else {
            MIN_WINDOW_SECS
        }
    }

    fn tail(&self) -> f64 {
        if self.default_tail_secs.is_finite() {
            self.default_tail_secs.max(self.min_duration())
        } else {
            self.min_duration()
        }
    }
}

/// Display-window adjustment for lines whose text contains `contains`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExitRule {
    pub contains: String,
    /// Keep the line at least this long after it enters.
    pub min_hold_secs: Option<f64>,
    /// Keep the line until this long after the next cue enters.
    pub past_next_secs: Option<f64>,
    /// Stand-in for `past_next_secs` on the final cue: hold this long after entering.
    pub last_hold_secs: Option<f64>,
    /// Leave the line at least this long before the next cue enters.
    pub gap_before_next_secs: Option<f64>,
}

impl ExitRule {
    fn matches(&self, text: &str) -> bool {
        !self.contains.is_empty() && text.contains(self.contains.as_str())
    }
}

/// Half-open time window `[enter, exit)` of one cue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CueWindow {
    pub enter: f64,
    pub exit: f64,
}

impl CueWindow {
    pub fn duration(self) -> f64 {
        self.exit - self.enter
    }

    pub fn contains(self, t: f64) -> bool {
        self.enter <= t && t < self.exit
    }

    /// Linear progress through the window, clamped to `[0, 1]`.
    pub fn progress(self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        ((t - self.enter) / self.duration()).clamp(0.0, 1.0)
    }
}

/// Lookup window of cue `index`: until the next cue, or `default_tail_secs` for the last.
pub fn cue_window(cues: &[TimedCue], index: usize, timing: &CueTiming) -> Option<CueWindow> {
    let cue = cues.get(index)?;
    let enter = cue.time;
    let exit = match cues.get(index + 1) {
        Some(next) => next.time,
        None => enter + timing.tail(),
    };
    Some(CueWindow {
        enter,
        exit: exit.max(enter + timing.min_duration()),
    })
}

/// Display window of cue `index`: the lookup window reshaped by linger rules and the
/// `max_display_secs` cap. Display windows may overlap neighbouring cues.
pub fn display_window(cues: &[TimedCue], index: usize, timing: &CueTiming) -> Option<CueWindow> {
    let base = cue_window(cues, index, timing)?;
    let cue = &cues[index];
    let next = cues.get(index + 1).map(|c| c.time);
    let enter = base.enter;
    let mut exit = base.exit;

    for rule in timing.linger.iter().filter(|r| r.matches(&cue.text)) {
        if let Some(hold) = rule.min_hold_secs.filter(|v| v.is_finite()) {
            exit = exit.max(enter + hold);
        }
        if let (Some(past), Some(next)) = (rule.past_next_secs.filter(|v| v.is_finite()), next) {
            exit = exit.max(next + past);
        }
        if next.is_none()
            && let Some(hold) = rule.last_hold_secs.filter(|v| v.is_finite())
        {
            exit = exit.max(enter + hold);
        }
        if let (Some(gap), Some(next)) = (
            rule.gap_before_next_secs.filter(|v| v.is_finite()),
            next,
        ) {
            exit = exit.min(next - gap);
        }
    }
    if let Some(cap) = timing.max_display_secs.filter(|v| v.is_finite()) {
        exit = exit.min(enter + cap);
    }

    Some(CueWindow {
        enter,
        exit: exit.max(enter + timing.min_duration()),
    })
}

/// Result of [`resolve_active`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveCue<'a> {
    pub cue: Option<&'a TimedCue>,
    pub index: Option<usize>,
    pub window: Option<CueWindow>,
    /// Linear progress through `window`, `0` when nothing is active.
    pub progress: f64,
}

impl ActiveCue<'_> {
    pub fn none() -> Self {
        Self {
            cue: None,
            index: None,
            window: None,
            progress: 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.cue.is_none()
    }
}

/// The cue active at `t`: the last cue with `time <= t`, for the final cue only within
/// its tail.
///
/// Pure in `(cues, t, timing)`. Negative, non-finite or out-of-range times and empty
/// lists yield [`ActiveCue::none`]. `cues` must be sorted by time, which
/// [`crate::CueList`] guarantees.
pub fn resolve_active<'a>(cues: &'a [TimedCue], t: f64, timing: &CueTiming) -> ActiveCue<'a> {
    if !t.is_finite() || t < 0.0 {
        return ActiveCue::none();
    }
    let idx = cues.partition_point(|c| c.time <= t);
    if idx == 0 {
        return ActiveCue::none();
    }
    let index = idx - 1;
    let Some(window) = cue_window(cues, index, timing) else {
        return ActiveCue::none();
    };
    if t >= window.exit {
        return ActiveCue::none();
    }
    ActiveCue {
        cue: Some(&cues[index]),
        index: Some(index),
        window: Some(window),
        progress: window.progress(t),
    }
}

/// [`resolve_active`] on the frame clock: `t = frame / fps`.
pub fn resolve_active_at_frame<'a>(
    cues: &'a [TimedCue],
    frame: FrameIndex,
    fps: Fps,
    timing: &CueTiming,
) -> ActiveCue<'a> {
    resolve_active(cues, fps.frame_time(frame), timing)
}

/// A cue whose display envelope is live at the queried time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct VisibleCue<'a> {
    pub index: usize,
    pub cue: &'a TimedCue,
    pub window: CueWindow,
    pub envelope: EnvelopeSample,
}

/// Every cue that is entering, visible or exiting at `t`, in cue order.
///
/// Unlike [`resolve_active`] this works on display windows, so lines may overlap during
/// pre-roll or lingering exits.
pub fn visible_cues<'a>(
    cues: &'a [TimedCue],
    t: f64,
    timing: &CueTiming,
    envelope: &Envelope,
) -> Vec<VisibleCue<'a>> {
    if !t.is_finite() {
        return Vec::new();
    }
    let lead = if envelope.pre_roll.is_finite() {
        envelope.pre_roll.max(0.0)
    } else {
        0.0
    };
    let candidates = cues.partition_point(|c| c.time - lead <= t);

    (0..candidates)
        .filter_map(|index| {
            let window = display_window(cues, index, timing)?;
            let sample = envelope.sample(window, t);
            if matches!(sample.phase, CuePhase::Pending | CuePhase::Done) {
                return None;
            }
            Some(VisibleCue {
                index,
                cue: &cues[index],
                window,
                envelope: sample,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/cue.rs"]
mod tests;
