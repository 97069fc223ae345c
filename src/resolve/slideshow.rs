use crate::{
    animation::ease::Ease,
    animation::interp::progress,
    animation::ops::{LoopMode, loop_time},
    foundation::error::{LyricueError, LyricueResult},
    resolve::segment::{SegmentBlend, SegmentLayer},
};

/// Endless rotation through `assets`, one per `cycle_secs`.
///
/// The last `transition_secs` of every cycle crossfade into the following asset; the
/// rotation wraps around after the last one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slideshow {
    pub assets: Vec<String>,
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: f64,
    #[serde(default = "default_transition_secs")]
    pub transition_secs: f64,
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

fn default_cycle_secs() -> f64 {
    9.0
}

fn default_transition_secs() -> f64 {
    1.8
}

fn default_ease() -> Ease {
    Ease::InOutCubic
}

impl Slideshow {
    pub fn new(assets: Vec<String>) -> Self {
        Self {
            assets,
            cycle_secs: default_cycle_secs(),
            transition_secs: default_transition_secs(),
            ease: default_ease(),
        }
    }

    pub fn validate(&self) -> LyricueResult<()> {
        if self.assets.is_empty() {
            return Err(LyricueError::validation(
                "slideshow needs at least one asset",
            ));
        }
        if !(self.cycle_secs.is_finite() && self.cycle_secs > 0.0) {
            return Err(LyricueError::validation(
                "slideshow cycle_secs must be finite and > 0",
            ));
        }
        if !(self.transition_secs.is_finite()
            && (0.0..=self.cycle_secs).contains(&self.transition_secs))
        {
            return Err(LyricueError::validation(
                "slideshow transition_secs must be within [0, cycle_secs]",
            ));
        }
        self.ease.validate()
    }

    /// Layers visible at `t`; times before zero show the first slide.
    ///
    /// Assumes a validated slideshow and returns an empty blend otherwise.
    pub fn sample(&self, t: f64) -> SegmentBlend {
        if self.validate().is_err() || !t.is_finite() {
            return SegmentBlend::default();
        }
        let t = t.max(0.0);
        let n = self.assets.len();
        let local = loop_time(t, self.cycle_secs, LoopMode::Repeat);
        let cycle = ((t - local) / self.cycle_secs).round();
        let index = (cycle as u64 % n as u64) as usize;
        let slide_progress = (local / self.cycle_secs).clamp(0.0, 1.0);

        let w = if n > 1 && self.transition_secs > 0.0 {
            progress(
                local,
                self.cycle_secs - self.transition_secs,
                self.cycle_secs,
                self.ease,
            )
        } else {
            0.0
        };

        let mut layers = vec![SegmentLayer {
            index,
            asset: self.assets[index].clone(),
            opacity: 1.0 - w,
            progress: slide_progress,
        }];
        if w > 0.0 {
            let next = (index + 1) % n;
            layers.push(SegmentLayer {
                index: next,
                asset: self.assets[next].clone(),
                opacity: w,
                progress: 0.0,
            });
        }
        SegmentBlend { layers }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/slideshow.rs"]
mod tests;
