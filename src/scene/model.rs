use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::core::Fps,
    foundation::error::{LyricueError, LyricueResult},
    lrc::cue::CueList,
    lrc::parser::{ParseOptions, parse_with},
    resolve::cue::CueTiming,
    resolve::envelope::Envelope,
    resolve::segment::{BlendOpts, SegmentSpec, SegmentTrack},
    resolve::slideshow::Slideshow,
    scene::tweaks::AssetTweaks,
};

/// Where a scene's lyrics come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricsSource {
    /// LRC file, relative paths resolve against the scene file's directory.
    Path(PathBuf),
    /// LRC text embedded in the scene.
    Inline(String),
}

/// How a lyric line moves while its envelope ramps in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LineMotion {
    /// Line scale at entry progress `0` and `1`.
    pub entry_scale: [f64; 2],
    /// Vertical offset in pixels at entry progress `0` and `1`; positive is down.
    pub rise_px: [f64; 2],
    /// Delay between consecutive characters' reveal.
    pub char_stagger_secs: f64,
    /// Reveal duration of a single character.
    pub char_ramp_secs: f64,
    pub char_ease: Ease,
}

impl Default for LineMotion {
    fn default() -> Self {
        // 2 and 8 frames at 30 fps.
        Self {
            entry_scale: [0.3, 1.0],
            rise_px: [50.0, 0.0],
            char_stagger_secs: 2.0 / 30.0,
            char_ramp_secs: 8.0 / 30.0,
            char_ease: Ease::OutCubic,
        }
    }
}

/// Slow zoom and drift applied to background images over their segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackgroundMotion {
    /// Scale lost between segment start and end, relative to the tweak's base scale.
    pub zoom: f64,
    /// Vertical offset in pixels at segment progress `0` and `1`.
    pub drift_px: [f64; 2],
}

impl Default for BackgroundMotion {
    fn default() -> Self {
        Self {
            zoom: 0.04,
            drift_px: [6.0, -6.0],
        }
    }
}

fn default_emphasis_tags() -> Vec<String> {
    ParseOptions::default().emphasis_tags
}

/// Declarative description of one lyric video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub fps: Fps,
    /// Length in frames.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<LyricsSource>,
    #[serde(default = "default_emphasis_tags")]
    pub emphasis_tags: Vec<String>,
    #[serde(default)]
    pub timing: CueTiming,
    #[serde(default)]
    pub envelope: Envelope,
    #[serde(default)]
    pub motion: LineMotion,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub blend: BlendOpts,
    /// Fallback background where no segment is visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slideshow: Option<Slideshow>,
    #[serde(default)]
    pub background_motion: BackgroundMotion,
    #[serde(default)]
    pub tweaks: AssetTweaks,
}

fn check_secs(name: &str, v: f64) -> LyricueResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(LyricueError::validation(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

fn check_finite(name: &str, values: &[f64]) -> LyricueResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LyricueError::validation(format!("{name} must be finite")))
    }
}

impl Scene {
    pub fn from_json_str(s: &str) -> LyricueResult<Self> {
        serde_json::from_str(s).map_err(|e| LyricueError::serde(format!("scene JSON: {e}")))
    }

    pub fn from_path(path: &Path) -> LyricueResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            emphasis_tags: self.emphasis_tags.clone(),
        }
    }

    pub fn validate(&self) -> LyricueResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(LyricueError::validation("duration must be > 0 frames"));
        }

        check_secs("timing.default_tail_secs", self.timing.default_tail_secs)?;
        check_secs("timing.min_duration_secs", self.timing.min_duration_secs)?;
        if let Some(max) = self.timing.max_display_secs
            && !(max.is_finite() && max > 0.0)
        {
            return Err(LyricueError::validation(
                "timing.max_display_secs must be finite and > 0",
            ));
        }
        for rule in &self.timing.linger {
            for v in [
                rule.min_hold_secs,
                rule.past_next_secs,
                rule.last_hold_secs,
                rule.gap_before_next_secs,
            ]
            .into_iter()
            .flatten()
            {
                check_secs("timing.linger", v)?;
            }
        }

        check_secs("envelope.pre_roll", self.envelope.pre_roll)?;
        check_secs("envelope.fade_in", self.envelope.fade_in)?;
        check_secs("envelope.fade_out", self.envelope.fade_out)?;
        check_secs("envelope.exit_offset", self.envelope.exit_offset)?;

        check_finite("motion.entry_scale", &self.motion.entry_scale)?;
        check_finite("motion.rise_px", &self.motion.rise_px)?;
        check_secs("motion.char_stagger_secs", self.motion.char_stagger_secs)?;
        check_secs("motion.char_ramp_secs", self.motion.char_ramp_secs)?;

        check_secs("blend.fade_secs", self.blend.fade_secs)?;
        for ease in [
            self.envelope.ease_in,
            self.envelope.ease_out,
            self.blend.ease,
            self.motion.char_ease,
        ] {
            ease.validate()?;
        }
        check_finite("background_motion.zoom", &[self.background_motion.zoom])?;
        check_finite("background_motion.drift_px", &self.background_motion.drift_px)?;

        SegmentTrack::new(self.segments.clone())?;
        if let Some(show) = &self.slideshow {
            show.validate()?;
        }
        self.tweaks.validate()
    }
}

/// A validated scene with its lyrics parsed and segments resolved; everything the
/// evaluator needs, immutable for the duration of a render.
#[derive(Clone, Debug)]
pub struct SceneRuntime {
    pub scene: Scene,
    pub cues: CueList,
    pub track: SegmentTrack,
}

impl SceneRuntime {
    /// Build without touching the filesystem; `scene.lyrics` is ignored.
    pub fn from_parts(scene: Scene, cues: CueList) -> LyricueResult<Self> {
        scene.validate()?;
        let track = SegmentTrack::new(scene.segments.clone())?;
        Ok(Self { scene, cues, track })
    }

    /// Validate `scene` and load its lyrics.
    ///
    /// A lyrics file that cannot be read is logged and replaced by an empty cue list, so
    /// the scene still renders its backgrounds.
    pub fn load(scene: Scene, base_dir: &Path) -> LyricueResult<Self> {
        let opts = scene.parse_options();
        let cues = match &scene.lyrics {
            None => CueList::empty(),
            Some(LyricsSource::Inline(text)) => parse_with(text, &opts),
            Some(LyricsSource::Path(rel)) => {
                let path = base_dir.join(rel);
                match std::fs::read_to_string(&path) {
                    Ok(text) => parse_with(&text, &opts),
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %err,
                            "lyrics unavailable, continuing without cues"
                        );
                        CueList::empty()
                    }
                }
            }
        };
        Self::from_parts(scene, cues)
    }

    /// Read a scene file and load it relative to its own directory.
    pub fn from_path(path: &Path) -> LyricueResult<Self> {
        let scene = Scene::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load(scene, base_dir)
    }

    pub fn fps(&self) -> Fps {
        self.scene.fps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
