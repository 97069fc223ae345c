//! Lyricue resolves timed lyric cues into per-frame visual state for lyric videos.
//!
//! A renderer seeks to arbitrary frames, so every query here is a pure function of the
//! scene, its cues and the frame index; nothing is carried from one frame to the next.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: LRC text -> [`CueList`] (sorted, empty lines dropped, emphasis tags read)
//! 2. **Resolve**: `CueList + time -> ActiveCue` and, with an [`Envelope`], the set of
//!    [`VisibleCue`]s with their entry/exit phases
//! 3. **Evaluate**: [`SceneRuntime`] + [`FrameIndex`] -> [`FrameState`] (lines, text runs,
//!    background layers), sequentially or across a rayon pool
//!
//! Pixel rendering, fonts, audio and encoding are left to the consumer of [`FrameState`].
#![forbid(unsafe_code)]

mod animation;
mod eval;
mod foundation;
mod lrc;
mod resolve;
mod scene;
mod text;

pub use animation::ease::Ease;
pub use animation::interp::{
    InterpMode, Keyframe, Keyframes, Lerp, interpolate, progress, ramp,
};
pub use animation::ops::{LoopMode, loop_time, stagger_start};
pub use eval::evaluator::{
    ActiveLine, BackgroundLayer, EvalThreading, Evaluator, FrameState, LineState, RunState,
};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Rgba8, Vec2};
pub use foundation::error::{LyricueError, LyricueResult};
pub use lrc::cue::{CueList, TimedCue};
pub use lrc::parser::{
    ParseOptions, ParseReport, format_timestamp, parse, parse_with, parse_with_report,
};
pub use resolve::cue::{
    ActiveCue, CueTiming, CueWindow, ExitRule, VisibleCue, cue_window, display_window,
    resolve_active, resolve_active_at_frame, visible_cues,
};
pub use resolve::envelope::{CuePhase, Envelope, EnvelopeBounds, EnvelopeSample};
pub use resolve::segment::{
    BlendOpts, Segment, SegmentBlend, SegmentLayer, SegmentSpec, SegmentTrack,
};
pub use resolve::slideshow::Slideshow;
pub use scene::model::{BackgroundMotion, LineMotion, LyricsSource, Scene, SceneRuntime};
pub use scene::tweaks::{AssetTweaks, ResolvedTweak, Tweak};
pub use text::runs::{Script, TextRun, classify_script, drop_blank, script_runs, split_runs};
