use rayon::prelude::*;

use crate::{
    animation::ease::Ease,
    animation::interp::{progress, ramp},
    animation::ops::stagger_start,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{LyricueError, LyricueResult},
    resolve::cue::{CueWindow, VisibleCue, resolve_active, visible_cues},
    resolve::envelope::CuePhase,
    resolve::segment::SegmentBlend,
    scene::model::SceneRuntime,
    text::runs::{Script, drop_blank, script_runs},
};

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    pub frame: FrameIndex,
    /// Seconds since media start.
    pub time: f64,
    /// The line currently being sung, if any.
    pub active: Option<ActiveLine>,
    /// Lines with a live envelope, in cue order.
    pub lines: Vec<LineState>,
    /// Background layers, bottom first.
    pub background: Vec<BackgroundLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveLine {
    pub index: usize,
    pub text: String,
    pub emphasized: bool,
    pub window: CueWindow,
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LineState {
    pub index: usize,
    pub text: String,
    pub emphasized: bool,
    pub phase: CuePhase,
    pub opacity: f64,
    pub scale: f64,
    pub offset_y: f64,
    pub runs: Vec<RunState>,
}

/// One same-script run of a line with its staggered reveal progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunState {
    pub text: String,
    pub script: Script,
    pub char_start: usize,
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BackgroundLayer {
    pub index: usize,
    pub asset: String,
    pub opacity: f64,
    pub progress: f64,
    pub scale: f64,
    pub offset_y: f64,
    pub focus: [f64; 2],
}

/// Parallelism for [`Evaluator::eval_frames`].
#[derive(Clone, Debug, Default)]
pub struct EvalThreading {
    pub parallel: bool,
    /// Worker count for the parallel pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(rt))]
    pub fn eval_frame(rt: &SceneRuntime, frame: FrameIndex) -> LyricueResult<FrameState> {
        if frame.0 >= rt.scene.duration {
            return Err(LyricueError::evaluation("frame is out of bounds"));
        }
        let time = rt.fps().frame_time(frame);
        let scene = &rt.scene;

        let active = resolve_active(&rt.cues, time, &scene.timing);
        let active = match (active.index, active.cue, active.window) {
            (Some(index), Some(cue), Some(window)) => Some(ActiveLine {
                index,
                text: cue.text.clone(),
                emphasized: cue.is_emphasized,
                window,
                progress: active.progress,
            }),
            _ => None,
        };

        let lines = visible_cues(&rt.cues, time, &scene.timing, &scene.envelope)
            .into_iter()
            .map(|v| eval_line(rt, &v, time))
            .collect();

        Ok(FrameState {
            frame,
            time,
            active,
            lines,
            background: eval_background(rt, time),
        })
    }

    /// Evaluate every frame in `range`. Parallel and sequential runs return identical
    /// states in frame order.
    #[tracing::instrument(skip(rt))]
    pub fn eval_frames(
        rt: &SceneRuntime,
        range: FrameRange,
        threading: &EvalThreading,
    ) -> LyricueResult<Vec<FrameState>> {
        if range.end.0 > rt.scene.duration {
            return Err(LyricueError::evaluation(
                "frame range exceeds scene duration",
            ));
        }
        let frames: Vec<FrameIndex> = (range.start.0..range.end.0).map(FrameIndex).collect();

        if !threading.parallel {
            return frames
                .into_iter()
                .map(|f| Self::eval_frame(rt, f))
                .collect();
        }

        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            frames
                .par_iter()
                .map(|&f| Self::eval_frame(rt, f))
                .collect()
        })
    }
}

fn eval_line(rt: &SceneRuntime, v: &VisibleCue<'_>, t: f64) -> LineState {
    let motion = &rt.scene.motion;
    let entry = v.envelope.entry;
    let reveal_base = rt.scene.envelope.bounds(v.window).start;

    let runs = drop_blank(script_runs(&v.cue.text))
        .into_iter()
        .map(|run| {
            let start = stagger_start(reveal_base, run.char_start, motion.char_stagger_secs);
            RunState {
                progress: progress(t, start, start + motion.char_ramp_secs, motion.char_ease),
                text: run.text,
                script: run.class,
                char_start: run.char_start,
            }
        })
        .collect();

    LineState {
        index: v.index,
        text: v.cue.text.clone(),
        emphasized: v.cue.is_emphasized,
        phase: v.envelope.phase,
        opacity: v.envelope.opacity,
        scale: lerp_pair(motion.entry_scale, entry),
        offset_y: lerp_pair(motion.rise_px, entry),
        runs,
    }
}

fn eval_background(rt: &SceneRuntime, t: f64) -> Vec<BackgroundLayer> {
    let scene = &rt.scene;
    let mut blend = rt.track.blend(t, &scene.blend);
    if blend.is_empty()
        && let Some(show) = &scene.slideshow
    {
        blend = show.sample(t);
    }
    let SegmentBlend { layers } = blend;
    let motion = &scene.background_motion;

    layers
        .into_iter()
        .map(|layer| {
            let tweak = scene.tweaks.resolve(&layer.asset);
            BackgroundLayer {
                scale: tweak.base_scale - motion.zoom * layer.progress,
                offset_y: lerp_pair(motion.drift_px, layer.progress) - tweak.lift_px,
                focus: tweak.focus,
                index: layer.index,
                asset: layer.asset,
                opacity: layer.opacity,
                progress: layer.progress,
            }
        })
        .collect()
}

fn lerp_pair([from, to]: [f64; 2], p: f64) -> f64 {
    ramp(p, 0.0, 1.0, from, to, Ease::Linear)
}

fn build_thread_pool(threads: Option<usize>) -> LyricueResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LyricueError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LyricueError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
