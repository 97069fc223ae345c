use super::*;
use crate::{lrc::parser::parse, scene::model::Scene};

const LRC: &str = "[00:01.00]Hello world\n[00:03.00]{chorus}燃えて Fire\n[00:05.00]last\n";

fn runtime(extra: &str) -> SceneRuntime {
    let json = format!(r#"{{ "fps": {{ "num": 30, "den": 1 }}, "duration": 300 {extra} }}"#);
    let scene = Scene::from_json_str(&json).unwrap();
    SceneRuntime::from_parts(scene, parse(LRC)).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn nothing_is_visible_before_the_first_cue() {
    let rt = runtime("");
    let state = Evaluator::eval_frame(&rt, FrameIndex(0)).unwrap();
    assert_eq!(state.time, 0.0);
    assert!(state.active.is_none());
    assert!(state.lines.is_empty());
    assert!(state.background.is_empty());
}

#[test]
fn line_starts_small_low_and_transparent() {
    let rt = runtime("");
    let state = Evaluator::eval_frame(&rt, FrameIndex(30)).unwrap();
    let active = state.active.unwrap();
    assert_eq!(active.index, 0);
    assert_eq!(active.text, "Hello world");
    assert_eq!(active.progress, 0.0);

    assert_eq!(state.lines.len(), 1);
    let line = &state.lines[0];
    assert_eq!(line.phase, CuePhase::Entering);
    assert_eq!(line.opacity, 0.0);
    assert_eq!(line.scale, 0.3);
    assert_eq!(line.offset_y, 50.0);
    assert_eq!(line.runs.len(), 1);
    assert_eq!(line.runs[0].script, Script::Latin);
    assert_eq!(line.runs[0].progress, 0.0);
}

#[test]
fn settled_line_is_fully_visible() {
    let rt = runtime("");
    let state = Evaluator::eval_frame(&rt, FrameIndex(60)).unwrap();
    let line = &state.lines[0];
    assert_eq!(line.phase, CuePhase::Visible);
    assert_eq!(line.opacity, 1.0);
    assert_eq!(line.scale, 1.0);
    assert_eq!(line.offset_y, 0.0);
    assert_eq!(line.runs[0].progress, 1.0);
    assert!(approx(state.active.unwrap().progress, 0.5));
}

#[test]
fn runs_reveal_in_character_order() {
    let rt = runtime("");
    let state = Evaluator::eval_frame(&rt, FrameIndex(93)).unwrap();
    assert_eq!(state.lines.len(), 1);
    let line = &state.lines[0];
    assert_eq!(line.index, 1);
    assert!(line.emphasized);
    assert_eq!(line.text, "燃えて Fire");

    let scripts: Vec<Script> = line.runs.iter().map(|r| r.script).collect();
    assert_eq!(scripts, [Script::Han, Script::Hiragana, Script::Latin]);
    assert_eq!(line.runs[2].char_start, 4);
    assert!(line.runs[0].progress > 0.0);
    assert_eq!(line.runs[2].progress, 0.0);

    let later = Evaluator::eval_frame(&rt, FrameIndex(110)).unwrap();
    assert!(later.lines[0].runs.iter().all(|r| r.progress == 1.0));
}

#[test]
fn out_of_range_frame_is_an_error() {
    let rt = runtime("");
    assert!(Evaluator::eval_frame(&rt, FrameIndex(299)).is_ok());
    let err = Evaluator::eval_frame(&rt, FrameIndex(300)).unwrap_err();
    assert!(matches!(err, LyricueError::Evaluation(_)));
}

#[test]
fn background_applies_tweaks_and_drift() {
    let rt = runtime(
        r#", "segments": [
            { "start": 0.0, "end": 4.0, "asset": "a.jpg" },
            { "start": 4.0, "asset": "b.jpg" }
        ],
        "tweaks": { "a.jpg": { "base_scale": 1.04, "lift_px": 10.0 } }"#,
    );
    let state = Evaluator::eval_frame(&rt, FrameIndex(60)).unwrap();
    assert_eq!(state.background.len(), 1);
    let a = &state.background[0];
    assert_eq!(a.asset, "a.jpg");
    assert_eq!(a.opacity, 1.0);
    assert!(approx(a.progress, 0.5));
    assert!(approx(a.scale, 1.02));
    assert!(approx(a.offset_y, -10.0));
    assert_eq!(a.focus, [0.5, 0.5]);

    let state = Evaluator::eval_frame(&rt, FrameIndex(108)).unwrap();
    let assets: Vec<&str> = state.background.iter().map(|l| l.asset.as_str()).collect();
    assert_eq!(assets, ["a.jpg", "b.jpg"]);
    assert!(approx(state.background[1].opacity, 0.5));
    let total: f64 = state.background.iter().map(|l| l.opacity).sum();
    assert!(approx(total, 1.0));
    assert_eq!(state.background[1].scale, 1.0);
    assert_eq!(state.background[1].offset_y, 6.0);
}

#[test]
fn slideshow_fills_frames_without_segments() {
    let rt = runtime(r#", "slideshow": { "assets": ["x.jpg", "y.jpg"] }"#);
    let state = Evaluator::eval_frame(&rt, FrameIndex(0)).unwrap();
    assert_eq!(state.background.len(), 1);
    assert_eq!(state.background[0].asset, "x.jpg");
    assert_eq!(state.background[0].opacity, 1.0);
}

#[test]
fn parallel_matches_sequential() {
    let rt = runtime(
        r#", "segments": [{ "start": 0.5, "end": 6.0, "asset": "a.jpg" }],
        "slideshow": { "assets": ["x.jpg", "y.jpg"], "cycle_secs": 2.0, "transition_secs": 0.5 }"#,
    );
    let range = FrameRange::new(FrameIndex(0), FrameIndex(300)).unwrap();
    let seq = Evaluator::eval_frames(&rt, range, &EvalThreading::default()).unwrap();
    let par = Evaluator::eval_frames(
        &rt,
        range,
        &EvalThreading {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 300);
    assert_eq!(seq, par);
    assert!(seq.iter().enumerate().all(|(i, s)| s.frame.0 == i as u64));
}

#[test]
fn eval_frames_rejects_bad_requests() {
    let rt = runtime("");
    let past_end = FrameRange::new(FrameIndex(290), FrameIndex(301)).unwrap();
    assert!(Evaluator::eval_frames(&rt, past_end, &EvalThreading::default()).is_err());

    let range = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    let zero_threads = EvalThreading {
        parallel: true,
        threads: Some(0),
    };
    assert!(matches!(
        Evaluator::eval_frames(&rt, range, &zero_threads),
        Err(LyricueError::Validation(_))
    ));

    let empty = FrameRange::new(FrameIndex(5), FrameIndex(5)).unwrap();
    assert!(
        Evaluator::eval_frames(&rt, empty, &EvalThreading::default())
            .unwrap()
            .is_empty()
    );
}
