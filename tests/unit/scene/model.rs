use super::*;

const MINIMAL: &str = r#"{ "fps": { "num": 30, "den": 1 }, "duration": 90 }"#;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lyricue-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn minimal_scene_takes_defaults() {
    let scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.emphasis_tags, ["chorus", "sabi"]);
    assert_eq!(scene.timing, CueTiming::default());
    assert_eq!(scene.motion.entry_scale, [0.3, 1.0]);
    assert_eq!(scene.background_motion.zoom, 0.04);
    assert!(scene.lyrics.is_none());
    assert!(scene.segments.is_empty());
}

#[test]
fn full_scene_parses() {
    let scene = Scene::from_json_str(
        r#"{
            "fps": { "num": 30000, "den": 1001 },
            "duration": 300,
            "lyrics": { "inline": "[00:01.00]hello" },
            "timing": { "default_tail_secs": 3.0 },
            "envelope": { "pre_roll": 0.2, "ease_in": "InOutCubic" },
            "segments": [
                { "start": 0.0, "asset": "a.jpg" },
                { "start": 4.0, "end": 8.0, "asset": "b.jpg" }
            ],
            "blend": { "fade_secs": 0.5 },
            "slideshow": { "assets": ["x.jpg", "y.jpg"] },
            "tweaks": { "a.jpg": { "base_scale": 1.04 } }
        }"#,
    )
    .unwrap();
    scene.validate().unwrap();
    assert_eq!(scene.timing.default_tail_secs, 3.0);
    assert_eq!(scene.timing.min_duration_secs, 1.0 / 30.0);
    assert_eq!(scene.envelope.pre_roll, 0.2);
    assert_eq!(scene.envelope.fade_in, Envelope::default().fade_in);
    assert_eq!(scene.slideshow.as_ref().unwrap().cycle_secs, 9.0);
    assert!(scene.blend.edge_fade);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Scene::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, LyricueError::Serde(_)));
}

#[test]
fn validate_rejects_bad_configuration() {
    let base = Scene::from_json_str(MINIMAL).unwrap();

    let mut s = base.clone();
    s.duration = 0;
    assert!(matches!(s.validate(), Err(LyricueError::Validation(_))));

    let mut s = base.clone();
    s.fps.den = 0;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.envelope.fade_in = -1.0;
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.segments = vec![
        SegmentSpec {
            start: 2.0,
            end: None,
            asset: "a".into(),
        },
        SegmentSpec {
            start: 1.0,
            end: None,
            asset: "b".into(),
        },
    ];
    assert!(s.validate().is_err());

    let mut s = base.clone();
    s.slideshow = Some(Slideshow::new(Vec::new()));
    assert!(s.validate().is_err());

    let mut s = base;
    s.blend.ease = Ease::CubicBezier {
        x1: 0.25,
        y1: -0.5,
        x2: 0.25,
        y2: 1.0,
    };
    assert!(matches!(s.validate(), Err(LyricueError::Animation(_))));
}

#[test]
fn overshooting_envelope_curve_is_rejected_from_json() {
    let json = r#"{
        "fps": { "num": 30, "den": 1 },
        "duration": 90,
        "envelope": { "ease_in": { "CubicBezier": { "x1": 0.3, "y1": 1.8, "x2": 0.7, "y2": 1.8 } } }
    }"#;
    let scene = Scene::from_json_str(json).unwrap();
    let err = SceneRuntime::from_parts(scene, CueList::empty()).unwrap_err();
    assert!(matches!(err, LyricueError::Animation(_)));
}

#[test]
fn inline_lyrics_use_scene_emphasis_tags() {
    let mut scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.lyrics = Some(LyricsSource::Inline(
        "[00:01.00]{hook}one\n[00:02.00]{chorus}two".into(),
    ));
    scene.emphasis_tags = vec!["hook".into()];
    let rt = SceneRuntime::load(scene, Path::new(".")).unwrap();
    assert_eq!(rt.cues.len(), 2);
    assert!(rt.cues[0].is_emphasized);
    assert!(!rt.cues[1].is_emphasized);
}

#[test]
fn lyrics_file_resolves_against_base_dir() {
    let dir = temp_dir("lyrics-ok");
    std::fs::write(dir.join("song.lrc"), "[00:00.50]first\n[00:02.00]second\n").unwrap();
    let mut scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.lyrics = Some(LyricsSource::Path("song.lrc".into()));

    let rt = SceneRuntime::load(scene, &dir).unwrap();
    assert_eq!(rt.cues.len(), 2);
    assert_eq!(rt.cues[1].text, "second");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_lyrics_file_yields_empty_cues() {
    let dir = temp_dir("lyrics-missing");
    let mut scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.lyrics = Some(LyricsSource::Path("does-not-exist.lrc".into()));

    let rt = SceneRuntime::load(scene, &dir).unwrap();
    assert!(rt.cues.is_empty());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn from_parts_rejects_invalid_scene() {
    let mut scene = Scene::from_json_str(MINIMAL).unwrap();
    scene.duration = 0;
    assert!(SceneRuntime::from_parts(scene, CueList::empty()).is_err());
}

#[test]
fn from_path_reports_missing_scene_file() {
    let err = Scene::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, LyricueError::Other(_)));
}
