use super::*;

#[test]
fn unknown_asset_resolves_to_defaults() {
    let tweaks = AssetTweaks::new();
    assert_eq!(tweaks.resolve("nope.png"), ResolvedTweak::default());
    assert_eq!(ResolvedTweak::default().base_scale, 1.0);
    assert_eq!(ResolvedTweak::default().focus, [0.5, 0.5]);
}

#[test]
fn partial_tweak_fills_missing_fields() {
    let mut tweaks = AssetTweaks::new();
    tweaks.insert(
        "face.jpg",
        Tweak {
            base_scale: Some(1.1),
            ..Tweak::default()
        },
    );
    let r = tweaks.resolve("face.jpg");
    assert_eq!(r.base_scale, 1.1);
    assert_eq!(r.lift_px, 0.0);
    assert_eq!(r.focus, [0.5, 0.5]);
}

#[test]
fn deserializes_from_a_plain_map() {
    let tweaks: AssetTweaks = serde_json::from_str(
        r#"{ "a.jpg": { "lift_px": 12.0, "focus": [0.5, 0.3] }, "b.jpg": {} }"#,
    )
    .unwrap();
    let a = tweaks.resolve("a.jpg");
    assert_eq!(a.lift_px, 12.0);
    assert_eq!(a.focus, [0.5, 0.3]);
    assert_eq!(tweaks.resolve("b.jpg"), ResolvedTweak::default());
    tweaks.validate().unwrap();
}

#[test]
fn rejects_unknown_fields_and_bad_values() {
    assert!(serde_json::from_str::<AssetTweaks>(r#"{ "a.jpg": { "zoom": 2 } }"#).is_err());

    let mut tweaks = AssetTweaks::new();
    tweaks.insert(
        "a.jpg",
        Tweak {
            base_scale: Some(0.0),
            ..Tweak::default()
        },
    );
    assert!(tweaks.validate().is_err());

    let mut tweaks = AssetTweaks::new();
    tweaks.insert(
        "a.jpg",
        Tweak {
            focus: Some([1.5, 0.5]),
            ..Tweak::default()
        },
    );
    assert!(tweaks.validate().is_err());
}
