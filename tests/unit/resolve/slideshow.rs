use super::*;

fn show() -> Slideshow {
    Slideshow {
        ease: Ease::Linear,
        ..Slideshow::new(vec!["a.png".into(), "b.png".into(), "c.png".into()])
    }
}

fn assets(blend: &SegmentBlend) -> Vec<&str> {
    blend.layers.iter().map(|l| l.asset.as_str()).collect()
}

#[test]
fn rotates_one_asset_per_cycle() {
    let s = show();
    assert_eq!(assets(&s.sample(0.0)), ["a.png"]);
    assert_eq!(assets(&s.sample(9.5)), ["b.png"]);
    assert_eq!(assets(&s.sample(18.5)), ["c.png"]);
    assert_eq!(assets(&s.sample(27.5)), ["a.png"]);
}

#[test]
fn end_of_cycle_crossfades_into_the_next_asset() {
    let s = show();
    let blend = s.sample(8.1);
    assert_eq!(assets(&blend), ["a.png", "b.png"]);
    assert!((blend.layers[1].opacity - 0.5).abs() < 1e-9);
    assert!((blend.total_opacity() - 1.0).abs() < 1e-12);

    // wrap-around from the last asset
    assert_eq!(assets(&s.sample(26.5)), ["c.png", "a.png"]);
}

#[test]
fn single_asset_never_crossfades() {
    let s = Slideshow::new(vec!["only.png".into()]);
    let blend = s.sample(8.9);
    assert_eq!(assets(&blend), ["only.png"]);
    assert_eq!(blend.layers[0].opacity, 1.0);
}

#[test]
fn sampling_is_order_independent() {
    let s = show();
    let a = s.sample(40.0);
    let _ = s.sample(3.0);
    assert_eq!(s.sample(40.0), a);
    assert_eq!(assets(&s.sample(-5.0)), ["a.png"]);
}

#[test]
fn validation_rejects_bad_configs() {
    assert!(Slideshow::new(vec![]).validate().is_err());
    let mut s = show();
    s.cycle_secs = 0.0;
    assert!(s.validate().is_err());
    let mut s = show();
    s.transition_secs = 10.0;
    assert!(s.validate().is_err());
    assert!(show().validate().is_ok());
    assert!(Slideshow::new(vec![]).sample(1.0).is_empty());
}

#[test]
fn cycle_boundaries_land_on_the_next_asset() {
    let s = show();
    assert_eq!(assets(&s.sample(9.0)), ["b.png"]);
    assert_eq!(assets(&s.sample(27.0)), ["a.png"]);
    let blend = s.sample(90.0);
    assert_eq!(assets(&blend), ["b.png"]);
    assert_eq!(blend.layers[0].progress, 0.0);
}

#[test]
fn overshooting_curve_is_rejected() {
    let mut s = show();
    s.ease = Ease::CubicBezier {
        x1: 0.3,
        y1: 1.8,
        x2: 0.7,
        y2: 1.8,
    };
    assert!(s.validate().is_err());
    assert!(s.sample(8.5).is_empty());
}
