use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
    foundation::error::{LyricueError, LyricueResult},
};

/// Values that can be blended linearly with a factor `t` in `[0, 1]`.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Piecewise interpolation of `t` over the control points `input -> output`.
///
/// Clamped on both sides: `t` at or before `input[0]` yields `output[0]`, at or after the
/// last control point yields the last output. Values are never extrapolated. `ease`
/// shapes every span. A zero-width span (repeated input point) snaps to its later value.
pub fn interpolate<T>(t: f64, input: &[f64], output: &[T], ease: Ease) -> LyricueResult<T>
where
    T: Lerp + Clone,
{
    if input.is_empty() {
        return Err(LyricueError::animation(
            "interpolate needs at least one control point",
        ));
    }
    if input.len() != output.len() {
        return Err(LyricueError::animation(format!(
            "interpolate input/output length mismatch ({} vs {})",
            input.len(),
            output.len()
        )));
    }
    if input.iter().any(|v| !v.is_finite()) {
        return Err(LyricueError::animation(
            "interpolate control points must be finite",
        ));
    }
    if !input.windows(2).all(|w| w[0] <= w[1]) {
        return Err(LyricueError::animation(
            "interpolate control points must be non-decreasing",
        ));
    }
    ease.validate()?;
    Ok(sample_clamped(t, input, output, ease))
}

/// Normalized, eased progress of `t` through `[start, end]`.
///
/// `0` before `start`, `1` from `end` on. An empty span is a step at `start`.
pub fn progress(t: f64, start: f64, end: f64, ease: Ease) -> f64 {
    if t.is_nan() || t < start {
        return 0.0;
    }
    if t >= end {
        return 1.0;
    }
    ease.apply((t - start) / (end - start))
}

/// Two-point clamped ramp: `from` at or before `start`, `to` at or after `end`.
///
/// Infallible form of [`interpolate`] for the common single-span case.
pub fn ramp(t: f64, start: f64, end: f64, from: f64, to: f64, ease: Ease) -> f64 {
    let p = progress(t, start, end, ease);
    if p <= 0.0 {
        return from;
    }
    if t >= end {
        return to;
    }
    <f64 as Lerp>::lerp(&from, &to, p)
}

fn sample_clamped<T>(t: f64, input: &[f64], output: &[T], ease: Ease) -> T
where
    T: Lerp + Clone,
{
    let last = input.len() - 1;
    if t.is_nan() || t <= input[0] {
        return output[0].clone();
    }
    if t >= input[last] {
        return output[last].clone();
    }

    // First control point strictly after t; t < input[last] keeps idx in 1..=last.
    let idx = input.partition_point(|&x| x <= t);
    let (a, b) = (input[idx - 1], input[idx]);
    let span = b - a;
    if span <= 0.0 {
        return output[idx].clone();
    }
    let u = ease.apply((t - a) / span);
    T::lerp(&output[idx - 1], &output[idx], u)
}

/// Ordered keyframe track evaluated at a playback time in seconds.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by time
    pub mode: InterpMode,       // linear/hold
    pub default: Option<T>,     // value when no keys exist
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// A single-value track.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                time: 0.0,
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
            default: None,
        }
    }

    pub fn validate(&self) -> LyricueResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(LyricueError::animation(
                "Keyframes must have at least one key or a default value",
            ));
        }
        if self.keys.iter().any(|k| !k.time.is_finite()) {
            return Err(LyricueError::animation("Keyframes times must be finite"));
        }
        if !self.keys.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(LyricueError::animation(
                "Keyframes keys must be sorted by time",
            ));
        }
        Ok(())
    }

    /// Sample at `t` seconds, holding the first/last key outside the keyed range.
    pub fn sample(&self, t: f64) -> LyricueResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| LyricueError::animation("Keyframes has no keys and no default"));
        }

        let idx = self.keys.partition_point(|k| k.time <= t);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.time - a.time;
        if span <= 0.0 {
            return Ok(a.value.clone());
        }

        let te = a.ease.apply((t - a.time) / span);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub time: f64,
    pub value: T,
    #[serde(default)]
    pub ease: Ease, // ease applied toward next key
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    Hold,
    Linear,
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
