/// Start time of the `index`-th element of a staggered reveal.
pub fn stagger_start(base: f64, index: usize, step: f64) -> f64 {
    base + (index as f64) * step.max(0.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    #[default]
    Repeat,
    PingPong,
}

/// Map `t` into one period: `[0, period)` for `Repeat`, a back-and-forth over `[0, period]`
/// for `PingPong`.
///
/// Negative times wrap the same way positive ones do, so backwards seeks land on the same
/// phase. A non-positive or non-finite period leaves `t` untouched.
pub fn loop_time(t: f64, period: f64, mode: LoopMode) -> f64 {
    if !(period.is_finite() && period > 0.0) || !t.is_finite() {
        return t;
    }
    match mode {
        LoopMode::Repeat => t.rem_euclid(period),
        LoopMode::PingPong => {
            let pos = t.rem_euclid(2.0 * period);
            if pos < period { pos } else { 2.0 * period - pos }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
