//! Per-frame evaluation of a loaded scene.

pub(crate) mod evaluator;
