//! Easing curves, the clamp-only interpolation primitive and time-remapping helpers.

pub(crate) mod ease;
pub(crate) mod interp;
pub(crate) mod ops;
