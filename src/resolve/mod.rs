//! Stateless time-to-state resolution.
//!
//! Everything here is a pure function of `(timeline, time)`: no query remembers anything
//! about a previous one, so frames can be resolved in any order or in parallel.

pub(crate) mod cue;
pub(crate) mod envelope;
pub(crate) mod segment;
pub(crate) mod slideshow;
