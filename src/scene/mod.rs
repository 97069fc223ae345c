//! Declarative scene description and its loaded runtime form.

pub(crate) mod model;
pub(crate) mod tweaks;
