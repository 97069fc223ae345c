/// Convenience result type used across lyricue.
pub type LyricueResult<T> = Result<T, LyricueError>;

/// Top-level error taxonomy.
///
/// Parsing and cue resolution never produce errors; these variants only surface at
/// authoring boundaries (scene files, segment tables, keyframe tables, frame requests).
#[derive(thiserror::Error, Debug)]
pub enum LyricueError {
    /// Invalid user-provided scene or timeline data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating or sampling interpolation tables.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating scene state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyricueError {
    /// Build a [`LyricueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LyricueError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`LyricueError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`LyricueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
