//! Lyric timing files: the timed cue model and the LRC timestamp parser.

pub(crate) mod cue;
pub(crate) mod parser;
