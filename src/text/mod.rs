//! Mixed-script lyric text: character classification and run segmentation.

pub(crate) mod runs;
