use crate::{
    animation::ease::Ease,
    animation::interp::progress,
    foundation::error::{LyricueError, LyricueResult},
};

/// Authoring form of a segment. A missing `end` runs until the next segment's start, or
/// forever for the last one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentSpec {
    pub start: f64,
    #[serde(default)]
    pub end: Option<f64>,
    pub asset: String,
}

/// Half-open interval `[start, end)` mapped to a visual asset. `end` may be infinite.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    pub start: f64,
    #[serde(skip_serializing_if = "is_unbounded")]
    pub end: f64,
    pub asset: String,
}

fn is_unbounded(end: &f64) -> bool {
    end.is_infinite()
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    fn local_progress(&self, t: f64) -> f64 {
        if self.end.is_finite() {
            ((t - self.start) / self.duration()).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Crossfade behaviour for [`SegmentTrack::blend`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendOpts {
    /// Length of the crossfade ending at each contiguous boundary.
    pub fade_secs: f64,
    /// Shapes the crossfade weight; both layers still sum to one.
    pub ease: Ease,
    /// Fade in from / out to nothing where a segment has no contiguous neighbour.
    pub edge_fade: bool,
}

impl Default for BlendOpts {
    fn default() -> Self {
        Self {
            fade_secs: 0.8,
            ease: Ease::Linear,
            edge_fade: true,
        }
    }
}

/// One visible layer of a [`SegmentBlend`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SegmentLayer {
    /// Index of the segment (or slide) the layer shows.
    pub index: usize,
    pub asset: String,
    pub opacity: f64,
    /// Progress through the segment, `0` for unbounded segments.
    pub progress: f64,
}

/// Layers visible at one instant, bottom first: none, one, or two during a crossfade.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SegmentBlend {
    pub layers: Vec<SegmentLayer>,
}

impl SegmentBlend {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn total_opacity(&self) -> f64 {
        self.layers.iter().map(|l| l.opacity).sum()
    }
}

/// Validated, time-ordered, non-overlapping segment list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SegmentTrack {
    segments: Vec<Segment>,
}

impl SegmentTrack {
    pub fn new(specs: Vec<SegmentSpec>) -> LyricueResult<Self> {
        let mut segments = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if !spec.start.is_finite() || spec.start < 0.0 {
                return Err(LyricueError::validation(format!(
                    "segment {i} start must be finite and >= 0"
                )));
            }
            if spec.asset.trim().is_empty() {
                return Err(LyricueError::validation(format!(
                    "segment {i} asset must be non-empty"
                )));
            }
            let next_start = specs.get(i + 1).map(|n| n.start);
            if let Some(next) = next_start
                && next <= spec.start
            {
                return Err(LyricueError::validation(format!(
                    "segment {} must start after segment {i}",
                    i + 1
                )));
            }

            let end = spec.end.or(next_start).unwrap_or(f64::INFINITY);
            if end.is_nan() || end <= spec.start {
                return Err(LyricueError::validation(format!(
                    "segment {i} end must be greater than its start"
                )));
            }
            if let Some(next) = next_start
                && end > next
            {
                return Err(LyricueError::validation(format!(
                    "segment {i} overlaps segment {}",
                    i + 1
                )));
            }

            segments.push(Segment {
                start: spec.start,
                end,
                asset: spec.asset.clone(),
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment containing `t`, if any.
    pub fn lookup(&self, t: f64) -> Option<(usize, &Segment)> {
        if !t.is_finite() {
            return None;
        }
        let idx = self.segments.partition_point(|s| s.start <= t);
        let i = idx.checked_sub(1)?;
        let seg = &self.segments[i];
        seg.contains(t).then_some((i, seg))
    }

    /// Layers visible at `t`.
    ///
    /// Inside the last `fade_secs` before a contiguous boundary the current and the next
    /// segment are both reported, with opacities summing to one. The fade is clamped to
    /// the shorter of the two segments.
    pub fn blend(&self, t: f64, opts: &BlendOpts) -> SegmentBlend {
        let Some((i, seg)) = self.lookup(t) else {
            return SegmentBlend::default();
        };
        let fade = if opts.fade_secs.is_finite() {
            opts.fade_secs.max(0.0)
        } else {
            0.0
        };
        let layer = |index: usize, seg: &Segment, opacity: f64| SegmentLayer {
            index,
            asset: seg.asset.clone(),
            opacity,
            progress: seg.local_progress(t),
        };

        let next = self.segments.get(i + 1).filter(|n| n.start <= seg.end);
        if let Some(next) = next {
            let f = fade.min(seg.duration()).min(next.duration());
            if f > 0.0 && t >= seg.end - f {
                let w = progress(t, seg.end - f, seg.end, opts.ease);
                return SegmentBlend {
                    layers: vec![layer(i, seg, 1.0 - w), layer(i + 1, next, w)],
                };
            }
        }

        let mut opacity: f64 = 1.0;
        if opts.edge_fade && fade > 0.0 {
            let f = fade.min(seg.duration());
            let has_prev = i > 0 && self.segments[i - 1].end >= seg.start;
            if !has_prev {
                opacity = opacity.min(progress(t, seg.start, seg.start + f, opts.ease));
            }
            if next.is_none() && seg.end.is_finite() {
                opacity = opacity.min(1.0 - progress(t, seg.end - f, seg.end, opts.ease));
            }
        }
        SegmentBlend {
            layers: vec![layer(i, seg, opacity)],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/segment.rs"]
mod tests;
