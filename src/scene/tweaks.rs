use std::collections::BTreeMap;

/// Per-asset framing override. Absent fields fall back to [`ResolvedTweak::default`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tweak {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift_px: Option<f64>,
    /// Normalized focal point, `[x, y]` in `0..=1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<[f64; 2]>,
}

/// A tweak with every field filled in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedTweak {
    pub base_scale: f64,
    pub lift_px: f64,
    pub focus: [f64; 2],
}

impl Default for ResolvedTweak {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            lift_px: 0.0,
            focus: [0.5, 0.5],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AssetTweaks(pub BTreeMap<String, Tweak>);

impl AssetTweaks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: impl Into<String>, tweak: Tweak) {
        self.0.insert(asset.into(), tweak);
    }

    pub fn get(&self, asset: &str) -> Option<&Tweak> {
        self.0.get(asset)
    }

    pub fn resolve(&self, asset: &str) -> ResolvedTweak {
        let d = ResolvedTweak::default();
        match self.0.get(asset) {
            None => d,
            Some(t) => ResolvedTweak {
                base_scale: t.base_scale.unwrap_or(d.base_scale),
                lift_px: t.lift_px.unwrap_or(d.lift_px),
                focus: t.focus.unwrap_or(d.focus),
            },
        }
    }

    pub(crate) fn validate(&self) -> crate::LyricueResult<()> {
        for (asset, t) in &self.0 {
            if let Some(s) = t.base_scale
                && !(s.is_finite() && s > 0.0)
            {
                return Err(crate::LyricueError::validation(format!(
                    "tweak for '{asset}': base_scale must be finite and > 0"
                )));
            }
            if t.lift_px.is_some_and(|v| !v.is_finite()) {
                return Err(crate::LyricueError::validation(format!(
                    "tweak for '{asset}': lift_px must be finite"
                )));
            }
            if let Some([x, y]) = t.focus
                && !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y))
            {
                return Err(crate::LyricueError::validation(format!(
                    "tweak for '{asset}': focus must lie in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/tweaks.rs"]
mod tests;
