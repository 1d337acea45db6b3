//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or a missing file) yields the stock
//! camera-screen behaviour.

use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{ShotmateError, ShotmateResult},
};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShotmateConfig {
    /// Live overlay controls.
    pub overlay: OverlayConfig,
    /// Silhouette generation and drawing.
    pub silhouette: SilhouetteConfig,
}

/// Ranges and step sizes for the live overlay controls.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Opacity used before the user touches the slider.
    pub default_opacity: f64,
    /// Lowest selectable opacity.
    pub opacity_min: f64,
    /// Highest selectable opacity.
    pub opacity_max: f64,
    /// Slider increment for opacity.
    pub opacity_step: f64,
    /// Lowest selectable scale.
    pub scale_min: f64,
    /// Highest selectable scale.
    pub scale_max: f64,
    /// Slider increment for scale.
    pub scale_step: f64,
    /// Pixels moved per nudge tap.
    pub offset_step_px: f64,
    /// Degrees turned per rotation tap.
    pub rotation_step_deg: i32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            default_opacity: 0.3,
            opacity_min: 0.1,
            opacity_max: 0.9,
            opacity_step: 0.1,
            scale_min: 0.5,
            scale_max: 1.5,
            scale_step: 0.05,
            offset_step_px: 10.0,
            rotation_step_deg: 5,
        }
    }
}

/// Silhouette generation canvas and stroke style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SilhouetteConfig {
    /// Canvas the imported photo is normalised to before generation.
    pub processing: Canvas,
    /// ViewBox the generated vector data is drawn into.
    pub view_box: Canvas,
    /// Stroke and joint colour.
    pub stroke_rgba8: Rgba8,
    /// Stroke width in viewBox units.
    pub stroke_width: f64,
    /// Per-element opacity baked into the vector drawing.
    pub opacity: f64,
}

impl Default for SilhouetteConfig {
    fn default() -> Self {
        Self {
            processing: Canvas::new(300, 400),
            view_box: Canvas::new(400, 600),
            stroke_rgba8: Rgba8::opaque(0x3b, 0x82, 0xf6),
            stroke_width: 2.0,
            opacity: 0.8,
        }
    }
}

impl ShotmateConfig {
    /// Parse configuration from a JSON document and validate it.
    pub fn from_json_str(s: &str) -> ShotmateResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ShotmateError::serde(format!("parse config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields [`ShotmateConfig::default`]; an unreadable or invalid file is an
    /// error.
    pub fn load(path: &Path) -> ShotmateResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check that ranges are ordered and steps are positive.
    pub fn validate(&self) -> ShotmateResult<()> {
        let o = &self.overlay;
        check_range("overlay.opacity", o.opacity_min, o.opacity_max, o.opacity_step)?;
        check_range("overlay.scale", o.scale_min, o.scale_max, o.scale_step)?;
        if !(o.opacity_min..=o.opacity_max).contains(&o.default_opacity) {
            return Err(ShotmateError::validation(
                "overlay.default_opacity must lie within [opacity_min, opacity_max]",
            ));
        }
        if o.opacity_min < 0.0 || o.opacity_max > 1.0 {
            return Err(ShotmateError::validation(
                "overlay opacity range must lie within [0, 1]",
            ));
        }
        if !o.offset_step_px.is_finite() || o.offset_step_px <= 0.0 {
            return Err(ShotmateError::validation(
                "overlay.offset_step_px must be > 0",
            ));
        }
        if o.rotation_step_deg <= 0 {
            return Err(ShotmateError::validation(
                "overlay.rotation_step_deg must be > 0",
            ));
        }

        let s = &self.silhouette;
        if s.view_box.is_empty() {
            return Err(ShotmateError::validation(
                "silhouette.view_box must be non-empty",
            ));
        }
        if !s.stroke_width.is_finite() || s.stroke_width < 0.0 {
            return Err(ShotmateError::validation(
                "silhouette.stroke_width must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&s.opacity) {
            return Err(ShotmateError::validation(
                "silhouette.opacity must lie within [0, 1]",
            ));
        }
        Ok(())
    }
}

fn check_range(name: &str, min: f64, max: f64, step: f64) -> ShotmateResult<()> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        return Err(ShotmateError::validation(format!(
            "{name} range must be finite"
        )));
    }
    if min > max {
        return Err(ShotmateError::validation(format!(
            "{name} min must be <= max"
        )));
    }
    if step <= 0.0 {
        return Err(ShotmateError::validation(format!("{name} step must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
