use std::{fmt::Write as _, sync::Arc};

use anyhow::Context;

use crate::{
    config::SilhouetteConfig,
    foundation::{
        core::{BezPath, Canvas, Rgba8},
        error::{ShotmateError, ShotmateResult},
    },
    overlay::prepare::PreparedImage,
    silhouette::data::SilhouetteData,
};

/// How generated vector data is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SilhouetteStyle {
    /// Coordinate space of the drawing.
    pub view_box: Canvas,
    /// Stroke and joint colour.
    pub color: Rgba8,
    /// Stroke width in viewBox units.
    pub stroke_width: f64,
    /// Opacity applied to each path and joint.
    pub opacity: f64,
}

impl Default for SilhouetteStyle {
    fn default() -> Self {
        Self::from(&SilhouetteConfig::default())
    }
}

impl From<&SilhouetteConfig> for SilhouetteStyle {
    fn from(cfg: &SilhouetteConfig) -> Self {
        Self {
            view_box: cfg.view_box,
            color: cfg.stroke_rgba8,
            stroke_width: cfg.stroke_width,
            opacity: cfg.opacity,
        }
    }
}

/// Render silhouette data as a standalone SVG document.
///
/// Paths are stroked (no fill) and emitted first; joints are filled circles on top.
pub fn to_svg_document(data: &SilhouetteData, style: &SilhouetteStyle) -> String {
    let Canvas { width, height } = style.view_box;
    let color = style.color.to_hex_rgb();
    let opacity = style.opacity.clamp(0.0, 1.0) * f64::from(style.color.a) / 255.0;

    let mut out = String::new();
    // writes into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for d in &data.paths {
        let _ = writeln!(
            out,
            r#"  <path d="{}" stroke="{color}" stroke-width="{}" fill="none" opacity="{opacity}"/>"#,
            escape_attr(d),
            style.stroke_width,
        );
    }
    for j in &data.joints {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{color}" opacity="{opacity}"/>"#,
            j.x, j.y, j.radius
        );
    }
    out.push_str("</svg>\n");
    out
}

/// Parse one path descriptor into Bezier geometry.
pub fn parse_path(d: &str) -> ShotmateResult<BezPath> {
    BezPath::from_svg(d)
        .map_err(|e| ShotmateError::validation(format!("invalid path descriptor '{d}': {e:?}")))
}

/// Rasterize silhouette data into premultiplied RGBA8 at `size`.
///
/// The style's viewBox is stretched to `size`. An empty `size` yields an empty image.
#[tracing::instrument(level = "debug", skip(data, style))]
pub fn rasterize_silhouette(
    data: &SilhouetteData,
    style: &SilhouetteStyle,
    size: Canvas,
) -> ShotmateResult<PreparedImage> {
    if size.is_empty() || style.view_box.is_empty() {
        return Ok(PreparedImage::empty(size));
    }

    let doc = to_svg_document(data, style);
    let tree = usvg::Tree::from_str(&doc, &usvg::Options::default())
        .context("parse generated silhouette svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| ShotmateError::validation("failed to allocate silhouette pixmap"))?;
    let sx = (size.width as f32) / tree.size().width();
    let sy = (size.height as f32) / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Ok(PreparedImage {
        width: size.width,
        height: size.height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/svg.rs"]
mod tests;
