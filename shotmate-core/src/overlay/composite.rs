use resvg::tiny_skia;

use crate::{
    foundation::{
        core::{Affine, Canvas, FrameRGBA, Vec2},
        error::{ShotmateError, ShotmateResult},
    },
    overlay::{prepare::PreparedImage, transform::OverlayTransform},
};

/// One overlay draw: prepared pixels, the live transform and the store's opacity.
#[derive(Clone, Copy, Debug)]
pub struct OverlayLayer<'a> {
    /// Pixels to draw.
    pub image: &'a PreparedImage,
    /// Placement inside the frame.
    pub transform: OverlayTransform,
    /// Content opacity in `[0, 1]`.
    pub opacity: f64,
}

impl OverlayLayer<'_> {
    /// Full image-to-frame mapping: fit the content, then apply the transform about the
    /// frame centre.
    pub fn affine(&self, frame: Canvas) -> Affine {
        self.transform.affine_about(frame.center()) * contain_fit(self.image.canvas(), frame)
    }
}

/// Uniformly scale `content` to fit inside `container`, centred.
///
/// Returns identity when either side is empty.
pub fn contain_fit(content: Canvas, container: Canvas) -> Affine {
    if content.is_empty() || container.is_empty() {
        return Affine::IDENTITY;
    }
    let (cw, ch) = (f64::from(content.width), f64::from(content.height));
    let (fw, fh) = (f64::from(container.width), f64::from(container.height));
    let s = (fw / cw).min(fh / ch);
    let dx = (fw - cw * s) / 2.0;
    let dy = (fh - ch * s) / 2.0;
    Affine::translate(Vec2::new(dx, dy)) * Affine::scale(s)
}

/// Draw `layer` over `frame` in place (premultiplied source-over).
///
/// Empty images, empty frames and zero opacity leave the frame untouched.
#[tracing::instrument(level = "trace", skip(frame, layer))]
pub fn composite_overlay(frame: &mut FrameRGBA, layer: &OverlayLayer<'_>) -> ShotmateResult<()> {
    let canvas = frame.canvas();
    let opacity = if layer.opacity.is_finite() {
        layer.opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if layer.image.is_empty() || canvas.is_empty() || opacity == 0.0 {
        return Ok(());
    }

    let affine = layer.affine(canvas);
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let transform =
        tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32);

    let src = tiny_skia::PixmapRef::from_bytes(
        &layer.image.rgba8_premul,
        layer.image.width,
        layer.image.height,
    )
    .ok_or_else(|| ShotmateError::validation("overlay pixel buffer does not match its size"))?;
    let mut dst = tiny_skia::PixmapMut::from_bytes(&mut frame.data, canvas.width, canvas.height)
        .ok_or_else(|| ShotmateError::validation("frame pixel buffer does not match its size"))?;

    let paint = tiny_skia::PixmapPaint {
        opacity: opacity as f32,
        blend_mode: tiny_skia::BlendMode::SourceOver,
        quality: tiny_skia::FilterQuality::Bilinear,
    };
    dst.draw_pixmap(0, 0, src, &paint, transform, None);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/composite.rs"]
mod tests;
