use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    catalog::model::PoseRef,
    foundation::{
        core::{Canvas, FrameRGBA},
        error::{ShotmateError, ShotmateResult},
        math::{Fnv1a64, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
    },
    overlay::source::{VisualSource, select_visual_source},
    silhouette::svg::{SilhouetteStyle, rasterize_silhouette},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Fully transparent image of `size`.
    pub fn empty(size: Canvas) -> Self {
        let len = (size.width as usize) * (size.height as usize) * 4;
        Self {
            width: size.width,
            height: size.height,
            rgba8_premul: Arc::new(vec![0; len]),
        }
    }

    /// Image dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.canvas().is_empty()
    }

    /// Copy of the pixels in straight (non-premultiplied) RGBA8, for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }
}

impl From<PreparedImage> for FrameRGBA {
    fn from(img: PreparedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            data: Arc::unwrap_or_clone(img.rgba8_premul),
        }
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ShotmateResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Resolves an image reference to encoded bytes.
pub trait UriLoader {
    /// Read the bytes behind `uri`.
    fn load(&self, uri: &str) -> ShotmateResult<Vec<u8>>;
}

/// Loads `file://` URIs and plain paths from the local filesystem.
///
/// Relative paths are resolved against `root`. Remote schemes are rejected.
#[derive(Clone, Debug, Default)]
pub struct FsUriLoader {
    root: PathBuf,
}

impl FsUriLoader {
    /// Loader resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map `uri` to a filesystem path.
    pub fn resolve(&self, uri: &str) -> ShotmateResult<PathBuf> {
        let raw = uri.trim();
        if raw.is_empty() {
            return Err(ShotmateError::validation("image uri must be non-empty"));
        }
        let path = match raw.split_once("://") {
            Some(("file", rest)) => Path::new(rest).to_path_buf(),
            Some((scheme, _)) => {
                return Err(ShotmateError::validation(format!(
                    "unsupported uri scheme '{scheme}' in '{raw}'"
                )));
            }
            None => Path::new(raw).to_path_buf(),
        };
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.root.join(path))
        }
    }
}

impl UriLoader for FsUriLoader {
    fn load(&self, uri: &str) -> ShotmateResult<Vec<u8>> {
        let path = self.resolve(uri)?;
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(ShotmateError::from)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Stable hashed identifier of a prepared overlay.
pub struct OverlayId(u64);

impl OverlayId {
    /// Access raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the prepared pixels came from.
pub enum OverlayKind {
    /// Decoded from an image reference.
    Raster,
    /// Rasterized from generated silhouette data.
    Vector,
}

#[derive(Clone, Debug)]
/// An overlay ready to composite: decoded or rasterized exactly once.
pub struct PreparedOverlay {
    /// Cache identity.
    pub id: OverlayId,
    /// Source kind.
    pub kind: OverlayKind,
    /// Premultiplied pixels.
    pub image: PreparedImage,
}

/// Per-session cache of prepared overlays, keyed by pose id and visual source.
///
/// Only the transform varies between renders, so each pose's pixels are built once.
/// Generated silhouettes are drawn at full element opacity; the style's own opacity only
/// applies to standalone exports.
#[derive(Debug, Default)]
pub struct OverlayCache {
    style: SilhouetteStyle,
    entries: HashMap<OverlayId, PreparedOverlay>,
}

impl OverlayCache {
    /// Cache drawing generated silhouettes with `style`.
    pub fn new(style: SilhouetteStyle) -> Self {
        Self {
            style,
            entries: HashMap::new(),
        }
    }

    /// Number of cached overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been prepared yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached overlay.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Identity of the overlay `pose` would produce.
    pub fn id_for(pose: PoseRef<'_>) -> OverlayId {
        let source = select_visual_source(pose);
        let mut hasher = Fnv1a64::new_default();
        hasher.write_str(pose.id());
        match source {
            VisualSource::OverlayImage(uri) => {
                hasher.write_u8(b'O');
                hasher.write_str(uri);
            }
            VisualSource::SilhouetteImage(uri) => {
                hasher.write_u8(b'S');
                hasher.write_str(uri);
            }
            VisualSource::Generated(data) => {
                hasher.write_u8(b'G');
                for d in &data.paths {
                    hasher.write_str(d);
                }
                for j in &data.joints {
                    hasher.write_bytes(&j.x.to_bits().to_le_bytes());
                    hasher.write_bytes(&j.y.to_bits().to_le_bytes());
                    hasher.write_bytes(&j.radius.to_bits().to_le_bytes());
                }
            }
            VisualSource::OriginalImage(uri) => {
                hasher.write_u8(b'I');
                hasher.write_str(uri);
            }
        }
        OverlayId(hasher.finish())
    }

    /// Prepare (or fetch) the overlay for `pose`.
    #[tracing::instrument(level = "debug", skip(self, pose, loader), fields(pose = pose.id()))]
    pub fn prepare(
        &mut self,
        pose: PoseRef<'_>,
        loader: &dyn UriLoader,
    ) -> ShotmateResult<&PreparedOverlay> {
        let id = Self::id_for(pose);
        match self.entries.entry(id) {
            std::collections::hash_map::Entry::Occupied(e) => Ok(e.into_mut()),
            std::collections::hash_map::Entry::Vacant(v) => {
                let (kind, image) = match select_visual_source(pose) {
                    VisualSource::Generated(data) => {
                        // the layer opacity is the only fade applied to overlays
                        let style = SilhouetteStyle {
                            opacity: 1.0,
                            ..self.style
                        };
                        (
                            OverlayKind::Vector,
                            rasterize_silhouette(data, &style, style.view_box)?,
                        )
                    }
                    source => {
                        // every other source carries a uri
                        let uri = source.uri().unwrap_or_default();
                        (OverlayKind::Raster, decode_image(&loader.load(uri)?)?)
                    }
                };
                tracing::debug!(
                    id = id.as_u64(),
                    ?kind,
                    width = image.width,
                    height = image.height,
                    "prepared overlay"
                );
                Ok(v.insert(PreparedOverlay { id, kind, image }))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/prepare.rs"]
mod tests;
