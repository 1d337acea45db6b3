use crate::{
    catalog::model::{CustomPose, Pose, PoseRef},
    silhouette::data::SilhouetteData,
};

/// What the overlay actually draws for a pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualSource<'a> {
    /// A dedicated overlay image.
    OverlayImage(&'a str),
    /// The catalog pose's static silhouette image.
    SilhouetteImage(&'a str),
    /// Generated skeleton vector data.
    Generated(&'a SilhouetteData),
    /// The custom pose's original photo.
    OriginalImage(&'a str),
}

impl<'a> VisualSource<'a> {
    /// Image reference, for raster sources.
    pub fn uri(self) -> Option<&'a str> {
        match self {
            Self::OverlayImage(u) | Self::SilhouetteImage(u) | Self::OriginalImage(u) => Some(u),
            Self::Generated(_) => None,
        }
    }

    /// True for generated vector data.
    pub fn is_vector(self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Pick the visual source for `pose`.
///
/// Priority: overlay image, then static silhouette image, then generated data, then the
/// custom pose's original image.
pub fn select_visual_source(pose: PoseRef<'_>) -> VisualSource<'_> {
    match pose {
        PoseRef::Standard(Pose {
            overlay_image: Some(uri),
            ..
        })
        | PoseRef::Custom(CustomPose {
            overlay_image: Some(uri),
            ..
        }) => VisualSource::OverlayImage(uri),
        PoseRef::Standard(p) => VisualSource::SilhouetteImage(&p.silhouette_url),
        PoseRef::Custom(CustomPose {
            silhouette_data: Some(data),
            ..
        }) => VisualSource::Generated(data),
        PoseRef::Custom(p) => VisualSource::OriginalImage(&p.original_image),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/source.rs"]
mod tests;
