//! Async user flows over the platform collaborators.
//!
//! Each flow is pure: it awaits its collaborators and returns a [`FlowOutcome`] without
//! touching session state. The caller commits the outcome with a [`crate::ScreenToken`]
//! so results that settle after their screen went away are dropped. Collaborator errors
//! never escape a flow; they become a [`Notice`] or a silent cancellation.

use crate::{
    catalog::model::{CustomPose, Difficulty},
    config::SilhouetteConfig,
    foundation::error::ShotmateError,
    session::{
        collaborators::{Camera, CapturedFrame, Clock, ImagePicker, MediaLibrary, ShareSheet},
        store::CapturedPhoto,
    },
    silhouette::layout::silhouette_for_uri,
};

/// Default display name for imported poses.
pub const CUSTOM_POSE_NAME: &str = "Custom Pose";
/// Description given to imported poses.
pub const CUSTOM_POSE_DESCRIPTION: &str = "My custom pose";
/// The single tip given to imported poses.
pub const CUSTOM_POSE_TIP: &str = "Position yourself like in the image";

/// Which flow produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Pick a photo and turn it into a custom pose.
    ImportCustomPose,
    /// Fire the shutter.
    Capture,
    /// Save the previewed frame.
    Save,
    /// Share a kept photo.
    Share,
}

/// A one-shot message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub message: String,
    /// Whether the UI should offer to try again (permission prompts).
    pub retryable: bool,
}

impl Notice {
    fn new(title: &str, message: &str, retryable: bool) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            retryable,
        }
    }

    /// Shown after a photo is saved from the preview.
    pub fn photo_saved() -> Self {
        Self::new("Photo Saved!", "Your photo has been saved successfully.", false)
    }

    /// Shown after a custom pose import.
    pub fn custom_pose_saved() -> Self {
        Self::new("Success", "Custom pose saved successfully!", false)
    }

    /// Shown when sharing fell back to saving.
    pub fn saved_to_library() -> Self {
        Self::new("Success", "Photo saved to your media library", false)
    }

    /// Notice for `err` raised during `flow`; `None` for silent cancellations.
    pub fn for_error(flow: Flow, err: &ShotmateError) -> Option<Self> {
        if err.is_cancellation() {
            return None;
        }
        let denied = matches!(err, ShotmateError::PermissionDenied(_));
        Some(match (flow, denied) {
            (Flow::ImportCustomPose, true) => Self::new(
                "Permission required",
                "Permission to access media library is required!",
                true,
            ),
            (Flow::ImportCustomPose, false) => {
                Self::new("Error", "Failed to pick image. Please try again.", false)
            }
            (Flow::Capture, true) => Self::new(
                "Camera Access Required",
                "ShotMate needs camera access to help you take better photos with pose guidance.",
                true,
            ),
            (Flow::Capture, false) => {
                Self::new("Error", "Failed to take picture. Please try again.", false)
            }
            (Flow::Save, true) => Self::new(
                "Permission required",
                "Please grant media library access to save photos.",
                true,
            ),
            (Flow::Save, false) => {
                Self::new("Error", "Failed to save photo. Please try again.", false)
            }
            (Flow::Share, true) => Self::new(
                "Permission Required",
                "Please grant media library access to save photos",
                true,
            ),
            (Flow::Share, false) => Self::new("Error", "Failed to share photo", false),
        })
    }
}

/// How a flow ended.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowOutcome<T> {
    /// The flow produced a value.
    Completed(T),
    /// The user backed out; nothing to show.
    Cancelled,
    /// Something failed; show the notice.
    Failed(Notice),
}

impl<T> FlowOutcome<T> {
    fn from_error(flow: Flow, err: ShotmateError) -> Self {
        match Notice::for_error(flow, &err) {
            None => {
                tracing::debug!(?flow, "flow cancelled by user");
                Self::Cancelled
            }
            Some(notice) => {
                tracing::warn!(?flow, error = %err, "flow failed");
                Self::Failed(notice)
            }
        }
    }

    /// The completed value, if any.
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(v) => Some(v),
            Self::Cancelled | Self::Failed(_) => None,
        }
    }

    /// The failure notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Failed(n) => Some(n),
            Self::Completed(_) | Self::Cancelled => None,
        }
    }
}

/// Result of a successful share flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The share sheet took the photo.
    Shared,
    /// Sharing was unavailable, so the photo was saved instead.
    SavedToLibrary,
}

impl ShareOutcome {
    /// Notice to show, if any.
    pub fn notice(self) -> Option<Notice> {
        match self {
            Self::Shared => None,
            Self::SavedToLibrary => Some(Notice::saved_to_library()),
        }
    }
}

/// Pick a photo and build a custom pose with a generated silhouette.
///
/// The skeleton is generated at the processing canvas size from the picked URI, so the
/// same photo always yields the same pose shape.
pub async fn import_custom_pose<P: ImagePicker>(
    picker: &P,
    clock: &dyn Clock,
    name: Option<&str>,
    cfg: &SilhouetteConfig,
) -> FlowOutcome<CustomPose> {
    let picked = match picker.pick_image().await {
        Ok(p) => p,
        Err(e) => return FlowOutcome::from_error(Flow::ImportCustomPose, e),
    };

    let now = clock.now_ms();
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(CUSTOM_POSE_NAME);
    let silhouette = silhouette_for_uri(
        &picked.uri,
        f64::from(cfg.processing.width),
        f64::from(cfg.processing.height),
    );
    tracing::debug!(uri = %picked.uri, joints = silhouette.joints.len(), "imported custom pose");

    FlowOutcome::Completed(CustomPose {
        id: format!("custom-{now}"),
        name: name.to_string(),
        description: CUSTOM_POSE_DESCRIPTION.to_string(),
        difficulty: Difficulty::Medium,
        original_image: picked.uri,
        overlay_image: None,
        silhouette_data: Some(silhouette),
        tips: vec![CUSTOM_POSE_TIP.to_string()],
    })
}

/// Fire the shutter.
pub async fn capture_photo<C: Camera>(camera: &C) -> FlowOutcome<CapturedFrame> {
    match camera.take_picture().await {
        Ok(frame) => FlowOutcome::Completed(frame),
        Err(e) => FlowOutcome::from_error(Flow::Capture, e),
    }
}

/// Save `uri` to the library and build the kept-photo record.
pub async fn save_photo<M: MediaLibrary>(
    library: &M,
    clock: &dyn Clock,
    uri: &str,
    pose_id: Option<&str>,
) -> FlowOutcome<CapturedPhoto> {
    if let Err(e) = library.save_to_library(uri).await {
        return FlowOutcome::from_error(Flow::Save, e);
    }
    let now = clock.now_ms();
    FlowOutcome::Completed(CapturedPhoto {
        id: now.to_string(),
        uri: uri.to_string(),
        pose_id: pose_id.map(str::to_string),
        timestamp_ms: now,
    })
}

/// Share `uri`, falling back to saving it when sharing is unavailable.
pub async fn share_photo<S: ShareSheet, M: MediaLibrary>(
    sheet: &S,
    library: &M,
    uri: &str,
) -> FlowOutcome<ShareOutcome> {
    match sheet.share(uri).await {
        Ok(()) => FlowOutcome::Completed(ShareOutcome::Shared),
        Err(ShotmateError::NotAvailable(reason)) => {
            tracing::debug!(%reason, "sharing unavailable, saving instead");
            match library.save_to_library(uri).await {
                Ok(()) => FlowOutcome::Completed(ShareOutcome::SavedToLibrary),
                Err(e) => FlowOutcome::from_error(Flow::Share, e),
            }
        }
        Err(e) => FlowOutcome::from_error(Flow::Share, e),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/flows.rs"]
mod tests;
