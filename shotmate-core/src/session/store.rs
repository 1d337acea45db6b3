use crate::{
    catalog::{
        model::{CustomPose, Pose, PoseRef, SelectedPose},
        poses::PoseCatalog,
    },
    config::OverlayConfig,
    foundation::error::{ShotmateError, ShotmateResult},
    session::flows::{FlowOutcome, Notice},
};

/// A photo the user kept.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPhoto {
    /// Stable id (the save timestamp as a decimal string).
    pub id: String,
    /// Reference to the saved image.
    pub uri: String,
    /// Pose selected when the photo was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_id: Option<String>,
    /// Save time in milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
}

impl CapturedPhoto {
    /// Catalog pose this photo was taken with.
    ///
    /// Only catalog poses resolve; custom poses are replaced on every import.
    pub fn pose<'a>(&self, catalog: &'a PoseCatalog) -> Option<&'a Pose> {
        self.pose_id.as_deref().and_then(|id| catalog.get(id))
    }
}

/// Which camera is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    /// Selfie camera.
    #[default]
    Front,
    /// Rear camera.
    Back,
}

impl CameraFacing {
    /// The other camera.
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Screens that start async flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Live viewfinder and capture preview.
    Camera,
    /// Custom pose import.
    CustomPose,
    /// Saved photo grid.
    Gallery,
}

impl Screen {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Self::Camera => 0,
            Self::CustomPose => 1,
            Self::Gallery => 2,
        }
    }
}

/// Proof that a flow was started while its screen was active.
///
/// A token goes stale once the screen is deactivated; results committed with a stale token
/// are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenToken {
    screen: Screen,
    epoch: u64,
}

impl ScreenToken {
    /// Screen the token was issued for.
    pub fn screen(self) -> Screen {
        self.screen
    }
}

/// Shared session state: selection, overlay settings, custom pose and kept photos.
///
/// Synchronous and last-writer-wins. Serializes to JSON for diagnostics only.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseStore {
    selected_pose: Option<SelectedPose>,
    show_overlay: bool,
    overlay_opacity: f64,
    captured_photos: Vec<CapturedPhoto>,
    custom_pose: Option<CustomPose>,
    #[serde(skip)]
    epochs: [u64; Screen::COUNT],
}

impl Default for PoseStore {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}

impl PoseStore {
    /// Empty store using `cfg`'s default opacity.
    pub fn new(cfg: &OverlayConfig) -> Self {
        Self {
            selected_pose: None,
            show_overlay: true,
            overlay_opacity: cfg.default_opacity,
            captured_photos: Vec::new(),
            custom_pose: None,
            epochs: [0; Screen::COUNT],
        }
    }

    /// Currently selected pose.
    pub fn selected_pose(&self) -> Option<PoseRef<'_>> {
        self.selected_pose.as_ref().map(SelectedPose::as_ref)
    }

    /// Id of the selected pose.
    pub fn selected_pose_id(&self) -> Option<&str> {
        self.selected_pose.as_ref().map(SelectedPose::id)
    }

    /// Replace (or clear) the selection.
    pub fn set_selected_pose(&mut self, pose: Option<SelectedPose>) {
        self.selected_pose = pose;
    }

    /// Whether the overlay is drawn.
    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    /// Flip overlay visibility.
    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
    }

    /// Overlay content opacity.
    pub fn overlay_opacity(&self) -> f64 {
        self.overlay_opacity
    }

    /// Store an opacity, clamped to `[0, 1]`. Step snapping is the controls' job.
    pub fn set_overlay_opacity(&mut self, opacity: f64) {
        if opacity.is_finite() {
            self.overlay_opacity = opacity.clamp(0.0, 1.0);
        }
    }

    /// Kept photos, newest first.
    pub fn captured_photos(&self) -> &[CapturedPhoto] {
        &self.captured_photos
    }

    /// Keep a photo at the front of the list; returns the id it was stored under.
    ///
    /// Ids are timestamps, so a clash within one millisecond gets a `-N` suffix.
    pub fn add_captured_photo(&mut self, mut photo: CapturedPhoto) -> &str {
        if self.has_photo(&photo.id) {
            let base = photo.id.clone();
            let mut n = 1u32;
            while self.has_photo(&format!("{base}-{n}")) {
                n += 1;
            }
            photo.id = format!("{base}-{n}");
        }
        self.captured_photos.insert(0, photo);
        &self.captured_photos[0].id
    }

    fn has_photo(&self, id: &str) -> bool {
        self.captured_photos.iter().any(|p| p.id == id)
    }

    /// Forget the photo with `id`; returns whether one was removed.
    pub fn remove_captured_photo(&mut self, id: &str) -> bool {
        let before = self.captured_photos.len();
        self.captured_photos.retain(|p| p.id != id);
        self.captured_photos.len() != before
    }

    /// The current custom pose.
    pub fn custom_pose(&self) -> Option<&CustomPose> {
        self.custom_pose.as_ref()
    }

    /// Replace the custom pose and select it.
    pub fn set_custom_pose(&mut self, pose: CustomPose) {
        self.selected_pose = Some(SelectedPose::Custom(pose.clone()));
        self.custom_pose = Some(pose);
    }

    /// Token for a flow started now on `screen`.
    pub fn token(&self, screen: Screen) -> ScreenToken {
        ScreenToken {
            screen,
            epoch: self.epochs[screen.index()],
        }
    }

    /// Mark `screen` inactive; its outstanding tokens go stale.
    pub fn deactivate(&mut self, screen: Screen) {
        let e = &mut self.epochs[screen.index()];
        *e = e.wrapping_add(1);
    }

    /// Whether `token` is still current.
    pub fn is_current(&self, token: ScreenToken) -> bool {
        self.epochs[token.screen.index()] == token.epoch
    }

    /// Apply `f` if `token` is current; stale results are dropped.
    pub fn commit<R>(&mut self, token: ScreenToken, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        if !self.is_current(token) {
            tracing::debug!(screen = ?token.screen, "dropping result for inactive screen");
            return None;
        }
        Some(f(self))
    }

    /// Commit the result of [`crate::import_custom_pose`]; returns the notice to show.
    pub fn apply_import(
        &mut self,
        token: ScreenToken,
        outcome: FlowOutcome<CustomPose>,
    ) -> Option<Notice> {
        self.commit(token, |s| match outcome {
            FlowOutcome::Completed(pose) => {
                s.set_custom_pose(pose);
                Some(Notice::custom_pose_saved())
            }
            FlowOutcome::Cancelled => None,
            FlowOutcome::Failed(n) => Some(n),
        })
        .flatten()
    }

    /// Diagnostic snapshot.
    pub fn to_json_string(&self) -> ShotmateResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShotmateError::serde(format!("serialize pose store: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/store.rs"]
mod tests;
