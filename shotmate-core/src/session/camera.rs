use crate::{
    config::OverlayConfig,
    overlay::{
        composite::OverlayLayer,
        prepare::PreparedImage,
        transform::{Nudge, OverlayControls, OverlayTransform, parse_rotation_input},
    },
    session::{
        collaborators::CapturedFrame,
        flows::{FlowOutcome, Notice},
        store::{CameraFacing, CapturedPhoto, PoseStore, ScreenToken},
    },
};

/// Camera screen state: live overlay adjustments, rotation entry, facing and capture
/// preview.
///
/// Overlay opacity lives in [`PoseStore`]; this screen only writes it through its controls.
#[derive(Clone, Debug)]
pub struct CameraScreen {
    controls: OverlayControls,
    transform: OverlayTransform,
    rotation_text: String,
    z_rotation_text: String,
    facing: CameraFacing,
    preview: Option<String>,
}

impl Default for CameraScreen {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl CameraScreen {
    /// Screen using `cfg` for control ranges.
    pub fn new(cfg: OverlayConfig) -> Self {
        Self {
            controls: OverlayControls::new(cfg),
            transform: OverlayTransform::IDENTITY,
            rotation_text: "0".to_string(),
            z_rotation_text: "0".to_string(),
            facing: CameraFacing::default(),
            preview: None,
        }
    }

    /// Current overlay placement.
    pub fn transform(&self) -> &OverlayTransform {
        &self.transform
    }

    /// Whether a reset would change anything.
    pub fn is_adjusted(&self) -> bool {
        self.transform.is_adjusted()
    }

    /// Live camera.
    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    /// Switch between front and back cameras.
    pub fn toggle_facing(&mut self) {
        self.facing = self.facing.toggled();
    }

    /// Captured frame awaiting save or discard.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Drop the preview and return to the viewfinder.
    pub fn discard_preview(&mut self) {
        self.preview = None;
    }

    /// Scale slider write.
    pub fn set_scale(&mut self, scale: f64) {
        self.controls.set_scale(&mut self.transform, scale);
    }

    /// One scale step up.
    pub fn zoom_in(&mut self) {
        self.controls.zoom_in(&mut self.transform);
    }

    /// One scale step down.
    pub fn zoom_out(&mut self) {
        self.controls.zoom_out(&mut self.transform);
    }

    /// Move the overlay one offset step.
    pub fn nudge(&mut self, dir: Nudge) {
        self.controls.nudge(&mut self.transform, dir);
    }

    /// Mirror left to right.
    pub fn toggle_flip_h(&mut self) {
        self.transform.flip_h = !self.transform.flip_h;
    }

    /// Mirror top to bottom.
    pub fn toggle_flip_v(&mut self) {
        self.transform.flip_v = !self.transform.flip_v;
    }

    /// Rotation entry buffer, as typed.
    pub fn rotation_text(&self) -> &str {
        &self.rotation_text
    }

    /// Z-rotation entry buffer, as typed.
    pub fn z_rotation_text(&self) -> &str {
        &self.z_rotation_text
    }

    /// Turn one rotation step and mirror the value into the buffer.
    pub fn rotate_step(&mut self, clockwise: bool) {
        let deg = self.controls.rotate_step(&mut self.transform, clockwise);
        self.rotation_text = deg.to_string();
    }

    /// Turn one Z-rotation step and mirror the value into the buffer.
    pub fn rotate_z_step(&mut self, clockwise: bool) {
        let deg = self.controls.rotate_z_step(&mut self.transform, clockwise);
        self.z_rotation_text = deg.to_string();
    }

    /// Replace the rotation buffer without applying it.
    pub fn edit_rotation_text(&mut self, text: impl Into<String>) {
        self.rotation_text = text.into();
    }

    /// Replace the Z-rotation buffer without applying it.
    pub fn edit_z_rotation_text(&mut self, text: impl Into<String>) {
        self.z_rotation_text = text.into();
    }

    /// Parse the rotation buffer and apply it. The buffer keeps what the user typed.
    pub fn submit_rotation_text(&mut self) -> i32 {
        self.transform.rotation_deg = parse_rotation_input(&self.rotation_text);
        self.transform.rotation_deg
    }

    /// Parse the Z-rotation buffer and apply it.
    pub fn submit_z_rotation_text(&mut self) -> i32 {
        self.transform.z_rotation_deg = parse_rotation_input(&self.z_rotation_text);
        self.transform.z_rotation_deg
    }

    /// Reset every adjustment and both entry buffers.
    pub fn reset_adjustments(&mut self) {
        self.transform.reset();
        self.rotation_text = "0".to_string();
        self.z_rotation_text = "0".to_string();
    }

    /// Rotation panel reset: primary rotation and both flips only.
    pub fn reset_rotation(&mut self) {
        self.transform.rotation_deg = 0;
        self.transform.flip_h = false;
        self.transform.flip_v = false;
        self.rotation_text = "0".to_string();
    }

    /// Z-rotation panel reset.
    pub fn reset_z_rotation(&mut self) {
        self.transform.z_rotation_deg = 0;
        self.z_rotation_text = "0".to_string();
    }

    /// Snap `opacity` to the slider grid and store it.
    pub fn set_opacity(&self, store: &mut PoseStore, opacity: f64) {
        store.set_overlay_opacity(self.controls.clamp_opacity(opacity));
    }

    /// The overlay to draw over the viewfinder, if one is visible.
    pub fn overlay_layer<'a>(
        &self,
        store: &PoseStore,
        image: &'a PreparedImage,
    ) -> Option<OverlayLayer<'a>> {
        if !store.show_overlay() || store.selected_pose().is_none() {
            return None;
        }
        Some(OverlayLayer {
            image,
            transform: self.transform,
            opacity: store.overlay_opacity(),
        })
    }

    /// Commit a [`crate::capture_photo`] result; returns the notice to show.
    pub fn apply_capture(
        &mut self,
        store: &PoseStore,
        token: ScreenToken,
        outcome: FlowOutcome<CapturedFrame>,
    ) -> Option<Notice> {
        if !store.is_current(token) {
            tracing::debug!("dropping capture for inactive camera screen");
            return None;
        }
        match outcome {
            FlowOutcome::Completed(frame) => {
                self.preview = Some(frame.uri);
                None
            }
            FlowOutcome::Cancelled => None,
            FlowOutcome::Failed(n) => Some(n),
        }
    }

    /// Commit a [`crate::save_photo`] result: keep the photo and leave the preview.
    pub fn apply_save(
        &mut self,
        store: &mut PoseStore,
        token: ScreenToken,
        outcome: FlowOutcome<CapturedPhoto>,
    ) -> Option<Notice> {
        store
            .commit(token, |s| match outcome {
                FlowOutcome::Completed(photo) => {
                    s.add_captured_photo(photo);
                    self.preview = None;
                    Some(Notice::photo_saved())
                }
                FlowOutcome::Cancelled => None,
                FlowOutcome::Failed(n) => Some(n),
            })
            .flatten()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/camera.rs"]
mod tests;
