use super::*;
use crate::{
    catalog::{model::SelectedPose, poses::PoseCatalog},
    foundation::core::Canvas,
    session::store::Screen,
};

fn store_with_pose() -> PoseStore {
    let mut store = PoseStore::default();
    let pose = PoseCatalog::builtin().unwrap().get("standing-1").unwrap().clone();
    store.set_selected_pose(Some(SelectedPose::from(pose)));
    store
}

#[test]
fn stepping_rotation_keeps_text_in_sync() {
    let mut cam = CameraScreen::default();
    assert_eq!(cam.rotation_text(), "0");
    cam.rotate_step(true);
    cam.rotate_step(true);
    assert_eq!(cam.transform().rotation_deg, 10);
    assert_eq!(cam.rotation_text(), "10");
    cam.rotate_z_step(false);
    assert_eq!(cam.z_rotation_text(), "-5");
}

#[test]
fn typed_rotation_applies_on_submit() {
    let mut cam = CameraScreen::default();
    cam.edit_rotation_text("-15");
    assert_eq!(cam.transform().rotation_deg, 0);
    assert_eq!(cam.submit_rotation_text(), -15);

    cam.edit_z_rotation_text("abc");
    assert_eq!(cam.submit_z_rotation_text(), 0);
    assert_eq!(cam.z_rotation_text(), "abc");

    cam.edit_rotation_text("720");
    assert_eq!(cam.submit_rotation_text(), 720);
}

#[test]
fn full_reset_clears_everything_including_buffers() {
    let mut cam = CameraScreen::default();
    cam.zoom_in();
    cam.nudge(Nudge::Left);
    cam.rotate_step(true);
    cam.rotate_z_step(true);
    cam.toggle_flip_h();
    cam.toggle_flip_v();
    assert!(cam.is_adjusted());

    cam.reset_adjustments();
    assert!(!cam.is_adjusted());
    assert_eq!(*cam.transform(), OverlayTransform::IDENTITY);
    assert_eq!((cam.rotation_text(), cam.z_rotation_text()), ("0", "0"));
}

#[test]
fn panel_resets_are_partial() {
    let mut cam = CameraScreen::default();
    cam.set_scale(1.2);
    cam.rotate_step(false);
    cam.rotate_z_step(true);
    cam.toggle_flip_v();

    cam.reset_rotation();
    assert_eq!(cam.transform().rotation_deg, 0);
    assert!(!cam.transform().flip_v);
    assert_eq!(cam.transform().z_rotation_deg, 5);
    assert!((cam.transform().scale - 1.2).abs() < 1e-12);

    cam.reset_z_rotation();
    assert_eq!(cam.transform().z_rotation_deg, 0);
    assert_eq!(cam.z_rotation_text(), "0");
    assert!(cam.is_adjusted());
}

#[test]
fn facing_defaults_to_front() {
    let mut cam = CameraScreen::default();
    assert_eq!(cam.facing(), CameraFacing::Front);
    cam.toggle_facing();
    assert_eq!(cam.facing(), CameraFacing::Back);
}

#[test]
fn opacity_goes_through_the_store() {
    let cam = CameraScreen::default();
    let mut store = PoseStore::default();
    cam.set_opacity(&mut store, 0.87);
    assert!((store.overlay_opacity() - 0.9).abs() < 1e-12);
    cam.set_opacity(&mut store, 0.01);
    assert!((store.overlay_opacity() - 0.1).abs() < 1e-12);
}

#[test]
fn layer_requires_selection_and_visibility() {
    let cam = CameraScreen::default();
    let img = PreparedImage::empty(Canvas::new(2, 2));

    assert!(cam.overlay_layer(&PoseStore::default(), &img).is_none());

    let mut store = store_with_pose();
    let layer = cam.overlay_layer(&store, &img).unwrap();
    assert_eq!(layer.opacity, 0.3);
    assert_eq!(layer.transform, OverlayTransform::IDENTITY);

    store.toggle_overlay();
    assert!(cam.overlay_layer(&store, &img).is_none());
}

#[test]
fn capture_then_save_keeps_photo_and_clears_preview() {
    let mut cam = CameraScreen::default();
    let mut store = store_with_pose();
    let token = store.token(Screen::Camera);

    let frame = CapturedFrame {
        uri: "file://shot.jpg".to_string(),
    };
    assert_eq!(
        cam.apply_capture(&store, token, FlowOutcome::Completed(frame)),
        None
    );
    assert_eq!(cam.preview(), Some("file://shot.jpg"));

    let photo = CapturedPhoto {
        id: "9".to_string(),
        uri: "file://shot.jpg".to_string(),
        pose_id: store.selected_pose_id().map(str::to_string),
        timestamp_ms: 9,
    };
    let notice = cam.apply_save(&mut store, token, FlowOutcome::Completed(photo));
    assert_eq!(notice, Some(Notice::photo_saved()));
    assert_eq!(cam.preview(), None);
    assert_eq!(
        store.captured_photos()[0].pose_id.as_deref(),
        Some("standing-1")
    );
}

#[test]
fn results_for_an_inactive_camera_are_dropped() {
    let mut cam = CameraScreen::default();
    let mut store = store_with_pose();
    let token = store.token(Screen::Camera);
    store.deactivate(Screen::Camera);

    let frame = CapturedFrame {
        uri: "file://late.jpg".to_string(),
    };
    assert_eq!(
        cam.apply_capture(&store, token, FlowOutcome::Completed(frame)),
        None
    );
    assert_eq!(cam.preview(), None);

    let failed = FlowOutcome::Failed(Notice::photo_saved());
    assert_eq!(cam.apply_save(&mut store, token, failed), None);
}

#[test]
fn discarding_preview_returns_to_viewfinder() {
    let mut cam = CameraScreen::default();
    let store = PoseStore::default();
    let token = store.token(Screen::Camera);
    cam.apply_capture(
        &store,
        token,
        FlowOutcome::Completed(CapturedFrame {
            uri: "file://x.jpg".to_string(),
        }),
    );
    cam.discard_preview();
    assert!(cam.preview().is_none());
}
