use super::*;
use crate::catalog::model::Difficulty;

fn photo(id: &str, pose: Option<&str>) -> CapturedPhoto {
    CapturedPhoto {
        id: id.to_string(),
        uri: format!("file://{id}.jpg"),
        pose_id: pose.map(str::to_string),
        timestamp_ms: id.parse().unwrap_or(0),
    }
}

fn custom(id: &str) -> CustomPose {
    CustomPose {
        id: id.to_string(),
        name: "Custom Pose".to_string(),
        description: "My custom pose".to_string(),
        difficulty: Difficulty::Medium,
        original_image: "file://a.jpg".to_string(),
        overlay_image: None,
        silhouette_data: None,
        tips: vec![],
    }
}

#[test]
fn defaults_match_a_fresh_session() {
    let s = PoseStore::default();
    assert!(s.selected_pose().is_none());
    assert!(s.show_overlay());
    assert_eq!(s.overlay_opacity(), 0.3);
    assert!(s.captured_photos().is_empty());
    assert!(s.custom_pose().is_none());
}

#[test]
fn photos_are_kept_newest_first_and_removable() {
    let mut s = PoseStore::default();
    s.add_captured_photo(photo("1", None));
    s.add_captured_photo(photo("2", Some("standing-1")));
    let ids: Vec<&str> = s.captured_photos().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);

    assert!(s.remove_captured_photo("1"));
    assert!(!s.remove_captured_photo("1"));
    assert_eq!(s.captured_photos().len(), 1);
}

#[test]
fn setting_custom_pose_selects_it_and_replaces_previous() {
    let mut s = PoseStore::default();
    s.set_custom_pose(custom("custom-1"));
    s.set_custom_pose(custom("custom-2"));
    assert_eq!(s.custom_pose().map(|p| p.id.as_str()), Some("custom-2"));
    assert_eq!(s.selected_pose_id(), Some("custom-2"));
    assert!(matches!(s.selected_pose(), Some(PoseRef::Custom(_))));

    s.set_selected_pose(None);
    assert!(s.selected_pose().is_none());
    assert!(s.custom_pose().is_some());
}

#[test]
fn overlay_toggle_and_opacity_writes() {
    let mut s = PoseStore::default();
    s.toggle_overlay();
    assert!(!s.show_overlay());
    s.toggle_overlay();
    assert!(s.show_overlay());

    s.set_overlay_opacity(0.7);
    assert_eq!(s.overlay_opacity(), 0.7);
    s.set_overlay_opacity(3.0);
    assert_eq!(s.overlay_opacity(), 1.0);
    s.set_overlay_opacity(f64::NAN);
    assert_eq!(s.overlay_opacity(), 1.0);
}

#[test]
fn stale_tokens_are_dropped() {
    let mut s = PoseStore::default();
    let token = s.token(Screen::CustomPose);
    let other = s.token(Screen::Camera);
    s.deactivate(Screen::CustomPose);

    assert!(!s.is_current(token));
    assert!(s.is_current(other));
    assert_eq!(s.commit(token, |s| s.toggle_overlay()), None);
    assert!(s.show_overlay());

    let notice = s.apply_import(token, FlowOutcome::Completed(custom("custom-9")));
    assert!(notice.is_none());
    assert!(s.custom_pose().is_none());

    let fresh = s.token(Screen::CustomPose);
    let notice = s.apply_import(fresh, FlowOutcome::Completed(custom("custom-9")));
    assert_eq!(notice, Some(Notice::custom_pose_saved()));
    assert_eq!(s.selected_pose_id(), Some("custom-9"));
}

#[test]
fn import_failures_pass_their_notice_through() {
    let mut s = PoseStore::default();
    let token = s.token(Screen::CustomPose);
    let n = Notice::for_error(
        crate::session::flows::Flow::ImportCustomPose,
        &ShotmateError::validation("x"),
    )
    .unwrap();
    assert_eq!(
        s.apply_import(token, FlowOutcome::Failed(n.clone())),
        Some(n)
    );
    assert_eq!(s.apply_import(token, FlowOutcome::Cancelled), None);
    assert!(s.custom_pose().is_none());
}

#[test]
fn photo_resolves_only_catalog_poses() {
    let catalog = PoseCatalog::builtin().unwrap();
    assert_eq!(
        photo("1", Some("sitting-2"))
            .pose(&catalog)
            .map(|p| p.name.as_str()),
        Some("Leaning Forward")
    );
    assert!(photo("1", Some("custom-5")).pose(&catalog).is_none());
    assert!(photo("1", None).pose(&catalog).is_none());
}

#[test]
fn diagnostic_json_uses_payload_keys() {
    let mut s = PoseStore::default();
    s.add_captured_photo(photo("5", Some("casual-2")));
    let json = s.to_json_string().unwrap();
    assert!(json.contains("\"capturedPhotos\""));
    assert!(json.contains("\"poseId\": \"casual-2\""));
    assert!(json.contains("\"timestamp\": 5"));
    assert!(!json.contains("epochs"));
}

#[test]
fn facing_toggles() {
    assert_eq!(CameraFacing::default(), CameraFacing::Front);
    assert_eq!(CameraFacing::Front.toggled(), CameraFacing::Back);
    assert_eq!(CameraFacing::Back.toggled(), CameraFacing::Front);
}

#[test]
fn photos_saved_in_the_same_millisecond_get_distinct_ids() {
    let mut s = PoseStore::default();
    assert_eq!(s.add_captured_photo(photo("9", None)), "9");
    assert_eq!(s.add_captured_photo(photo("9", None)), "9-1");
    assert_eq!(s.add_captured_photo(photo("9", None)), "9-2");

    assert!(s.remove_captured_photo("9-1"));
    let ids: Vec<&str> = s.captured_photos().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["9-2", "9"]);
}
