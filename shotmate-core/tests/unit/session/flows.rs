use std::cell::RefCell;

use super::*;
use crate::{
    foundation::error::{Permission, ShotmateResult},
    session::collaborators::PickedImage,
};

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

struct Picker(fn() -> ShotmateResult<PickedImage>);

impl ImagePicker for Picker {
    async fn pick_image(&self) -> ShotmateResult<PickedImage> {
        (self.0)()
    }
}

struct Shutter(fn() -> ShotmateResult<CapturedFrame>);

impl Camera for Shutter {
    async fn take_picture(&self) -> ShotmateResult<CapturedFrame> {
        (self.0)()
    }
}

#[derive(Default)]
struct Library {
    deny: bool,
    fail: bool,
    saved: RefCell<Vec<String>>,
}

impl MediaLibrary for Library {
    async fn save_to_library(&self, uri: &str) -> ShotmateResult<()> {
        if self.deny {
            return Err(ShotmateError::PermissionDenied(Permission::MediaLibrary));
        }
        if self.fail {
            return Err(ShotmateError::save_failed("disk full"));
        }
        self.saved.borrow_mut().push(uri.to_string());
        Ok(())
    }
}

struct Sheet(fn() -> ShotmateResult<()>);

impl ShareSheet for Sheet {
    async fn share(&self, _uri: &str) -> ShotmateResult<()> {
        (self.0)()
    }
}

fn picked() -> ShotmateResult<PickedImage> {
    Ok(PickedImage {
        uri: "file://a.jpg".to_string(),
    })
}

#[test]
fn import_builds_custom_pose_with_defaults() {
    let outcome = pollster::block_on(import_custom_pose(
        &Picker(picked),
        &FixedClock(1_700_000_000_123),
        None,
        &SilhouetteConfig::default(),
    ));
    let pose = outcome.completed().unwrap();
    assert_eq!(pose.id, "custom-1700000000123");
    assert_eq!(pose.name, CUSTOM_POSE_NAME);
    assert_eq!(pose.description, "My custom pose");
    assert_eq!(pose.difficulty, Difficulty::Medium);
    assert_eq!(pose.tips, ["Position yourself like in the image"]);
    assert_eq!(pose.original_image, "file://a.jpg");
    assert_eq!(pose.overlay_image, None);
    assert_eq!(
        pose.silhouette_data,
        Some(silhouette_for_uri("file://a.jpg", 300.0, 400.0))
    );
}

#[test]
fn import_uses_a_given_name_unless_blank() {
    let cfg = SilhouetteConfig::default();
    let named = pollster::block_on(import_custom_pose(
        &Picker(picked),
        &FixedClock(1),
        Some("  Beach  "),
        &cfg,
    ));
    assert_eq!(named.completed().unwrap().name, "Beach");

    let blank = pollster::block_on(import_custom_pose(
        &Picker(picked),
        &FixedClock(1),
        Some("   "),
        &cfg,
    ));
    assert_eq!(blank.completed().unwrap().name, "Custom Pose");
}

#[test]
fn import_cancel_is_silent_and_denial_is_retryable() {
    let cfg = SilhouetteConfig::default();
    let cancelled = pollster::block_on(import_custom_pose(
        &Picker(|| Err(ShotmateError::UserCancelled)),
        &FixedClock(1),
        None,
        &cfg,
    ));
    assert_eq!(cancelled, FlowOutcome::Cancelled);

    let denied = pollster::block_on(import_custom_pose(
        &Picker(|| Err(ShotmateError::PermissionDenied(Permission::MediaLibrary))),
        &FixedClock(1),
        None,
        &cfg,
    ));
    let notice = denied.notice().unwrap();
    assert!(notice.retryable);
    assert_eq!(
        notice.message,
        "Permission to access media library is required!"
    );
}

#[test]
fn capture_failure_becomes_one_shot_notice() {
    let ok = pollster::block_on(capture_photo(&Shutter(|| {
        Ok(CapturedFrame {
            uri: "file://shot.jpg".to_string(),
        })
    })));
    assert_eq!(ok.completed().unwrap().uri, "file://shot.jpg");

    let failed = pollster::block_on(capture_photo(&Shutter(|| {
        Err(ShotmateError::capture_failed("shutter jammed"))
    })));
    let notice = failed.notice().unwrap();
    assert_eq!(notice.title, "Error");
    assert_eq!(notice.message, "Failed to take picture. Please try again.");
    assert!(!notice.retryable);
}

#[test]
fn save_records_pose_and_timestamp() {
    let lib = Library::default();
    let outcome = pollster::block_on(save_photo(
        &lib,
        &FixedClock(42),
        "file://shot.jpg",
        Some("standing-1"),
    ));
    let photo = outcome.completed().unwrap();
    assert_eq!(photo.id, "42");
    assert_eq!(photo.timestamp_ms, 42);
    assert_eq!(photo.pose_id.as_deref(), Some("standing-1"));
    assert_eq!(lib.saved.borrow().as_slice(), ["file://shot.jpg"]);
}

#[test]
fn save_errors_map_to_their_notices() {
    let denied = Library {
        deny: true,
        ..Library::default()
    };
    let out = pollster::block_on(save_photo(&denied, &FixedClock(1), "u", None));
    assert_eq!(out.notice().unwrap().title, "Permission required");
    assert!(out.notice().unwrap().retryable);

    let broken = Library {
        fail: true,
        ..Library::default()
    };
    let out = pollster::block_on(save_photo(&broken, &FixedClock(1), "u", None));
    assert_eq!(
        out.notice().unwrap().message,
        "Failed to save photo. Please try again."
    );
}

#[test]
fn share_falls_back_to_saving_when_unavailable() {
    let lib = Library::default();
    let out = pollster::block_on(share_photo(
        &Sheet(|| Err(ShotmateError::not_available("no share targets"))),
        &lib,
        "file://p.jpg",
    ));
    assert_eq!(out, FlowOutcome::Completed(ShareOutcome::SavedToLibrary));
    assert_eq!(
        ShareOutcome::SavedToLibrary.notice().unwrap().message,
        "Photo saved to your media library"
    );
    assert_eq!(lib.saved.borrow().len(), 1);
}

#[test]
fn share_success_and_failures() {
    let lib = Library::default();
    let shared = pollster::block_on(share_photo(&Sheet(|| Ok(())), &lib, "u"));
    assert_eq!(shared, FlowOutcome::Completed(ShareOutcome::Shared));
    assert!(ShareOutcome::Shared.notice().is_none());
    assert!(lib.saved.borrow().is_empty());

    let failed = pollster::block_on(share_photo(
        &Sheet(|| Err(ShotmateError::share_failed("boom"))),
        &lib,
        "u",
    ));
    assert_eq!(failed.notice().unwrap().message, "Failed to share photo");

    let denied = Library {
        deny: true,
        ..Library::default()
    };
    let fallback_denied = pollster::block_on(share_photo(
        &Sheet(|| Err(ShotmateError::not_available("none"))),
        &denied,
        "u",
    ));
    assert_eq!(
        fallback_denied.notice().unwrap().title,
        "Permission Required"
    );
}

#[test]
fn cancellation_never_produces_a_notice() {
    for flow in [Flow::ImportCustomPose, Flow::Capture, Flow::Save, Flow::Share] {
        assert!(Notice::for_error(flow, &ShotmateError::UserCancelled).is_none());
        assert!(Notice::for_error(flow, &ShotmateError::validation("x")).is_some());
    }
}
