//! Platform services the core consumes but never implements.
//!
//! Implementations report failures with the matching [`crate::ShotmateError`] variant.
//! Flows turn those into user-facing notices; nothing here propagates to the caller.

#![allow(async_fn_in_trait)]

use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::error::ShotmateResult;

/// An image the user chose from their library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedImage {
    /// Reference to the chosen image.
    pub uri: String,
}

/// A frame returned by the camera shutter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Reference to the captured image.
    pub uri: String,
}

/// Photo library picker.
pub trait ImagePicker {
    /// Let the user choose one image.
    ///
    /// Fails with `PermissionDenied` or `UserCancelled`.
    async fn pick_image(&self) -> ShotmateResult<PickedImage>;
}

/// Device camera.
pub trait Camera {
    /// Fire the shutter. Fails with `CaptureFailed`.
    async fn take_picture(&self) -> ShotmateResult<CapturedFrame>;
}

/// Device photo library.
pub trait MediaLibrary {
    /// Persist `uri` to the library. Fails with `PermissionDenied` or `SaveFailed`.
    async fn save_to_library(&self, uri: &str) -> ShotmateResult<()>;
}

/// System share sheet.
pub trait ShareSheet {
    /// Offer `uri` to other apps. Fails with `NotAvailable` or `ShareFailed`.
    async fn share(&self, uri: &str) -> ShotmateResult<()>;
}

/// Wall-clock source for ids and timestamps.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// [`Clock`] backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}
