//! ShotMate is the core of a pose-guidance camera app.
//!
//! It turns an image reference into a deterministic stick-figure silhouette, and places a
//! semi-transparent pose overlay over camera frames with user-adjustable geometry.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: `uri -> u32` via a 31-multiplier string hash ([`derive_seed`])
//! 2. **Generate**: seeded LCG draws -> [`SilhouetteData`] ([`generate_silhouette`])
//! 3. **Prepare**: pick the pose's [`VisualSource`] and decode or rasterize it once
//!    ([`OverlayCache`])
//! 4. **Composite**: [`OverlayTransform`] + store opacity -> pixels over a [`FrameRGBA`]
//!    ([`composite_overlay`])
//!
//! Session state ([`PoseStore`], [`CameraScreen`]) and the async user flows
//! ([`import_custom_pose`], [`capture_photo`], [`save_photo`], [`share_photo`]) sit on top and
//! talk to the platform only through the collaborator traits ([`ImagePicker`], [`Camera`],
//! [`MediaLibrary`], [`ShareSheet`]).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same image reference always yields the same silhouette.
//! - **Total core**: generation and transforms never fail; only IO and decoding return errors.
//! - **Premultiplied RGBA8** end-to-end for prepared overlays and frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod config;
mod foundation;
mod overlay;
mod session;
mod silhouette;

pub use catalog::model::{
    CategoryDescriptor, CustomPose, Difficulty, Pose, PoseCategory, PoseRef, SelectedPose,
};
pub use catalog::poses::{CategoryFilter, PoseCatalog};
pub use config::{OverlayConfig, ShotmateConfig, SilhouetteConfig};
pub use foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{Permission, ShotmateError, ShotmateResult};
pub use overlay::composite::{OverlayLayer, composite_overlay, contain_fit};
pub use overlay::prepare::{
    FsUriLoader, OverlayCache, OverlayId, OverlayKind, PreparedImage, PreparedOverlay, UriLoader,
    decode_image,
};
pub use overlay::source::{VisualSource, select_visual_source};
pub use overlay::transform::{Nudge, OverlayControls, OverlayTransform, parse_rotation_input};
pub use session::camera::CameraScreen;
pub use session::collaborators::{
    Camera, CapturedFrame, Clock, ImagePicker, MediaLibrary, PickedImage, ShareSheet, SystemClock,
};
pub use session::flows::{
    CUSTOM_POSE_DESCRIPTION, CUSTOM_POSE_NAME, CUSTOM_POSE_TIP, Flow, FlowOutcome, Notice,
    ShareOutcome, capture_photo, import_custom_pose, save_photo, share_photo,
};
pub use session::store::{CameraFacing, CapturedPhoto, PoseStore, Screen, ScreenToken};
pub use silhouette::data::{JointMarker, SilhouetteData};
pub use silhouette::draws::{
    BaseMeasurements, Facing, FrontDraws, Orientation, PoseDraws, SideDraws, SkeletonDraws,
};
pub use silhouette::layout::{
    LIMB_JOINT_RADIUS, TORSO_JOINT_RADIUS, generate_silhouette, silhouette_for_uri,
};
pub use silhouette::seed::{Lcg, RandomSource, derive_seed, make_generator};
pub use silhouette::svg::{SilhouetteStyle, parse_path, rasterize_silhouette, to_svg_document};
