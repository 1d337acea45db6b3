/// Convenience result type used across ShotMate.
pub type ShotmateResult<T> = Result<T, ShotmateError>;

/// Platform capability guarded by a user permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Permission {
    /// Access to the device camera.
    Camera,
    /// Read/write access to the photo library.
    MediaLibrary,
}

impl Permission {
    /// Human-readable capability name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::MediaLibrary => "media library",
        }
    }
}

/// Top-level error taxonomy used by collaborators and engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShotmateError {
    /// The user refused access to a platform capability.
    #[error("permission denied: {} access refused", .0.name())]
    PermissionDenied(Permission),

    /// The user dismissed a picker without choosing anything.
    #[error("cancelled by user")]
    UserCancelled,

    /// The camera shutter did not return a frame.
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// Writing a photo to the media library failed.
    #[error("save failed: {0}")]
    SaveFailed(String),

    /// The platform share sheet reported a failure.
    #[error("share failed: {0}")]
    ShareFailed(String),

    /// The requested platform feature does not exist on this device.
    #[error("not available: {0}")]
    NotAvailable(String),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShotmateError {
    /// Build a [`ShotmateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShotmateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ShotmateError::CaptureFailed`] value.
    pub fn capture_failed(msg: impl Into<String>) -> Self {
        Self::CaptureFailed(msg.into())
    }

    /// Build a [`ShotmateError::SaveFailed`] value.
    pub fn save_failed(msg: impl Into<String>) -> Self {
        Self::SaveFailed(msg.into())
    }

    /// Build a [`ShotmateError::ShareFailed`] value.
    pub fn share_failed(msg: impl Into<String>) -> Self {
        Self::ShareFailed(msg.into())
    }

    /// Build a [`ShotmateError::NotAvailable`] value.
    pub fn not_available(msg: impl Into<String>) -> Self {
        Self::NotAvailable(msg.into())
    }

    /// Whether the flow that produced this error ended silently.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
