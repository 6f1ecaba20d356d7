//! Error types for the Groupshot core.

use thiserror::Error;

/// Errors surfaced by the core to the orchestrating layer.
///
/// Geometry produced by the core itself is always clamped into the region
/// invariant, so `InvalidRegion` only comes from validating untrusted input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupshotError {
    /// A region violates the percentage-space invariant.
    #[error("Invalid region: x={x}, y={y}, width={width}, height={height}")]
    InvalidRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// The detector found no faces in any of the photos.
    #[error("No faces detected in any of the photos")]
    DetectionEmpty,

    /// No binding exists for the requested base face.
    #[error("No binding for face: {0}")]
    BindingNotFound(String),

    /// The lasso was confirmed before the trace was closed.
    #[error("Lasso selection is not closed ({points} points captured)")]
    LassoNotClosed { points: usize },

    /// The session record does not exist in the store.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The persistence collaborator failed to read or write a record.
    #[error("Session storage failed: {0}")]
    Storage(String),

    /// The photo is not part of the session.
    #[error("Photo not in session: {0}")]
    UnknownPhoto(String),

    /// The external detector failed.
    #[error("Face detection failed: {0}")]
    Detector(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, GroupshotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GroupshotError::DetectionEmpty.to_string(),
            "No faces detected in any of the photos"
        );
        assert_eq!(
            GroupshotError::LassoNotClosed { points: 2 }.to_string(),
            "Lasso selection is not closed (2 points captured)"
        );
        assert_eq!(
            GroupshotError::BindingNotFound("face-1".into()).to_string(),
            "No binding for face: face-1"
        );
    }
}
