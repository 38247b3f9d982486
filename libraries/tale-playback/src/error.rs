//! Error types for playback control

use tale_core::{CoreError, ProfileId};
use thiserror::Error;

use crate::engine::EngineFault;

/// Playback errors
///
/// Only `ProfileNotFound` and `FocusDenied` end a session. The rest are
/// absorbed by the controller and surface as logs or notices.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Requested profile is not in the catalog
    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    /// The environment refused exclusive audio focus
    #[error("Audio focus denied")]
    FocusDenied,

    /// Unknown transport action or host command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Engine-level failure
    #[error("Engine error: {0}")]
    Engine(#[from] EngineFault),

    /// Core (catalog) error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
