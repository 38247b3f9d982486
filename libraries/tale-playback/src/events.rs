//! Controller Events
//!
//! Every external input to the controller is a [`ControllerEvent`]:
//! - Profile selection
//! - Transport commands (notification buttons, host commands)
//! - Audio focus changes
//! - Call state changes
//! - Output becoming noisy (headphones unplugged)
//! - Engine callbacks (ready, completed, error), tagged with the reporting
//!   engine's [`EngineId`]
//!
//! The host delivers them one at a time to
//! [`PlaybackController::handle`](crate::PlaybackController::handle).
//! Callbacks from an engine other than the current one are dropped.

use serde::{Deserialize, Serialize};
use tale_core::{Profile, ProfileId};

use crate::engine::{EngineFault, EngineId};
use crate::types::{CallState, FocusChange, TransportAction};

/// Input to the controller's transition function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Load a profile, replacing any current one
    SelectProfile(Profile),

    /// Transport command
    Transport(TransportAction),

    /// Audio focus changed
    Focus(FocusChange),

    /// Telephony call state changed
    Call(CallState),

    /// Audio output is about to become noisy
    BecomingNoisy,

    /// Engine finished preparing the loaded source
    EngineReady(EngineId),

    /// Engine reached the end of the source
    EngineCompleted(EngineId),

    /// Engine reported a failure
    EngineError(EngineId, EngineFault),
}

impl ControllerEvent {
    /// Engine that reported this event, for engine callbacks
    pub fn engine(&self) -> Option<EngineId> {
        match self {
            Self::EngineReady(id) | Self::EngineCompleted(id) | Self::EngineError(id, _) => {
                Some(*id)
            }
            _ => None,
        }
    }
}

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Session continues
    Continue,

    /// Session is over; the controller has already torn it down
    Shutdown(ShutdownReason),
}

impl Disposition {
    pub fn is_shutdown(self) -> bool {
        matches!(self, Self::Shutdown(_))
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownReason {
    /// Start command named a profile that does not exist
    ProfileNotFound(ProfileId),

    /// Audio focus was refused
    FocusDenied,

    /// Explicit stop command
    StopRequested,

    /// Track played to the end
    Completed,

    /// Host is going away
    HostExit,
}
