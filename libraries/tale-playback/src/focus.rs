//! Audio focus arbitration

use serde::{Deserialize, Serialize};

/// Outcome of a focus request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusGrant {
    Granted,
    Denied,
}

/// Environment-side owner of audio focus
///
/// Focus changes after a grant arrive asynchronously as
/// [`ControllerEvent::Focus`](crate::events::ControllerEvent::Focus).
pub trait FocusArbiter {
    /// Request exclusive, unbounded focus for music playback
    fn request(&mut self) -> FocusGrant;

    /// Give focus back
    fn abandon(&mut self);
}
