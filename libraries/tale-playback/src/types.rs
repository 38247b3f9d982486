//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::PlaybackError;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No engine handle (no profile selected)
    Uninitialized,

    /// Engine loaded, waiting for its readiness callback
    Preparing,

    /// Engine present, output stopped
    Stopped,

    /// Paused mid-track
    Paused,

    /// Currently playing
    Playing,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Preparing => "preparing",
            Self::Stopped => "stopped",
            Self::Paused => "paused",
            Self::Playing => "playing",
        };
        f.write_str(name)
    }
}

/// Transport action, as sent by notification buttons or the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportAction {
    Play,
    Pause,
    FastForward,
    Rewind,
    Stop,
}

impl TransportAction {
    /// Intent action name
    pub fn action_name(self) -> &'static str {
        match self {
            Self::Play => "ACTION_PLAY",
            Self::Pause => "ACTION_PAUSE",
            Self::FastForward => "ACTION_FF",
            Self::Rewind => "ACTION_REW",
            Self::Stop => "ACTION_STOP",
        }
    }
}

impl fmt::Display for TransportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

impl FromStr for TransportAction {
    type Err = PlaybackError;

    /// Case-insensitive match on the intent action names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Play,
            Self::Pause,
            Self::FastForward,
            Self::Rewind,
            Self::Stop,
        ]
        .into_iter()
        .find(|action| action.action_name().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| PlaybackError::InvalidCommand(s.to_string()))
    }
}

/// Audio focus change signalled by the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusChange {
    /// Focus (re)gained
    Gained,

    /// Lost for an unbounded amount of time
    LostPermanent,

    /// Lost for a short time; playback must pause
    LostTransient,

    /// Lost for a short time; playback may continue attenuated
    LostTransientCanDuck,
}

impl TryFrom<i32> for FocusChange {
    type Error = PlaybackError;

    /// Android `AUDIOFOCUS_*` codes
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Gained),
            -1 => Ok(Self::LostPermanent),
            -2 => Ok(Self::LostTransient),
            -3 => Ok(Self::LostTransientCanDuck),
            other => Err(PlaybackError::InvalidCommand(format!(
                "unknown focus change code {other}"
            ))),
        }
    }
}

/// Telephony call state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallState {
    /// No call activity
    Idle,

    /// Incoming call ringing
    Ringing,

    /// At least one call dialing, active or on hold
    OffHook,
}

impl TryFrom<i32> for CallState {
    type Error = PlaybackError;

    /// Android `CALL_STATE_*` codes
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Ringing),
            2 => Ok(Self::OffHook),
            other => Err(PlaybackError::InvalidCommand(format!(
                "unknown call state code {other}"
            ))),
        }
    }
}

/// Relative seek request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekOffset {
    Forward(Duration),
    Backward(Duration),
}

impl SeekOffset {
    /// Shift `position` by this offset, saturating at zero
    pub fn apply(self, position: Duration) -> Duration {
        match self {
            Self::Forward(delta) => position.saturating_add(delta),
            Self::Backward(delta) => position.saturating_sub(delta),
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Fast-forward / rewind step in milliseconds (default: 10000)
    pub seek_step_ms: u64,

    /// Attenuation while ducked, in dB (default: -20.0)
    pub duck_attenuation_db: f32,

    /// Linear gain at full volume (default: 1.0)
    pub full_volume: f32,
}

impl ControllerConfig {
    pub fn seek_step(&self) -> Duration {
        Duration::from_millis(self.seek_step_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seek_step_ms: 10_000,
            duck_attenuation_db: -20.0,
            full_volume: 1.0,
        }
    }
}
