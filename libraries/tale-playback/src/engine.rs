//! Platform-agnostic audio engine traits
//!
//! Abstracts the platform player (MediaPlayer on Android, a simulated engine
//! in the host service, mocks in tests).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tale_core::AudioLocator;
use thiserror::Error;

/// One loaded engine handle
///
/// Decoding and output happen inside the engine. Readiness, completion and
/// errors are reported asynchronously by the host as
/// [`ControllerEvent`](crate::events::ControllerEvent)s, never through these
/// methods.
pub trait AudioEngine {
    /// Start or continue output from the current position
    fn start(&mut self);

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Stop output
    fn stop(&mut self);

    /// Seek to position from start of track
    ///
    /// Engines clamp out-of-range positions to their own bounds.
    fn seek(&mut self, position: Duration);

    /// Get current playback position
    fn position(&self) -> Duration;

    /// Total track duration, if known
    fn duration(&self) -> Option<Duration>;

    /// Set per-channel linear gain (0.0-1.0)
    fn set_volume(&mut self, left: f32, right: f32);

    /// Release platform resources; the handle is dropped afterwards
    fn release(&mut self);
}

/// Identity of one loaded engine handle
///
/// Every callback an engine reports carries its id, so callbacks from a
/// released handle can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(u64);

impl EngineId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Creates engine handles bound to an audio source
pub trait EngineFactory {
    type Engine: AudioEngine;

    /// Load `source` as engine `id`
    ///
    /// The engine reports readiness, completion and errors tagged with `id`.
    ///
    /// # Returns
    /// * `Ok(engine)` - Handle created; readiness follows as `EngineReady(id)`
    /// * `Err(fault)` - The source could not be opened
    fn load(&mut self, id: EngineId, source: &AudioLocator) -> Result<Self::Engine, EngineFault>;
}

/// Engine failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineFaultKind {
    /// Stream is not suited to progressive playback
    NotValidForProgressivePlayback,

    /// Media server process died
    ServerDied,

    /// Source could not be loaded at all
    LoadFailed,

    /// Unspecified failure
    Unknown,
}

impl EngineFaultKind {
    /// Map Android `MEDIA_ERROR_*` codes
    pub fn from_code(code: i32) -> Self {
        match code {
            100 => Self::ServerDied,
            200 => Self::NotValidForProgressivePlayback,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for EngineFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotValidForProgressivePlayback => "media error not valid for progressive playback",
            Self::ServerDied => "media error server died",
            Self::LoadFailed => "media load failed",
            Self::Unknown => "unknown media error",
        };
        f.write_str(text)
    }
}

/// Engine failure with its detail code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} ({extra})")]
pub struct EngineFault {
    pub kind: EngineFaultKind,

    /// Implementation-specific detail code
    pub extra: i32,
}

impl EngineFault {
    pub fn new(kind: EngineFaultKind, extra: i32) -> Self {
        Self { kind, extra }
    }
}
