//! Tale Player - Playback Control
//!
//! Platform-agnostic playback and interruption handling for Tale Player.
//!
//! This crate provides:
//! - A single-session playback controller (play, pause, resume, stop, relative seek)
//! - Audio focus handling (pause on loss, duck on transient loss, resume on gain)
//! - Phone call interruptions (pause while ringing/off-hook, resume on idle)
//! - "Becoming noisy" handling (pause when headphones are unplugged)
//! - Presentation snapshots for a persistent "now playing" indicator
//!
//! # Architecture
//!
//! `tale-playback` is completely platform-agnostic:
//! - No dependency on a real audio engine
//! - No dependency on notification or telephony APIs
//! - No global profile table; profiles are passed in explicitly
//!
//! Platform-specific code (engine, focus arbiter, presentation) is provided via
//! traits. The host delivers every external signal as a [`ControllerEvent`] to
//! [`PlaybackController::handle`], one at a time, on a single execution context.
//!
//! # Example: Platform Integration
//!
//! ```rust
//! use std::time::Duration;
//! use tale_core::{AudioLocator, Profile, ProfileId};
//! use tale_playback::{
//!     AudioEngine, CallState, ControllerConfig, ControllerEvent, EngineFactory, EngineFault, EngineId,
//!     FocusArbiter, FocusGrant, PlaybackController, PlaybackStatus, Presentation,
//!     PresentationSink,
//! };
//!
//! // Implement the engine for your platform
//! struct SilentEngine {
//!     position: Duration,
//! }
//!
//! impl AudioEngine for SilentEngine {
//!     fn start(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, position: Duration) {
//!         self.position = position;
//!     }
//!     fn position(&self) -> Duration {
//!         self.position
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         Some(Duration::from_secs(180))
//!     }
//!     fn set_volume(&mut self, _left: f32, _right: f32) {}
//!     fn release(&mut self) {}
//! }
//!
//! struct SilentFactory;
//!
//! impl EngineFactory for SilentFactory {
//!     type Engine = SilentEngine;
//!
//!     fn load(&mut self, _id: EngineId, _source: &AudioLocator) -> Result<SilentEngine, EngineFault> {
//!         Ok(SilentEngine { position: Duration::ZERO })
//!     }
//! }
//!
//! struct GrantAll;
//!
//! impl FocusArbiter for GrantAll {
//!     fn request(&mut self) -> FocusGrant {
//!         FocusGrant::Granted
//!     }
//!     fn abandon(&mut self) {}
//! }
//!
//! struct NoIndicator;
//!
//! impl PresentationSink for NoIndicator {
//!     fn refresh(&mut self, _presentation: &Presentation) {}
//!     fn clear(&mut self) {}
//! }
//!
//! let mut controller =
//!     PlaybackController::new(ControllerConfig::default(), SilentFactory, GrantAll, NoIndicator);
//!
//! let profile = Profile::new(ProfileId::new(0), "Shiori", "/stories/shiori.ogg");
//! controller.handle(ControllerEvent::SelectProfile(profile));
//! // The platform engine reports back under the id it was loaded with
//! let engine = controller.engine_id().unwrap();
//! controller.handle(ControllerEvent::EngineReady(engine));
//! assert_eq!(controller.status(), PlaybackStatus::Playing);
//!
//! // Incoming call pauses, hanging up resumes
//! controller.handle(ControllerEvent::Call(CallState::Ringing));
//! assert_eq!(controller.status(), PlaybackStatus::Paused);
//! controller.handle(ControllerEvent::Call(CallState::Idle));
//! assert_eq!(controller.status(), PlaybackStatus::Playing);
//! ```

mod controller;
mod engine;
mod error;
pub mod events;
mod focus;
mod presentation;
pub mod types;
pub mod volume;

// Public exports
pub use controller::PlaybackController;
pub use engine::{AudioEngine, EngineFactory, EngineFault, EngineFaultKind, EngineId};
pub use error::{PlaybackError, Result};
pub use events::{ControllerEvent, Disposition, ShutdownReason};
pub use focus::{FocusArbiter, FocusGrant};
pub use presentation::{Notice, Presentation, PresentationSink};
pub use types::{
    CallState, ControllerConfig, FocusChange, PlaybackStatus, SeekOffset, TransportAction,
};
pub use volume::OutputLevel;
