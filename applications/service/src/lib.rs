//! Tale Service Library
//!
//! Headless host for the playback controller: configuration, a simulated
//! engine and focus arbiter, a logging presentation sink, line commands and
//! the single-threaded event loop.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod engine;
pub mod error;
pub mod focus;
pub mod input;
pub mod presentation;
pub mod service;

// Re-export commonly used types for convenience
pub use config::ServiceConfig;
pub use engine::{SimulatedEngine, SimulatedFactory};
pub use error::{Result, ServiceError};
pub use focus::SimulatedFocus;
pub use input::HostCommand;
pub use presentation::LogPresentation;
pub use service::{PlaybackService, ServiceController, StartRequest, StatusReport};
