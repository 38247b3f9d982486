//! Tale Player Core
//!
//! Platform-agnostic profile types and the read-only profile store used by the
//! playback controller and the host service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Profile`, `ProfileId`, `AudioLocator`, `ArtworkRef`
//! - **Core Traits**: `ProfileStore`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tale_core::{InMemoryProfileStore, Profile, ProfileId, ProfileStore};
//!
//! let store = InMemoryProfileStore::from_profiles(vec![
//!     Profile::new(ProfileId::new(0), "Shiori", "/stories/shiori.ogg"),
//! ])
//! .unwrap();
//!
//! let profile = store.lookup(ProfileId::new(0)).unwrap();
//! assert_eq!(profile.name, "Shiori");
//! assert!(store.lookup(ProfileId::new(7)).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use store::{InMemoryProfileStore, ProfileStore};
pub use types::{ArtworkRef, AudioLocator, Profile, ProfileId};
