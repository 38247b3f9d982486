/// Profile metadata
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProfileId;

/// Locator of a profile's audio source (file path or URI)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioLocator(String);

impl AudioLocator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a profile's artwork resource
///
/// Never loaded by the core; presentation layers resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkRef(String);

impl ArtworkRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A unit of content metadata the user selects to play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Catalog identifier
    pub id: ProfileId,

    /// Display name, used as the notification title
    pub name: String,

    /// Audio source to hand to the engine
    pub audio: AudioLocator,

    /// Artwork shown next to the transport controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<ArtworkRef>,
}

impl Profile {
    /// Create a profile without artwork
    pub fn new(id: ProfileId, name: impl Into<String>, audio: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            audio: AudioLocator::new(audio),
            artwork: None,
        }
    }

    /// Attach an artwork reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(ArtworkRef::new(artwork));
        self
    }
}
