//! Read-only profile lookup

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::types::{Profile, ProfileId};

/// Read-only source of profiles
///
/// Playback never mutates profiles; it only resolves an id to the metadata it
/// needs to load audio and render the notification.
pub trait ProfileStore {
    /// Resolve a profile by id, `None` if the catalog has no such entry
    fn lookup(&self, id: ProfileId) -> Option<Profile>;
}

/// Profile catalog held in memory
///
/// Usually loaded once from a JSON array at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: BTreeMap<ProfileId, Profile>,
}

impl InMemoryProfileStore {
    /// Build a store, rejecting duplicate ids
    pub fn from_profiles(profiles: impl IntoIterator<Item = Profile>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            let id = profile.id;
            if map.insert(id, profile).is_some() {
                return Err(CoreError::DuplicateProfile(id));
            }
        }
        Ok(Self { profiles: map })
    }

    /// Parse a JSON array of profiles
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profiles: Vec<Profile> = serde_json::from_str(json)?;
        Self::from_profiles(profiles)
    }

    /// Load a JSON catalog from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ProfileId> + '_ {
        self.profiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn lookup(&self, id: ProfileId) -> Option<Profile> {
        self.profiles.get(&id).cloned()
    }
}
