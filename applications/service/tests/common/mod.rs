//! Common test utilities and fixtures
#![allow(dead_code)]

use std::path::PathBuf;
use tale_core::{InMemoryProfileStore, Profile, ProfileId};
use tale_playback::ControllerEvent;
use tale_service::{PlaybackService, ServiceConfig};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

pub mod fixtures {
    pub const SHIORI: u32 = 0;
    pub const KAI: u32 = 1;
    /// Profile whose audio refuses to load
    pub const BROKEN: u32 = 2;
    pub const UNKNOWN: u32 = 9;

    pub const TRACK_LENGTH_SECS: u64 = 60;
    pub const PREPARE_DELAY_MS: u64 = 200;
}

pub fn profiles() -> Vec<Profile> {
    vec![
        Profile::new(
            ProfileId::new(fixtures::SHIORI),
            "Shiori",
            "/stories/shiori.ogg",
        )
        .with_artwork("art/shiori.png"),
        Profile::new(ProfileId::new(fixtures::KAI), "Kai", "/stories/kai.ogg"),
        Profile::new(
            ProfileId::new(fixtures::BROKEN),
            "Broken",
            "fail:/stories/broken.ogg",
        ),
    ]
}

pub fn catalog() -> InMemoryProfileStore {
    InMemoryProfileStore::from_profiles(profiles()).expect("fixture ids are unique")
}

pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.engine.prepare_delay_ms = fixtures::PREPARE_DELAY_MS;
    config.engine.track_length_secs = fixtures::TRACK_LENGTH_SECS;
    config
}

pub type TestService = PlaybackService<InMemoryProfileStore>;

pub fn service() -> (TestService, UnboundedReceiver<ControllerEvent>) {
    service_with(&test_config())
}

pub fn service_with(config: &ServiceConfig) -> (TestService, UnboundedReceiver<ControllerEvent>) {
    PlaybackService::new(config, catalog())
}

/// Deliver the next engine callback to the service
pub async fn pump(service: &mut TestService, events: &mut UnboundedReceiver<ControllerEvent>) {
    let event = events.recv().await.expect("engine channel closed");
    service.handle_event(event);
}

/// Write the fixture catalog as JSON into a temp dir
pub fn write_catalog() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("profiles.json");
    let json = serde_json::to_string_pretty(&profiles()).expect("serialize profiles");
    std::fs::write(&path, json).expect("write catalog");
    (dir, path)
}

pub fn id(raw: u32) -> ProfileId {
    ProfileId::new(raw)
}
