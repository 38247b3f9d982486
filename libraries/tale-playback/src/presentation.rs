//! Persistent playback indicator (the "now playing" notification)

use serde::{Deserialize, Serialize};
use tale_core::{ArtworkRef, Profile};

use crate::engine::EngineFault;
use crate::types::{PlaybackStatus, TransportAction};

/// Snapshot of what the persistent indicator should show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub status: PlaybackStatus,

    /// Profile display name
    pub title: String,

    pub subtitle: String,

    pub artwork: Option<ArtworkRef>,

    /// Buttons in display order: rewind, play/pause toggle, fast-forward
    pub actions: Vec<TransportAction>,

    /// Indices into `actions` shown in the compact view
    pub compact_actions: [usize; 2],
}

impl Presentation {
    /// Build the indicator for `profile` in `status`
    ///
    /// The toggle offers Pause while playing or about to play, Play otherwise.
    pub fn for_profile(status: PlaybackStatus, profile: &Profile) -> Self {
        let toggle = match status {
            PlaybackStatus::Playing | PlaybackStatus::Preparing => TransportAction::Pause,
            PlaybackStatus::Paused | PlaybackStatus::Stopped | PlaybackStatus::Uninitialized => {
                TransportAction::Play
            }
        };

        Self {
            status,
            title: profile.name.clone(),
            subtitle: format!("{}'s story", profile.name),
            artwork: profile.artwork.clone(),
            actions: vec![
                TransportAction::Rewind,
                toggle,
                TransportAction::FastForward,
            ],
            compact_actions: [1, 2],
        }
    }

    /// The play/pause toggle currently offered
    pub fn toggle_action(&self) -> TransportAction {
        self.actions[1]
    }

    pub fn offers(&self, action: TransportAction) -> bool {
        self.actions.contains(&action)
    }
}

/// One-off user-visible messages (toasts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    /// Track reached its end
    Completed,

    /// Engine reported a failure
    EngineFault(EngineFault),
}

/// Consumer of presentation updates
///
/// A pure side-effect sink: the controller never queries it.
pub trait PresentationSink {
    /// Show or replace the persistent indicator
    fn refresh(&mut self, presentation: &Presentation);

    /// Remove the persistent indicator
    fn clear(&mut self);

    /// Surface a transient message
    fn notify(&mut self, notice: &Notice) {
        let _ = notice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_core::ProfileId;

    fn profile() -> Profile {
        Profile::new(ProfileId::new(0), "Shiori", "/stories/shiori.ogg").with_artwork("shiori.png")
    }

    #[test]
    fn playing_offers_pause() {
        let p = Presentation::for_profile(PlaybackStatus::Playing, &profile());

        assert_eq!(p.toggle_action(), TransportAction::Pause);
        assert!(!p.offers(TransportAction::Play));
        assert_eq!(p.title, "Shiori");
        assert_eq!(p.subtitle, "Shiori's story");
        assert_eq!(p.artwork.as_ref().map(|a| a.as_str()), Some("shiori.png"));
    }

    #[test]
    fn paused_offers_play() {
        let p = Presentation::for_profile(PlaybackStatus::Paused, &profile());
        assert_eq!(p.toggle_action(), TransportAction::Play);
        assert!(p.offers(TransportAction::Rewind));
        assert!(p.offers(TransportAction::FastForward));
        assert!(!p.offers(TransportAction::Stop));
    }

    #[test]
    fn compact_view_shows_toggle_and_fast_forward() {
        let p = Presentation::for_profile(PlaybackStatus::Preparing, &profile());
        let compact: Vec<_> = p.compact_actions.iter().map(|&i| p.actions[i]).collect();
        assert_eq!(
            compact,
            vec![TransportAction::Pause, TransportAction::FastForward]
        );
    }
}
