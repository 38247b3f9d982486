/// Simulated audio focus arbiter
use tale_playback::{FocusArbiter, FocusGrant};
use tracing::{info, warn};

/// Grants focus to every request unless configured to deny
#[derive(Debug, Default)]
pub struct SimulatedFocus {
    deny: bool,
    held: bool,
}

impl SimulatedFocus {
    pub fn new(deny: bool) -> Self {
        Self { deny, held: false }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl FocusArbiter for SimulatedFocus {
    fn request(&mut self) -> FocusGrant {
        if self.deny {
            warn!("Audio focus request refused");
            return FocusGrant::Denied;
        }

        info!("Audio focus granted");
        self.held = true;
        FocusGrant::Granted
    }

    fn abandon(&mut self) {
        if self.held {
            info!("Audio focus abandoned");
        }
        self.held = false;
    }
}
