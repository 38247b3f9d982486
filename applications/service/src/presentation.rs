/// Presentation sink that writes the playback indicator to the log
use tale_playback::{Notice, Presentation, PresentationSink};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct LogPresentation {
    last: Option<Presentation>,
    notices: Vec<Notice>,
}

impl LogPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indicator currently shown, if any
    pub fn current(&self) -> Option<&Presentation> {
        self.last.as_ref()
    }

    /// Every notice surfaced so far
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl PresentationSink for LogPresentation {
    fn refresh(&mut self, presentation: &Presentation) {
        info!(
            status = %presentation.status,
            title = %presentation.title,
            toggle = %presentation.toggle_action(),
            "Now playing: {}",
            presentation.subtitle
        );
        self.last = Some(presentation.clone());
    }

    fn clear(&mut self) {
        if self.last.take().is_some() {
            info!("Playback indicator removed");
        }
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Completed => info!("Playback completed"),
            Notice::EngineFault(fault) => warn!("Playback error: {}", fault),
        }
        self.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_core::{Profile, ProfileId};
    use tale_playback::PlaybackStatus;

    #[test]
    fn keeps_last_snapshot_until_cleared() {
        let profile = Profile::new(ProfileId::new(1), "Kai", "kai.ogg");
        let mut sink = LogPresentation::new();

        sink.refresh(&Presentation::for_profile(PlaybackStatus::Preparing, &profile));
        sink.refresh(&Presentation::for_profile(PlaybackStatus::Playing, &profile));
        assert_eq!(sink.current().unwrap().status, PlaybackStatus::Playing);

        sink.clear();
        assert!(sink.current().is_none());
    }

    #[test]
    fn records_notices() {
        let mut sink = LogPresentation::new();
        sink.notify(&Notice::Completed);
        assert_eq!(sink.notices(), &[Notice::Completed]);
    }
}
