//! Simulated audio engine
//!
//! Plays nothing. Position follows the tokio clock while started, and the
//! ready/completion callbacks are timer tasks that post
//! [`ControllerEvent`]s back to the service loop.

use std::time::Duration;

use tale_core::AudioLocator;
use tale_playback::{
    AudioEngine, ControllerEvent, EngineFactory, EngineFault, EngineFaultKind, EngineId,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Locator prefix that makes loading fail
pub const FAIL_PREFIX: &str = "fail:";

/// Android `MEDIA_ERROR_IO`
const LOAD_FAILED_EXTRA: i32 = -1004;

/// Creates simulated engines that report back on `events`
pub struct SimulatedFactory {
    events: UnboundedSender<ControllerEvent>,
    prepare_delay: Duration,
    track_length: Duration,
}

impl SimulatedFactory {
    pub fn new(
        events: UnboundedSender<ControllerEvent>,
        prepare_delay: Duration,
        track_length: Duration,
    ) -> Self {
        Self {
            events,
            prepare_delay,
            track_length,
        }
    }
}

impl EngineFactory for SimulatedFactory {
    type Engine = SimulatedEngine;

    fn load(
        &mut self,
        id: EngineId,
        source: &AudioLocator,
    ) -> Result<SimulatedEngine, EngineFault> {
        if source.as_str().starts_with(FAIL_PREFIX) {
            return Err(EngineFault::new(EngineFaultKind::LoadFailed, LOAD_FAILED_EXTRA));
        }

        debug!("Preparing {} as {} ({:?})", source, id, self.prepare_delay);
        let ready = post_after(
            self.events.clone(),
            self.prepare_delay,
            ControllerEvent::EngineReady(id),
        );

        Ok(SimulatedEngine {
            id,
            source: source.clone(),
            events: self.events.clone(),
            length: self.track_length,
            offset: Duration::ZERO,
            started_at: None,
            volume: (1.0, 1.0),
            ready: Some(ready),
            completion: None,
        })
    }
}

/// One simulated engine handle
pub struct SimulatedEngine {
    id: EngineId,
    source: AudioLocator,
    events: UnboundedSender<ControllerEvent>,
    length: Duration,

    /// Position when output last started or was moved
    offset: Duration,
    started_at: Option<Instant>,

    volume: (f32, f32),

    ready: Option<JoinHandle<()>>,
    completion: Option<JoinHandle<()>>,
}

impl SimulatedEngine {
    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn source(&self) -> &AudioLocator {
        &self.source
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn volume(&self) -> (f32, f32) {
        self.volume
    }

    fn schedule_completion(&mut self) {
        self.cancel_completion();
        let remaining = self.length.saturating_sub(self.offset);
        self.completion = Some(post_after(
            self.events.clone(),
            remaining,
            ControllerEvent::EngineCompleted(self.id),
        ));
    }

    fn cancel_completion(&mut self) {
        if let Some(task) = self.completion.take() {
            task.abort();
        }
    }

    fn halt(&mut self) {
        self.offset = self.position();
        self.started_at = None;
        self.cancel_completion();
    }
}

impl AudioEngine for SimulatedEngine {
    fn start(&mut self) {
        if self.started_at.is_some() {
            return;
        }
        self.started_at = Some(Instant::now());
        self.schedule_completion();
    }

    fn pause(&mut self) {
        self.halt();
    }

    fn stop(&mut self) {
        self.halt();
        self.offset = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) {
        let running = self.started_at.is_some();
        self.cancel_completion();
        self.offset = position.min(self.length);

        if running {
            self.started_at = Some(Instant::now());
            self.schedule_completion();
        }
    }

    fn position(&self) -> Duration {
        let elapsed = self.started_at.map_or(Duration::ZERO, |t| t.elapsed());
        (self.offset + elapsed).min(self.length)
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.length)
    }

    fn set_volume(&mut self, left: f32, right: f32) {
        debug!("Volume {:.3}/{:.3}", left, right);
        self.volume = (left, right);
    }

    fn release(&mut self) {
        debug!("Releasing {} for {}", self.id, self.source);
        self.halt();
        if let Some(task) = self.ready.take() {
            task.abort();
        }
    }
}

impl Drop for SimulatedEngine {
    fn drop(&mut self) {
        for task in [self.ready.take(), self.completion.take()].into_iter().flatten() {
            task.abort();
        }
    }
}

fn post_after(
    events: UnboundedSender<ControllerEvent>,
    delay: Duration,
    event: ControllerEvent,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if events.send(event).is_err() {
            debug!("Engine callback dropped: service loop gone");
        }
    })
}
