//! Playback controller - interruption state machine
//!
//! Owns the engine handle and decides play/pause/resume/seek/stop in response
//! to transport commands, audio focus changes, call state changes and engine
//! callbacks. Every status transition refreshes the presentation.

use std::time::Duration;

use tale_core::{Profile, ProfileId, ProfileStore};
use tracing::{debug, info, warn};

use crate::{
    engine::{AudioEngine, EngineFactory, EngineFault, EngineId},
    error::{PlaybackError, Result},
    events::{ControllerEvent, Disposition, ShutdownReason},
    focus::{FocusArbiter, FocusGrant},
    presentation::{Notice, Presentation, PresentationSink},
    types::{CallState, ControllerConfig, FocusChange, PlaybackStatus, SeekOffset, TransportAction},
    volume::OutputLevel,
};

/// Single-session playback coordinator
///
/// Single-threaded: the host feeds it one event at a time from one execution
/// context.
pub struct PlaybackController<F, A, P>
where
    F: EngineFactory,
    A: FocusArbiter,
    P: PresentationSink,
{
    config: ControllerConfig,

    // Collaborators
    factory: F,
    focus: A,
    presentation: P,

    // Session
    engine: Option<F::Engine>,
    /// Id of `engine`, or of the last load attempt
    engine_id: EngineId,
    profile: Option<Profile>,
    status: PlaybackStatus,
    resume_position: Duration,

    // Interruptions
    ongoing_call: bool,
    /// Focus currently owned; cleared by any loss
    focus_held: bool,
    /// A granted request is outstanding and must be abandoned on teardown
    focus_registered: bool,
    level: OutputLevel,
}

impl<F, A, P> PlaybackController<F, A, P>
where
    F: EngineFactory,
    A: FocusArbiter,
    P: PresentationSink,
{
    /// Create a controller with no session
    pub fn new(config: ControllerConfig, factory: F, focus: A, presentation: P) -> Self {
        let level = OutputLevel::new(config.full_volume, config.duck_attenuation_db);

        Self {
            config,
            factory,
            focus,
            presentation,
            engine: None,
            engine_id: EngineId::new(0),
            profile: None,
            status: PlaybackStatus::Uninitialized,
            resume_position: Duration::ZERO,
            ongoing_call: false,
            focus_held: false,
            focus_registered: false,
            level,
        }
    }

    // ===== Event dispatch =====

    /// Apply one event
    ///
    /// Never fails: errors that end the session come back as
    /// [`Disposition::Shutdown`] after the controller has torn down.
    pub fn handle(&mut self, event: ControllerEvent) -> Disposition {
        if let Some(id) = event.engine() {
            if !self.is_current_engine(id) {
                debug!("Dropping {:?} from released {}", event, id);
                return Disposition::Continue;
            }
        }

        match event {
            ControllerEvent::SelectProfile(profile) => {
                self.select_profile(profile);
                Disposition::Continue
            }
            ControllerEvent::Transport(action) => self.on_transport(action),
            ControllerEvent::Focus(change) => {
                self.on_focus_change(change);
                Disposition::Continue
            }
            ControllerEvent::Call(state) => {
                self.on_call_state(state);
                Disposition::Continue
            }
            ControllerEvent::BecomingNoisy => {
                self.on_becoming_noisy();
                Disposition::Continue
            }
            ControllerEvent::EngineReady(_) => Self::disposition_of(self.on_engine_ready()),
            ControllerEvent::EngineCompleted(_) => self.on_engine_completed(),
            ControllerEvent::EngineError(_, fault) => {
                self.on_engine_error(fault);
                Disposition::Continue
            }
        }
    }

    fn disposition_of(result: Result<()>) -> Disposition {
        match result {
            Ok(()) => Disposition::Continue,
            Err(PlaybackError::FocusDenied) => Disposition::Shutdown(ShutdownReason::FocusDenied),
            Err(e) => {
                warn!("Ignoring playback error: {}", e);
                Disposition::Continue
            }
        }
    }

    // ===== Session =====

    /// Look up `id` in `store` and select it
    ///
    /// `ProfileNotFound` is fatal to the session; the caller must tear down.
    pub fn select_from<S>(&mut self, store: &S, id: ProfileId) -> Result<()>
    where
        S: ProfileStore + ?Sized,
    {
        let profile = store.lookup(id).ok_or(PlaybackError::ProfileNotFound(id))?;
        self.select_profile(profile);
        Ok(())
    }

    /// Bind a new engine handle to `profile`, replacing any current one
    ///
    /// Playback starts when the engine reports ready. A load failure is
    /// reported through the presentation sink and leaves no session.
    pub fn select_profile(&mut self, profile: Profile) {
        if self.engine.is_some() {
            info!("Replacing profile {:?} with {}", self.profile.as_ref().map(|p| p.id), profile.id);
            self.release_engine();
        }

        let id = self.engine_id.next();
        self.engine_id = id;

        match self.factory.load(id, &profile.audio) {
            Ok(mut engine) => {
                let gain = self.level.gain();
                engine.set_volume(gain, gain);

                info!("Loaded profile {} ({}) as {}", profile.id, profile.audio, id);
                self.engine = Some(engine);
                self.profile = Some(profile);
                self.resume_position = Duration::ZERO;
                self.transition(PlaybackStatus::Preparing);
            }
            Err(fault) => {
                warn!("Failed to load profile {} from {}: {}", profile.id, profile.audio, fault);
                self.profile = None;
                self.status = PlaybackStatus::Uninitialized;
                self.presentation.clear();
                self.presentation.notify(&Notice::EngineFault(fault));
            }
        }
    }

    /// End the session
    ///
    /// Stops and releases the engine, clears the indicator and abandons focus.
    /// Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.engine.is_some() {
            info!("Tearing down playback session");
        }

        self.release_engine();
        self.profile = None;
        self.ongoing_call = false;
        self.resume_position = Duration::ZERO;
        self.level.restore();
        self.presentation.clear();

        if self.focus_registered {
            self.focus.abandon();
            self.focus_registered = false;
        }
        self.focus_held = false;
    }

    /// Acquire audio focus ahead of playback
    ///
    /// No-op while focus is held. After any loss the arbiter is asked again.
    /// Denial tears the session down.
    pub fn request_focus(&mut self) -> Result<()> {
        self.ensure_focus()
    }

    // ===== Playback Control =====

    /// Start playback
    ///
    /// Requests focus first when not already held. Denial tears the session
    /// down and returns `FocusDenied`.
    pub fn play(&mut self) -> Result<()> {
        match self.status {
            PlaybackStatus::Playing | PlaybackStatus::Preparing => Ok(()),
            PlaybackStatus::Uninitialized => {
                debug!("play ignored: no engine");
                Ok(())
            }
            PlaybackStatus::Stopped | PlaybackStatus::Paused => {
                self.ensure_focus()?;
                self.start_output();
                Ok(())
            }
        }
    }

    /// Pause playback, remembering the position
    pub fn pause(&mut self) {
        if !self.status.is_playing() {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.pause();
        self.resume_position = engine.position();
        self.transition(PlaybackStatus::Paused);
    }

    /// Resume from the remembered position
    pub fn resume(&mut self) {
        if !matches!(self.status, PlaybackStatus::Paused | PlaybackStatus::Stopped) {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.seek(self.resume_position);
        engine.start();
        self.transition(PlaybackStatus::Playing);
    }

    /// Stop output, keeping the engine handle
    pub fn stop(&mut self) {
        if self.status == PlaybackStatus::Stopped {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.stop();
        self.transition(PlaybackStatus::Stopped);
    }

    /// Move the position by `offset`, within the engine's bounds
    pub fn seek_relative(&mut self, offset: SeekOffset) {
        if matches!(
            self.status,
            PlaybackStatus::Uninitialized | PlaybackStatus::Preparing
        ) {
            debug!("seek ignored while {}", self.status);
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let mut target = offset.apply(engine.position());
        if let Some(duration) = engine.duration() {
            target = target.min(duration);
        }

        engine.seek(target);
        self.resume_position = target;

        // Position changed while not playing: indicator must catch up
        if !self.status.is_playing() {
            self.refresh();
        }
    }

    // ===== External signals =====

    pub fn on_transport(&mut self, action: TransportAction) -> Disposition {
        debug!("Transport action {}", action);

        match action {
            TransportAction::Play => {
                if self.engine.is_none() {
                    debug!("play ignored: no engine");
                    return Disposition::Continue;
                }
                if self.status == PlaybackStatus::Preparing {
                    return Disposition::Continue;
                }
                if let Err(e) = self.ensure_focus() {
                    return Self::disposition_of(Err(e));
                }
                self.resume();
            }
            TransportAction::Pause => self.pause(),
            TransportAction::FastForward => {
                self.seek_relative(SeekOffset::Forward(self.config.seek_step()));
            }
            TransportAction::Rewind => {
                self.seek_relative(SeekOffset::Backward(self.config.seek_step()));
            }
            TransportAction::Stop => {
                self.teardown();
                return Disposition::Shutdown(ShutdownReason::StopRequested);
            }
        }

        Disposition::Continue
    }

    pub fn on_focus_change(&mut self, change: FocusChange) {
        debug!("Focus change {:?} while {}", change, self.status);

        match change {
            FocusChange::Gained => {
                self.focus_held = true;
                if self.engine.is_none() {
                    // Released engines cannot be recovered without a profile
                    debug!("focus gained with no engine; waiting for profile selection");
                    return;
                }
                if !self.status.is_playing() {
                    self.start_output();
                }
                let gain = self.level.restore();
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_volume(gain, gain);
                }
            }
            FocusChange::LostPermanent | FocusChange::LostTransient => {
                self.focus_held = false;
                self.pause();
            }
            FocusChange::LostTransientCanDuck => {
                self.focus_held = false;
                if !self.status.is_playing() {
                    return;
                }
                let gain = self.level.duck();
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_volume(gain, gain);
                }
                info!("Ducked output to {:.1} dB", self.level.to_db());
            }
        }
    }

    pub fn on_call_state(&mut self, state: CallState) {
        debug!("Call state {:?} while {}", state, self.status);

        match state {
            CallState::Ringing | CallState::OffHook => {
                if self.engine.is_some() && self.status.is_playing() {
                    self.pause();
                    self.ongoing_call = true;
                    info!("Paused for call");
                }
            }
            CallState::Idle => {
                // Only resume what a call interrupted, never a user pause
                if self.ongoing_call {
                    self.ongoing_call = false;
                    info!("Call ended, resuming");
                    self.resume();
                }
            }
        }
    }

    /// Output is about to become noisy (e.g. headphones unplugged)
    pub fn on_becoming_noisy(&mut self) {
        debug!("Audio becoming noisy");
        self.pause();
    }

    // ===== Engine callbacks =====

    /// Engine finished preparing: start playback
    pub fn on_engine_ready(&mut self) -> Result<()> {
        if self.status != PlaybackStatus::Preparing {
            debug!("ready callback ignored while {}", self.status);
            return Ok(());
        }

        // Loaded but not yet started
        self.status = PlaybackStatus::Stopped;
        self.play()
    }

    /// End of source: stop and end the session
    pub fn on_engine_completed(&mut self) -> Disposition {
        if self.engine.is_none() {
            debug!("completion callback ignored: no engine");
            return Disposition::Continue;
        }

        info!("Playback completed");
        self.presentation.notify(&Notice::Completed);
        self.stop();
        self.teardown();
        Disposition::Shutdown(ShutdownReason::Completed)
    }

    /// Report an engine failure; state is left alone
    ///
    /// Always returns `false`: the failure is neither fatal nor handled here,
    /// so the engine's own recovery proceeds.
    pub fn on_engine_error(&mut self, fault: EngineFault) -> bool {
        warn!("Engine error while {}: {}", self.status, fault);
        self.presentation.notify(&Notice::EngineFault(fault));
        false
    }

    // ===== State Queries =====

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Current engine position, zero without an engine
    pub fn position(&self) -> Duration {
        self.engine
            .as_ref()
            .map_or(Duration::ZERO, |engine| engine.position())
    }

    pub fn resume_position(&self) -> Duration {
        self.resume_position
    }

    /// Whether playback is suspended for a phone call
    pub fn ongoing_call(&self) -> bool {
        self.ongoing_call
    }

    pub fn is_ducked(&self) -> bool {
        self.level.is_ducked()
    }

    pub fn holds_focus(&self) -> bool {
        self.focus_held
    }

    /// Current linear output gain
    pub fn volume(&self) -> f32 {
        self.level.gain()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Id of the current engine handle
    pub fn engine_id(&self) -> Option<EngineId> {
        self.engine.as_ref().map(|_| self.engine_id)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn focus(&self) -> &A {
        &self.focus
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    // ===== Internals =====

    fn ensure_focus(&mut self) -> Result<()> {
        if self.focus_held {
            return Ok(());
        }

        match self.focus.request() {
            FocusGrant::Granted => {
                self.focus_held = true;
                self.focus_registered = true;
                Ok(())
            }
            FocusGrant::Denied => {
                warn!("Audio focus denied, ending session");
                self.teardown();
                Err(PlaybackError::FocusDenied)
            }
        }
    }

    fn is_current_engine(&self, id: EngineId) -> bool {
        self.engine.is_some() && id == self.engine_id
    }

    fn start_output(&mut self) {
        if !matches!(self.status, PlaybackStatus::Paused | PlaybackStatus::Stopped) {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.start();
        self.transition(PlaybackStatus::Playing);
    }

    fn release_engine(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if matches!(self.status, PlaybackStatus::Playing | PlaybackStatus::Paused) {
                engine.stop();
            }
            engine.release();
        }
        self.status = PlaybackStatus::Uninitialized;
    }

    fn transition(&mut self, status: PlaybackStatus) {
        if self.status != status {
            info!("Playback {} -> {}", self.status, status);
        }
        self.status = status;
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Some(profile) = self.profile.as_ref() {
            let presentation = Presentation::for_profile(self.status, profile);
            self.presentation.refresh(&presentation);
        }
    }
}
