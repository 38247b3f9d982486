//! Playback service: start command, command dispatch and the event loop
//!
//! All controller calls happen on the task running [`PlaybackService::run`].
//! Engine callbacks arrive on the channel handed out by
//! [`PlaybackService::new`] and are interleaved with host commands in arrival
//! order.

use serde::Serialize;
use tale_core::{ProfileId, ProfileStore};
use tale_playback::{
    ControllerEvent, Disposition, PlaybackController, PlaybackStatus, ShutdownReason,
    TransportAction,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::engine::SimulatedFactory;
use crate::focus::SimulatedFocus;
use crate::input::HostCommand;
use crate::presentation::LogPresentation;

pub type ServiceController = PlaybackController<SimulatedFactory, SimulatedFocus, LogPresentation>;

/// Request to start (or continue) playback of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub profile: ProfileId,

    /// Optional `ACTION_*` name applied after selection
    pub action: Option<String>,
}

impl StartRequest {
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Snapshot answered to the `status` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub status: PlaybackStatus,
    pub profile: Option<ProfileId>,
    pub position_ms: u64,
    pub resume_position_ms: u64,
    pub ongoing_call: bool,
    pub ducked: bool,
    pub focus_held: bool,
    pub volume: f32,
}

pub struct PlaybackService<S: ProfileStore> {
    controller: ServiceController,
    store: S,
}

impl<S: ProfileStore> PlaybackService<S> {
    /// Build the service and the receiver for engine callbacks
    ///
    /// Must be called inside a tokio runtime: engines spawn timer tasks.
    pub fn new(config: &ServiceConfig, store: S) -> (Self, UnboundedReceiver<ControllerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let factory = SimulatedFactory::new(
            events_tx,
            config.engine.prepare_delay(),
            config.engine.track_length(),
        );
        let controller = PlaybackController::new(
            config.playback.clone(),
            factory,
            SimulatedFocus::new(config.focus.deny),
            LogPresentation::new(),
        );

        (Self { controller, store }, events_rx)
    }

    /// Start command
    ///
    /// Looks the profile up, takes audio focus, loads the profile unless it
    /// is already the current one, then applies the optional action.
    pub fn start_command(&mut self, request: StartRequest) -> Disposition {
        info!("Start command for profile {}", request.profile);

        let Some(profile) = self.store.lookup(request.profile) else {
            warn!("Profile {} not found, stopping", request.profile);
            self.controller.teardown();
            return Disposition::Shutdown(ShutdownReason::ProfileNotFound(request.profile));
        };

        if let Err(e) = self.controller.request_focus() {
            warn!("Cannot start playback: {}", e);
            return Disposition::Shutdown(ShutdownReason::FocusDenied);
        }

        let current = self.controller.profile().map(|p| p.id);
        if !self.controller.has_engine() || current != Some(profile.id) {
            self.controller.handle(ControllerEvent::SelectProfile(profile));
        }

        match request.action.as_deref().map(str::parse::<TransportAction>) {
            Some(Ok(action)) => self.controller.handle(ControllerEvent::Transport(action)),
            Some(Err(e)) => {
                warn!("Ignoring start action: {}", e);
                Disposition::Continue
            }
            None => Disposition::Continue,
        }
    }

    /// Replace the current profile mid-session
    ///
    /// Unknown ids are logged and ignored.
    pub fn switch_profile(&mut self, id: ProfileId) -> Disposition {
        match self.store.lookup(id) {
            Some(profile) => self.controller.handle(ControllerEvent::SelectProfile(profile)),
            None => {
                warn!("Ignoring switch to unknown profile {}", id);
                Disposition::Continue
            }
        }
    }

    /// Apply one host command
    pub fn dispatch(&mut self, command: HostCommand) -> Disposition {
        debug!("Host command {:?}", command);

        match command {
            HostCommand::Transport(action) => {
                self.controller.handle(ControllerEvent::Transport(action))
            }
            HostCommand::Focus(change) => self.controller.handle(ControllerEvent::Focus(change)),
            HostCommand::Call(state) => self.controller.handle(ControllerEvent::Call(state)),
            HostCommand::BecomingNoisy => self.controller.handle(ControllerEvent::BecomingNoisy),
            HostCommand::SwitchProfile(id) => self.switch_profile(id),
            HostCommand::Status => {
                match serde_json::to_string(&self.status_report()) {
                    Ok(json) => println!("{json}"),
                    Err(e) => warn!("Failed to encode status: {}", e),
                }
                Disposition::Continue
            }
            HostCommand::Quit => Disposition::Shutdown(ShutdownReason::HostExit),
        }
    }

    /// Apply one engine callback or other controller event
    pub fn handle_event(&mut self, event: ControllerEvent) -> Disposition {
        self.controller.handle(event)
    }

    /// Parse and apply one input line; blank lines are skipped
    pub fn dispatch_line(&mut self, line: &str) -> Disposition {
        if line.trim().is_empty() {
            return Disposition::Continue;
        }

        match line.parse::<HostCommand>() {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                warn!("Ignoring input: {}", e);
                Disposition::Continue
            }
        }
    }

    /// Event loop
    ///
    /// Runs until the controller shuts the session down, `quit` is read or
    /// `input` closes. Always tears the session down before returning.
    pub async fn run<R>(
        &mut self,
        input: R,
        events: &mut UnboundedReceiver<ControllerEvent>,
    ) -> ShutdownReason
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        let reason = loop {
            tokio::select! {
                // Engine callbacks already queued go before the next command
                biased;

                Some(event) = events.recv() => {
                    if let Disposition::Shutdown(reason) = self.handle_event(event) {
                        break reason;
                    }
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if let Disposition::Shutdown(reason) = self.dispatch_line(&line) {
                            break reason;
                        }
                    }
                    Ok(None) => {
                        info!("Command input closed");
                        break ShutdownReason::HostExit;
                    }
                    Err(e) => {
                        warn!("Failed to read command input: {}", e);
                        break ShutdownReason::HostExit;
                    }
                },
            }
        };

        info!("Session ended: {:?}", reason);
        self.controller.teardown();
        reason
    }

    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            status: self.controller.status(),
            profile: self.controller.profile().map(|p| p.id),
            position_ms: duration_ms(self.controller.position()),
            resume_position_ms: duration_ms(self.controller.resume_position()),
            ongoing_call: self.controller.ongoing_call(),
            ducked: self.controller.is_ducked(),
            focus_held: self.controller.holds_focus(),
            volume: self.controller.volume(),
        }
    }

    pub fn controller(&self) -> &ServiceController {
        &self.controller
    }

    /// End the session outside the event loop
    pub fn teardown(&mut self) {
        self.controller.teardown();
    }
}

fn duration_ms(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
