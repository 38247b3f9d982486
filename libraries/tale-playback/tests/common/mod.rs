//! Shared test doubles for controller tests
//!
//! Every double keeps its log behind `Rc<RefCell<_>>` so the test can inspect
//! it after the double has moved into the controller.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tale_core::{AudioLocator, Profile, ProfileId};
use tale_playback::{
    AudioEngine, ControllerConfig, EngineFactory, EngineFault, EngineFaultKind, EngineId,
    FocusArbiter, FocusGrant, Notice, PlaybackController, PlaybackStatus, Presentation, PresentationSink,
};

pub type Shared<T> = Rc<RefCell<T>>;

// ===== Engine =====

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCall {
    Start,
    Pause,
    Stop,
    Seek(Duration),
    SetVolume(f32, f32),
    Release,
}

#[derive(Debug)]
pub struct EngineState {
    pub id: EngineId,
    pub source: String,
    pub position: Duration,
    pub duration: Duration,
    pub running: bool,
    pub volume: (f32, f32),
    pub released: bool,
    pub calls: Vec<EngineCall>,
}

impl EngineState {
    fn new(id: EngineId, source: &str, duration: Duration) -> Self {
        Self {
            id,
            source: source.to_string(),
            position: Duration::ZERO,
            duration,
            running: false,
            volume: (1.0, 1.0),
            released: false,
            calls: Vec::new(),
        }
    }

    /// Simulate output progress while running
    pub fn advance(&mut self, elapsed: Duration) {
        if self.running {
            self.position = (self.position + elapsed).min(self.duration);
        }
    }
}

pub struct RecordingEngine {
    state: Shared<EngineState>,
}

impl AudioEngine for RecordingEngine {
    fn start(&mut self) {
        let mut s = self.state.borrow_mut();
        s.running = true;
        s.calls.push(EngineCall::Start);
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.running = false;
        s.calls.push(EngineCall::Pause);
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.running = false;
        s.calls.push(EngineCall::Stop);
    }

    fn seek(&mut self, position: Duration) {
        let mut s = self.state.borrow_mut();
        s.position = position.min(s.duration);
        s.calls.push(EngineCall::Seek(position));
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        Some(self.state.borrow().duration)
    }

    fn set_volume(&mut self, left: f32, right: f32) {
        let mut s = self.state.borrow_mut();
        s.volume = (left, right);
        s.calls.push(EngineCall::SetVolume(left, right));
    }

    fn release(&mut self) {
        let mut s = self.state.borrow_mut();
        s.released = true;
        s.calls.push(EngineCall::Release);
    }
}

/// Factory that hands out recording engines
///
/// Sources starting with `fail:` refuse to load.
#[derive(Clone)]
pub struct RecordingFactory {
    pub engines: Shared<Vec<Shared<EngineState>>>,
    pub track_length: Duration,
}

impl RecordingFactory {
    pub fn new(track_length: Duration) -> Self {
        Self {
            engines: Rc::new(RefCell::new(Vec::new())),
            track_length,
        }
    }

    /// Most recently loaded engine
    pub fn latest(&self) -> Shared<EngineState> {
        Rc::clone(
            self.engines
                .borrow()
                .last()
                .expect("no engine has been loaded"),
        )
    }

    pub fn load_count(&self) -> usize {
        self.engines.borrow().len()
    }
}

impl EngineFactory for RecordingFactory {
    type Engine = RecordingEngine;

    fn load(
        &mut self,
        id: EngineId,
        source: &AudioLocator,
    ) -> Result<RecordingEngine, EngineFault> {
        if source.as_str().starts_with("fail:") {
            return Err(EngineFault::new(EngineFaultKind::LoadFailed, -2));
        }

        let state = Rc::new(RefCell::new(EngineState::new(
            id,
            source.as_str(),
            self.track_length,
        )));
        self.engines.borrow_mut().push(Rc::clone(&state));
        Ok(RecordingEngine { state })
    }
}

// ===== Focus =====

#[derive(Debug)]
pub struct FocusLog {
    pub grant: bool,
    pub requests: usize,
    pub abandons: usize,
}

#[derive(Clone)]
pub struct ScriptedFocus {
    pub log: Shared<FocusLog>,
}

impl ScriptedFocus {
    pub fn granting() -> Self {
        Self::with_grant(true)
    }

    pub fn denying() -> Self {
        Self::with_grant(false)
    }

    fn with_grant(grant: bool) -> Self {
        Self {
            log: Rc::new(RefCell::new(FocusLog {
                grant,
                requests: 0,
                abandons: 0,
            })),
        }
    }

    pub fn set_grant(&self, grant: bool) {
        self.log.borrow_mut().grant = grant;
    }

    pub fn requests(&self) -> usize {
        self.log.borrow().requests
    }

    pub fn abandons(&self) -> usize {
        self.log.borrow().abandons
    }
}

impl FocusArbiter for ScriptedFocus {
    fn request(&mut self) -> FocusGrant {
        let mut log = self.log.borrow_mut();
        log.requests += 1;
        if log.grant {
            FocusGrant::Granted
        } else {
            FocusGrant::Denied
        }
    }

    fn abandon(&mut self) {
        self.log.borrow_mut().abandons += 1;
    }
}

// ===== Presentation =====

#[derive(Debug, Default)]
pub struct SinkLog {
    pub refreshes: Vec<Presentation>,
    pub clears: usize,
    pub notices: Vec<Notice>,
    /// Whether an indicator is currently shown
    pub visible: bool,
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    pub log: Shared<SinkLog>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<Presentation> {
        self.log.borrow().refreshes.last().cloned()
    }

    pub fn refresh_count(&self) -> usize {
        self.log.borrow().refreshes.len()
    }

    pub fn statuses(&self) -> Vec<PlaybackStatus> {
        self.log
            .borrow()
            .refreshes
            .iter()
            .map(|p| p.status)
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.log.borrow().notices.clone()
    }

    pub fn visible(&self) -> bool {
        self.log.borrow().visible
    }
}

impl PresentationSink for RecordingSink {
    fn refresh(&mut self, presentation: &Presentation) {
        let mut log = self.log.borrow_mut();
        log.refreshes.push(presentation.clone());
        log.visible = true;
    }

    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.clears += 1;
        log.visible = false;
    }

    fn notify(&mut self, notice: &Notice) {
        self.log.borrow_mut().notices.push(notice.clone());
    }
}

// ===== Harness =====

pub type TestController = PlaybackController<RecordingFactory, ScriptedFocus, RecordingSink>;

pub struct Harness {
    pub controller: TestController,
    pub factory: RecordingFactory,
    pub focus: ScriptedFocus,
    pub sink: RecordingSink,
}

impl Harness {
    /// Select profile 0 and deliver the ready callback
    pub fn start_playing(&mut self) {
        self.controller.select_profile(profile(0));
        self.controller
            .on_engine_ready()
            .expect("focus should be granted");
        assert_eq!(self.controller.status(), PlaybackStatus::Playing);
    }

    pub fn engine(&self) -> Shared<EngineState> {
        self.factory.latest()
    }

    /// Id the latest engine was loaded under
    pub fn engine_id(&self) -> EngineId {
        self.engine().borrow().id
    }

    /// Let the current engine play for `elapsed`
    pub fn advance(&self, elapsed: Duration) {
        self.engine().borrow_mut().advance(elapsed);
    }
}

pub fn harness() -> Harness {
    harness_with(ControllerConfig::default(), ScriptedFocus::granting())
}

pub fn harness_with(config: ControllerConfig, focus: ScriptedFocus) -> Harness {
    let factory = RecordingFactory::new(Duration::from_secs(300));
    let sink = RecordingSink::default();
    let controller =
        PlaybackController::new(config, factory.clone(), focus.clone(), sink.clone());

    Harness {
        controller,
        factory,
        focus,
        sink,
    }
}

pub fn profile(id: u32) -> Profile {
    Profile::new(
        ProfileId::new(id),
        format!("Profile {id}"),
        format!("/stories/{id}.ogg"),
    )
    .with_artwork(format!("art/{id}.png"))
}
