//! The animation session state machine

use std::time::{Duration, Instant};

use crate::config::{codec, Configuration, SettingUpdate, SettingsStore};
use crate::engine::SortEngine;
use crate::session::ports::{FragmentSink, SharePort};

/// How long the share confirmation stays on screen before reverting
const SHARE_FEEDBACK: Duration = Duration::from_millis(1000);

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing in flight; either freshly arranged or finished sorting
    Idle,
    /// The frame loop is stepping the engine
    Running,
    /// Stopped mid-sort with progress preserved
    Paused,
}

/// Token for the one outstanding scheduled frame.
///
/// [`Session::on_tick`] only steps the engine while it holds this token,
/// and every structural mutation takes the token first, so a tick scheduled
/// before a rebuild can never step the replaced array.
#[derive(Debug)]
struct FrameRequest;

/// Which controls the UI should currently accept.
///
/// Rejected commands are silent no-ops; these flags are the only user
/// signal, mirrored by the UI as disabled affordances.
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    pub play: bool,
    pub step: bool,
}

impl Controls {
    fn enabled() -> Self {
        Self {
            play: true,
            step: true,
        }
    }
}

/// The controller that turns incremental engine execution into a
/// user-steerable animated session.
///
/// Owns the engine and the settings store for its whole lifetime; the UI
/// never touches either directly, only the command methods here.
pub struct Session<E: SortEngine> {
    engine: E,
    settings: SettingsStore,
    max_size: usize,
    state: SessionState,
    frame: Option<FrameRequest>,
    frames: u32,
    started_at: Option<Instant>,
    controls: Controls,
    share_feedback_until: Option<Instant>,
    fragment_sink: Box<dyn FragmentSink>,
    share_port: Box<dyn SharePort>,
}

impl<E: SortEngine> Session<E> {
    /// Create the session and arm the engine for the given configuration.
    ///
    /// `max_size` is the host's array-size cap; the configuration is
    /// clamped into it here and every later size update stays inside it.
    /// Also writes the fragment back immediately, so an absent or repaired
    /// persisted state becomes valid on startup.
    pub fn new(
        engine: E,
        config: Configuration,
        max_size: usize,
        fragment_sink: Box<dyn FragmentSink>,
        share_port: Box<dyn SharePort>,
    ) -> Self {
        let mut session = Self {
            engine,
            settings: SettingsStore::new(config.sanitize(max_size)),
            max_size,
            state: SessionState::Idle,
            frame: None,
            frames: 0,
            started_at: None,
            controls: Controls::enabled(),
            share_feedback_until: None,
            fragment_sink,
            share_port,
        };

        session.rebuild_array();
        session.persist_fragment();
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn config(&self) -> Configuration {
        self.settings.get()
    }

    /// The host's array-size cap; sizes above it are never applied
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Frames per second since the current run started; zero before the
    /// first frame completes.
    pub fn fps(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };

        if self.frames == 0 {
            return 0.0;
        }

        let elapsed_ms = now.duration_since(started_at).as_millis() as f64;
        if elapsed_ms <= 0.0 {
            return 0.0;
        }

        f64::from(self.frames) / elapsed_ms * 1000.0
    }

    /// Toggle between running and stopped.
    pub fn play_pause(&mut self) {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Idle | SessionState::Paused => {
                if !self.controls.play {
                    return;
                }

                self.controls.step = false;
                self.frames = 0;
                self.started_at = Some(Instant::now());
                self.state = SessionState::Running;
                self.frame = Some(FrameRequest);
            }
        }
    }

    fn pause(&mut self) {
        self.frame.take();
        self.state = SessionState::Paused;
        self.controls.step = true;
    }

    /// One animation tick, driven by the host loop.
    ///
    /// Steps the engine by one time-budgeted frame if (and only if) a frame
    /// is scheduled, then schedules the next one — ticks can never overlap.
    pub fn on_tick(&mut self) {
        if self.state != SessionState::Running {
            return;
        }

        if self.frame.take().is_none() {
            return;
        }

        let budget = Duration::from_millis(self.settings.get().step_time_budget_ms);

        if self.engine.step_frame(budget) {
            self.frames += 1;
            self.frame = Some(FrameRequest);
        } else {
            self.finish();
        }
    }

    /// Perform exactly one elementary step from Idle or Paused.
    pub fn step_once(&mut self) {
        if self.state == SessionState::Running || !self.controls.step {
            return;
        }

        if self.engine.step_one() {
            self.state = SessionState::Paused;
        } else {
            self.finish();
        }
    }

    /// Terminal transition: the engine reported completion.
    fn finish(&mut self) {
        self.frame.take();
        self.state = SessionState::Idle;
        self.controls.play = false;
        self.controls.step = false;
    }

    /// Rebuild the array per the current configuration, from any state.
    pub fn reset(&mut self) {
        self.frame.take();
        self.state = SessionState::Idle;
        self.frames = 0;
        self.started_at = None;
        self.controls = Controls::enabled();
        self.rebuild_array();
    }

    /// Copy the shareable fragment out through the share port.
    ///
    /// Shows the transient confirmation either way; a failed copy only
    /// leaves a note in the diagnostics log.
    pub fn share(&mut self, now: Instant) {
        if self.share_feedback_until.is_some() {
            return;
        }

        let fragment = codec::encode(&self.settings.get());
        if let Err(err) = self.share_port.copy_text(&fragment) {
            tracing::warn!(error = %err, "failed to copy share fragment to clipboard");
        }

        self.share_feedback_until = Some(now + SHARE_FEEDBACK);
    }

    /// Revert the share confirmation once its delay has elapsed.
    pub fn poll_share(&mut self, now: Instant) {
        if self
            .share_feedback_until
            .is_some_and(|deadline| now >= deadline)
        {
            self.share_feedback_until = None;
        }
    }

    /// True while the share confirmation is on screen
    pub fn share_feedback(&self) -> bool {
        self.share_feedback_until.is_some()
    }

    /// Apply a settings update unless a run is in flight.
    ///
    /// Returns false (and changes nothing) while Running. Sizes above the
    /// host cap are clamped to it. On acceptance the configuration is
    /// replaced wholesale, the engine state depending on the changed field
    /// is re-derived, and the fragment is re-persisted.
    pub fn try_apply(&mut self, update: SettingUpdate) -> bool {
        if self.state == SessionState::Running {
            return false;
        }

        let update = match update {
            SettingUpdate::Size(size) => SettingUpdate::Size(size.min(self.max_size)),
            other => other,
        };

        let previous = self.settings.apply(update);

        match update {
            SettingUpdate::Initial(_) => {
                self.state = SessionState::Idle;
                self.frames = 0;
                self.started_at = None;
                self.controls = Controls::enabled();
                self.rearrange();
            }
            SettingUpdate::Size(size) => {
                self.state = SessionState::Idle;
                self.frames = 0;
                self.started_at = None;
                self.controls = Controls::enabled();

                if size == previous.size {
                    self.rearrange();
                } else {
                    self.rebuild_array();
                }
            }
            SettingUpdate::StepTimeBudgetMs(_) => {
                // no structural effect; the budget is read at each frame
            }
            SettingUpdate::Algorithm(algorithm) => {
                self.engine.select_algorithm(algorithm);

                if self.state == SessionState::Idle {
                    self.controls = Controls::enabled();
                    self.rearrange();
                }
            }
        }

        self.persist_fragment();
        true
    }

    /// Destroy and rebuild the engine array at the configured size, then
    /// re-apply the arrangement. Cancels the outstanding frame first.
    fn rebuild_array(&mut self) {
        self.frame.take();
        self.engine.rebuild(self.settings.get().size);
        self.rearrange();
    }

    /// Re-apply the initial arrangement to the current-size array and arm
    /// the configured algorithm. Cancels the outstanding frame first.
    fn rearrange(&mut self) {
        self.frame.take();

        let config = self.settings.get();
        self.engine.arrange(config.initial);
        self.engine.commit_arrangement();
        self.engine.reset_counters();
        self.engine.select_algorithm(config.algorithm);
    }

    fn persist_fragment(&mut self) {
        let fragment = codec::encode(&self.settings.get());
        self.fragment_sink.persist(&fragment);
    }
}
