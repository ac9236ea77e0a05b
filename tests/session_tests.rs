// Controller state-machine tests against a scripted mock engine

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use sortty::config::{codec, Configuration, SettingCategory, SettingUpdate};
use sortty::engine::{AlgorithmId, Arrangement, Counters, Operation, SortEngine};
use sortty::session::ports::{FragmentSink, SharePort};
use sortty::session::{Session, SessionState};

/// Engine double: every (re)arm loads a fixed-length script, and each step
/// consumes one entry. Call counts expose what the controller did.
struct MockEngine {
    script_len: usize,
    steps_remaining: usize,
    size: usize,
    values: Vec<u16>,
    counters: Counters,
    frame_steps: usize,
    single_steps: usize,
    rebuilds: usize,
    arrangements: usize,
    commits: usize,
    selections: usize,
}

impl MockEngine {
    fn with_script(script_len: usize) -> Self {
        MockEngine {
            script_len,
            steps_remaining: script_len,
            size: 0,
            values: vec![],
            counters: Counters::default(),
            frame_steps: 0,
            single_steps: 0,
            rebuilds: 0,
            arrangements: 0,
            commits: 0,
            selections: 0,
        }
    }

    fn consume(&mut self) -> bool {
        if self.steps_remaining == 0 {
            return false;
        }

        self.steps_remaining -= 1;
        self.counters.reads += 1;
        self.counters.writes += 1;
        self.counters.compares += 1;
        self.counters.swaps += 1;
        true
    }
}

impl SortEngine for MockEngine {
    fn rebuild(&mut self, size: usize) {
        self.rebuilds += 1;
        self.size = size;
        self.values = (1..=size as u16).collect();
        self.steps_remaining = self.script_len;
    }

    fn arrange(&mut self, _arrangement: Arrangement) {
        self.arrangements += 1;
        self.steps_remaining = self.script_len;
    }

    fn commit_arrangement(&mut self) {
        self.commits += 1;
    }

    fn reset_counters(&mut self) {
        self.counters = Counters::default();
    }

    fn select_algorithm(&mut self, _algorithm: AlgorithmId) {
        self.selections += 1;
        self.steps_remaining = self.script_len;
    }

    fn step_frame(&mut self, _budget: Duration) -> bool {
        let stepped = self.consume();
        if stepped {
            self.frame_steps += 1;
        }
        stepped
    }

    fn step_one(&mut self) -> bool {
        let stepped = self.consume();
        if stepped {
            self.single_steps += 1;
        }
        stepped
    }

    fn last_operation(&self) -> Option<Operation> {
        if self.steps_remaining == self.script_len {
            None
        } else {
            Some(Operation::Read(0))
        }
    }

    fn values(&self) -> &[u16] {
        &self.values
    }

    fn size(&self) -> usize {
        self.size
    }

    fn counters(&self) -> Counters {
        self.counters
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    fragments: Rc<RefCell<Vec<String>>>,
}

impl FragmentSink for RecordingSink {
    fn persist(&mut self, fragment: &str) {
        self.fragments.borrow_mut().push(fragment.to_string());
    }
}

#[derive(Clone, Default)]
struct RecordingShare {
    copied: Rc<RefCell<Vec<String>>>,
}

impl SharePort for RecordingShare {
    fn copy_text(&mut self, text: &str) -> Result<(), String> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct FailingShare;

impl SharePort for FailingShare {
    fn copy_text(&mut self, _text: &str) -> Result<(), String> {
        Err(String::from("no clipboard in this environment"))
    }
}

fn test_config() -> Configuration {
    Configuration {
        size: 8,
        ..Configuration::default()
    }
}

fn mock_session(script_len: usize) -> Session<MockEngine> {
    Session::new(
        MockEngine::with_script(script_len),
        test_config(),
        Configuration::MAX_SIZE,
        Box::new(RecordingSink::default()),
        Box::new(RecordingShare::default()),
    )
}

#[test]
fn test_new_session_arms_the_engine() {
    let session = mock_session(10);

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.engine().rebuilds, 1);
    assert_eq!(session.engine().arrangements, 1);
    assert_eq!(session.engine().commits, 1);
    assert_eq!(session.engine().selections, 1);
    assert_eq!(session.engine().size, 8);
    assert!(session.engine().counters.is_zero());
}

#[test]
fn test_settings_rejected_while_running() {
    let mut session = mock_session(100);
    session.play_pause();
    assert_eq!(session.state(), SessionState::Running);

    let rebuilds_before = session.engine().rebuilds;
    assert!(!session.try_apply(SettingUpdate::Size(128)));

    assert_eq!(session.config().size, 8, "configuration must be unchanged");
    assert_eq!(session.engine().rebuilds, rebuilds_before);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn test_settings_accepted_while_paused_or_idle() {
    let mut session = mock_session(100);

    assert!(session.try_apply(SettingUpdate::Size(128)));
    assert_eq!(session.config().size, 128);
    assert_eq!(session.engine().size, 128);

    session.play_pause();
    session.play_pause(); // pause
    assert_eq!(session.state(), SessionState::Paused);
    assert!(session.try_apply(SettingUpdate::StepTimeBudgetMs(25)));
    assert_eq!(session.config().step_time_budget_ms, 25);
}

#[test]
fn test_reset_from_any_state_goes_idle_and_zeroes() {
    for warmup in 0..3usize {
        let mut session = mock_session(100);

        // 0: reset from Idle, 1: from Running, 2: from Paused
        if warmup >= 1 {
            session.play_pause();
            session.on_tick();
        }
        if warmup == 2 {
            session.play_pause();
        }

        session.reset();

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.frames(), 0);
        assert!(session.engine().counters.is_zero());
        assert!(session.controls().play);
        assert!(session.controls().step);
    }
}

#[test]
fn test_termination_latches_until_reset() {
    let mut session = mock_session(2);
    session.play_pause();

    session.on_tick();
    session.on_tick();
    assert_eq!(session.state(), SessionState::Running);

    session.on_tick(); // script spent: Running -> Idle
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.controls().play);
    assert!(!session.controls().step);

    let frame_steps = session.engine().frame_steps;
    let single_steps = session.engine().single_steps;

    session.on_tick();
    session.step_once();
    session.play_pause();
    session.on_tick();

    assert_eq!(session.engine().frame_steps, frame_steps);
    assert_eq!(session.engine().single_steps, single_steps);

    session.reset();
    assert!(session.controls().play);
    assert!(session.controls().step);
}

#[test]
fn test_single_step_terminating_matches_frame_termination() {
    let mut session = mock_session(1);

    session.step_once();
    assert_eq!(session.state(), SessionState::Paused);

    session.step_once(); // script spent
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.controls().play);
    assert!(!session.controls().step);
}

#[test]
fn test_cancel_before_mutate_on_reset_while_running() {
    let mut session = mock_session(100);
    session.play_pause();
    session.on_tick();

    let frame_steps = session.engine().frame_steps;
    session.reset();
    assert_eq!(session.engine().rebuilds, 2);

    // the tick that was scheduled before the reset must never run
    session.on_tick();
    session.on_tick();
    assert_eq!(session.engine().frame_steps, frame_steps);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_pause_stops_ticks_without_losing_progress() {
    let mut session = mock_session(100);
    session.play_pause();
    session.on_tick();
    session.on_tick();

    session.play_pause();
    assert_eq!(session.state(), SessionState::Paused);

    let frame_steps = session.engine().frame_steps;
    let remaining = session.engine().steps_remaining;
    session.on_tick();
    assert_eq!(session.engine().frame_steps, frame_steps);
    assert_eq!(session.engine().steps_remaining, remaining);

    // resume picks up where it left off
    session.play_pause();
    session.on_tick();
    assert_eq!(session.engine().steps_remaining, remaining - 1);
}

#[test]
fn test_single_step_pauses_the_session() {
    let mut session = mock_session(100);

    session.step_once();
    assert_eq!(session.state(), SessionState::Paused);
    assert_eq!(session.engine().single_steps, 1);
}

#[test]
fn test_algorithm_change_while_paused_keeps_the_array() {
    let mut session = mock_session(100);
    session.step_once(); // Paused

    let arrangements = session.engine().arrangements;
    assert!(session.try_apply(SettingUpdate::Algorithm(AlgorithmId::Heap)));

    assert_eq!(session.engine().selections, 2);
    assert_eq!(
        session.engine().arrangements,
        arrangements,
        "algorithm-only change must not re-arrange a paused array"
    );
}

#[test]
fn test_algorithm_change_while_idle_rearranges() {
    let mut session = mock_session(100);

    let arrangements = session.engine().arrangements;
    assert!(session.try_apply(SettingUpdate::Algorithm(AlgorithmId::Heap)));
    assert_eq!(session.engine().arrangements, arrangements + 1);
    assert!(session.engine().counters.is_zero());
}

#[test]
fn test_every_accepted_change_is_persisted() {
    let sink = RecordingSink::default();
    let mut session = Session::new(
        MockEngine::with_script(100),
        test_config(),
        Configuration::MAX_SIZE,
        Box::new(sink.clone()),
        Box::new(RecordingShare::default()),
    );

    assert_eq!(sink.fragments.borrow().len(), 1, "startup write-back");

    assert!(session.try_apply(SettingUpdate::Size(128)));
    let fragments = sink.fragments.borrow();
    assert_eq!(fragments.len(), 2);

    let persisted = codec::decode(fragments.last().expect("missing fragment"))
        .expect("persisted fragment must decode");
    assert_eq!(persisted.size, 128);
}

#[test]
fn test_rejected_change_is_not_persisted() {
    let sink = RecordingSink::default();
    let mut session = Session::new(
        MockEngine::with_script(100),
        test_config(),
        Configuration::MAX_SIZE,
        Box::new(sink.clone()),
        Box::new(RecordingShare::default()),
    );

    session.play_pause();
    assert!(!session.try_apply(SettingUpdate::Size(128)));
    assert_eq!(sink.fragments.borrow().len(), 1);
}

#[test]
fn test_share_copies_the_fragment_and_reverts() {
    let share = RecordingShare::default();
    let mut session = Session::new(
        MockEngine::with_script(100),
        test_config(),
        Configuration::MAX_SIZE,
        Box::new(RecordingSink::default()),
        Box::new(share.clone()),
    );

    let now = Instant::now();
    session.share(now);

    assert!(session.share_feedback());
    assert_eq!(
        share.copied.borrow().as_slice(),
        &[codec::encode(&session.config())]
    );

    // repeated share during the confirmation window is ignored
    session.share(now + Duration::from_millis(500));
    assert_eq!(share.copied.borrow().len(), 1);

    session.poll_share(now + Duration::from_millis(999));
    assert!(session.share_feedback());
    session.poll_share(now + Duration::from_millis(1000));
    assert!(!session.share_feedback());
}

#[test]
fn test_share_failure_degrades_gracefully() {
    let mut session = Session::new(
        MockEngine::with_script(100),
        test_config(),
        Configuration::MAX_SIZE,
        Box::new(RecordingSink::default()),
        Box::new(FailingShare),
    );

    let now = Instant::now();
    session.share(now);

    // same confirmation and revert as success
    assert!(session.share_feedback());
    session.poll_share(now + Duration::from_millis(1000));
    assert!(!session.share_feedback());
}

#[test]
fn test_size_never_exceeds_the_host_cap() {
    let mut session = Session::new(
        MockEngine::with_script(100),
        Configuration {
            size: 4096,
            ..Configuration::default()
        },
        Configuration::MAX_SIZE_CONSTRAINED,
        Box::new(RecordingSink::default()),
        Box::new(RecordingShare::default()),
    );

    // the startup configuration is clamped into the cap
    assert_eq!(session.config().size, Configuration::MAX_SIZE_CONSTRAINED);

    // cycling from the cap wraps instead of stepping above it
    let update = SettingCategory::Size.cycled(&session.config(), session.max_size());
    assert!(session.try_apply(update));
    assert!(
        session.config().size <= Configuration::MAX_SIZE_CONSTRAINED,
        "size cycled above the cap: {}",
        session.config().size
    );

    // a raw above-cap update clamps rather than escaping the cap
    assert!(session.try_apply(SettingUpdate::Size(4096)));
    assert_eq!(session.config().size, Configuration::MAX_SIZE_CONSTRAINED);
    assert_eq!(session.engine().size, Configuration::MAX_SIZE_CONSTRAINED);
}

#[test]
fn test_fps_is_zero_before_the_first_frame() {
    let mut session = mock_session(100);
    let now = Instant::now();

    assert_eq!(session.fps(now), 0.0);
    session.play_pause();
    assert_eq!(session.fps(now + Duration::from_millis(100)), 0.0);

    session.on_tick();
    assert!(session.fps(now + Duration::from_secs(1)) > 0.0);
}
