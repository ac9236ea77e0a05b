//! Main TUI application state and logic

use crate::config::SettingCategory;
use crate::engine::{SortEngine, Sorter};
use crate::session::{Session, SessionState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
    backend::Backend,
};
use std::io;
use std::time::{Duration, Instant};

/// The main application state
pub struct App {
    /// The animation session driving the engine
    pub session: Session<Sorter>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session<Sorter>) -> Self {
        App {
            session,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.session.poll_share(Instant::now());

            // One animation frame per loop iteration while running
            let was_running = self.session.state() == SessionState::Running;
            self.session.on_tick();

            if was_running && self.session.state() == SessionState::Idle {
                self.status_message = String::from("Sorted!");
            }

            // Short poll while animating so frames keep coming; relaxed
            // poll otherwise
            let timeout = if self.session.state() == SessionState::Running {
                Duration::from_millis(1)
            } else {
                Duration::from_millis(50)
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Array pane on the left, stats + settings on the right, status
        // bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[1]);

        let engine = self.session.engine();
        let cursor = engine.last_operation().and_then(|operation| operation.cursor());

        super::panes::render_array_pane(
            frame,
            columns[0],
            engine.values(),
            engine.size(),
            cursor,
        );

        super::panes::render_stats_pane(
            frame,
            right_rows[0],
            engine.counters(),
            engine.last_operation(),
            self.session.fps(Instant::now()),
            self.session.state(),
        );

        super::panes::render_settings_pane(
            frame,
            right_rows[1],
            &self.session.config(),
            self.session.state() == SessionState::Running,
            self.session.max_size(),
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.session.share_feedback(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.play_pause();
                }
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.step_once();
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.status_message = String::from("Reset");
            }
            KeyCode::Char('s') => {
                self.session.share(Instant::now());
            }
            KeyCode::Char('i') => self.cycle_setting(SettingCategory::Initial),
            KeyCode::Char('z') => self.cycle_setting(SettingCategory::Size),
            KeyCode::Char('t') => self.cycle_setting(SettingCategory::StepTimeBudget),
            KeyCode::Char('a') => self.cycle_setting(SettingCategory::Algorithm),
            _ => {}
        }
    }

    fn play_pause(&mut self) {
        self.session.play_pause();

        match self.session.state() {
            SessionState::Running => self.status_message = String::from("Sorting..."),
            SessionState::Paused => self.status_message = String::from("Paused"),
            SessionState::Idle => {}
        }
    }

    fn step_once(&mut self) {
        let could_step = self.session.controls().step;
        self.session.step_once();

        if could_step {
            self.status_message = if self.session.controls().step {
                String::from("Stepped")
            } else {
                String::from("Sorted!")
            };
        }
    }

    /// Cycle a settings category to its next value.
    ///
    /// Silently ignored while running; the dimmed settings pane is the only
    /// signal for the rejection.
    fn cycle_setting(&mut self, category: SettingCategory) {
        let update = category.cycled(&self.session.config(), self.session.max_size());

        if self.session.try_apply(update) {
            self.status_message = String::from("Ready!");
        }
    }
}
