//! # Introduction
//!
//! sortty animates sorting algorithms in the terminal, one elementary
//! operation at a time.  The engine records an algorithm's full run as an
//! operation script, and a session controller replays it as a steerable
//! animation rendered with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Configuration → Engine (record script) → Session (step frames) → TUI
//! ```
//!
//! 1. [`config`] — the settings record, the store that swaps it wholesale,
//!    and the percent-encoded fragment codec used for shareable state.
//! 2. [`engine`] — the instrumented array, the ten algorithms, and the
//!    script-replaying [`engine::Sorter`].
//! 3. [`session`] — the idle/running/paused state machine that drives the
//!    engine with time-budgeted frames.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! bubble, selection, cocktail, insertion, gnome, cycle, heap, shell,
//! odd-even, quicksort.

pub mod config;
pub mod engine;
pub mod session;
pub mod ui;
