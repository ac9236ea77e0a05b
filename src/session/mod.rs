//! The session controller
//!
//! This is the part of the program with actual behavioral complexity: the
//! idle/running/paused state machine that turns the engine's incremental
//! execution into a steerable animation.
//!
//! - [`controller`] — [`Session`], the state machine and command surface
//! - [`ports`] — the fragment-persistence and share-clipboard seams
//!
//! # Frame loop
//!
//! The host loop calls [`Session::on_tick`] once per iteration. While
//! running, each tick replays one time-budgeted engine frame and re-arms
//! the frame token; when the engine reports termination the session goes
//! idle and disables further stepping until reset. Holding the frame token
//! is a prerequisite for stepping, and every structural mutation takes the
//! token first — cancel-before-mutate by construction.

pub mod controller;
pub mod ports;

pub use controller::{Controls, Session, SessionState};
