//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state and the keyboard/animation event loop
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (array, stats, settings, status bar)
//! - **[`theme`]** — centralized color palette and the value-to-hue mapping
//! - **[`clipboard`]** — the arboard-backed share port
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Session`] and call [`App::run`] to start the event loop.
//!
//! [`Session`]: crate::session::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod clipboard;
pub mod panes;
pub mod theme;

pub use app::App;
