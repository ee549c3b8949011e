//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, modal
//!   dialogs, and the command surface (file/edit/view/run/help actions)
//! - **[`panes`]** — stateless render functions for each visible pane
//!   (editor, explorer, terminal, status bar, modal overlays)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Settings`] record and a root directory and call [`App::run`] to start
//! the event loop.
//!
//! [`Settings`]: crate::config::Settings
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
