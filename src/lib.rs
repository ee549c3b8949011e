//! # Introduction
//!
//! ride is a terminal IDE: a tabbed plain-text editor, a file-system
//! explorer, and an embedded line-oriented shell, composed in one
//! [ratatui](https://docs.rs/ratatui) window.
//!
//! ## Components
//!
//! 1. [`editor`] — the editing surfaces: [`editor::buffer::EditorBuffer`]
//!    (text, cursor, selection, undo/redo) and [`editor::tabs::EditorTabs`],
//!    the open-file registry mapping canonical paths to tabs.
//! 2. [`explorer`] — the file tree browser with lazy expansion, re-rooting,
//!    rename and delete.
//! 3. [`shell`] — the terminal session: a session-scoped working directory,
//!    internal `cd`, and external commands run under the platform shell with
//!    output streamed back over a channel.
//! 4. [`config`] — the JSON settings record persisted across runs.
//! 5. [`ui`] — the ratatui application shell; not part of the stable
//!    library API.
//!
//! Everything is driven by one event loop on the UI thread; the only
//! concurrency is the external process spawned by the terminal.

pub mod config;
pub mod editor;
pub mod error;
pub mod explorer;
pub mod shell;
pub mod ui;
