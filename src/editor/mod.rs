//! The editing surface and tab manager.
//!
//! - [`buffer`] — a plain-text buffer with cursor, selection and undo/redo.
//! - [`language`] — extension-keyed content-type detection for highlighting.
//! - [`tabs`] — the open-file registry and the tab strip it backs.

pub mod buffer;
pub mod language;
pub mod tabs;

pub use buffer::EditorBuffer;
pub use language::Language;
pub use tabs::{EditorTabs, SaveOutcome, Tab};
