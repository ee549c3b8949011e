//! TUI pane rendering modules
//!
//! Stateless render functions for each visible region: the editor (tab strip
//! plus active buffer), the file explorer, the terminal, the status bar, and
//! modal overlays. Scroll state lives in [`crate::ui::app::App`] and is
//! passed in mutably so panes can clamp it against their content.

pub mod editor;
pub mod explorer;
pub mod modal;
pub mod status;
pub mod terminal;

pub use editor::render_editor_pane;
pub use explorer::render_explorer_pane;
pub use modal::render_modal;
pub use status::render_status_bar;
pub use terminal::render_terminal_pane;
