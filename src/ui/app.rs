//! Main TUI application state and logic.
//!
//! `App` is the window coordinator: it owns the tab manager, the file tree,
//! the terminal session and the settings record, dispatches the key-driven
//! command surface, and runs the event loop. All handlers run on the UI
//! thread; the only concurrency is the external process behind the terminal
//! session, whose output is drained between redraws.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::config::Settings;
use crate::editor::{EditorTabs, SaveOutcome};
use crate::error::AppError;
use crate::explorer::{Activation, FileTree};
use crate::shell::TerminalSession;

/// Which pane is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Explorer,
    Editor,
    Terminal,
}

/// A blocking overlay awaiting user input.
#[derive(Debug, Clone)]
pub enum Modal {
    Error(String),
    Warning(String),
    About,
    ConfirmDelete(PathBuf),
    SaveAsPrompt { input: String },
    RenamePrompt { path: PathBuf, input: String },
}

/// The main application state.
pub struct App {
    pub tabs: EditorTabs,
    pub explorer: FileTree,
    pub shell: TerminalSession,
    pub settings: Settings,

    pub focused_pane: FocusedPane,
    pub explorer_visible: bool,
    pub terminal_visible: bool,

    /// App-level clipboard shared by all editing surfaces.
    clipboard: String,

    pub modal: Option<Modal>,
    pub status_message: String,
    status_is_error: bool,

    /// Per-pane scroll offsets, clamped by the render functions.
    editor_scroll: usize,
    explorer_scroll: usize,
    terminal_scroll: usize,

    pub should_quit: bool,
}

impl App {
    /// Create the app rooted at `root`, applying persisted settings.
    pub fn new(settings: Settings, root: PathBuf) -> Self {
        let explorer_visible = settings.explorer_visible;
        let terminal_visible = settings.terminal_visible;
        App {
            tabs: EditorTabs::new(),
            explorer: FileTree::new(&root),
            shell: TerminalSession::new(root),
            settings,
            focused_pane: FocusedPane::Editor,
            explorer_visible,
            terminal_visible,
            clipboard: String::new(),
            modal: None,
            status_message: String::from("Ready"),
            status_is_error: false,
            editor_scroll: 0,
            explorer_scroll: 0,
            terminal_scroll: usize::MAX,
            should_quit: false,
        }
    }

    /// Run the TUI event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drain any output from a running command.
            if self.shell.poll() {
                self.terminal_scroll = usize::MAX;
            }

            // Poll with timeout so process output keeps flowing while idle.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Settings to persist at shutdown, refreshed from the terminal size.
    pub fn settings_snapshot(&self, width: u16, height: u16) -> Settings {
        let mut settings = self.settings.clone();
        settings.window.width = width as u32;
        settings.window.height = height as u32;
        settings.explorer_visible = self.explorer_visible;
        settings.terminal_visible = self.terminal_visible;
        settings
    }

    // ---- rendering ----

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let work_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = if self.explorer_visible {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(22), Constraint::Percentage(78)])
                .split(work_area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100)])
                .split(work_area)
        };

        if self.explorer_visible {
            super::panes::render_explorer_pane(
                frame,
                columns[0],
                &self.explorer,
                self.focused_pane == FocusedPane::Explorer,
                &mut self.explorer_scroll,
            );
        }

        let right = *columns.last().expect("layout always has a column");
        let rows = if self.terminal_visible {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(right)
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(100)])
                .split(right)
        };

        super::panes::render_editor_pane(
            frame,
            rows[0],
            &self.tabs,
            self.focused_pane == FocusedPane::Editor && self.modal.is_none(),
            &mut self.editor_scroll,
        );

        if self.terminal_visible {
            super::panes::render_terminal_pane(
                frame,
                rows[1],
                &self.shell,
                self.focused_pane == FocusedPane::Terminal && self.modal.is_none(),
                &mut self.terminal_scroll,
            );
        }

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.status_is_error,
            self.shell.is_running(),
        );

        if let Some(modal) = &self.modal {
            super::panes::render_modal(frame, size, modal);
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn report(&mut self, error: AppError) {
        tracing::warn!(error = %error, "reporting error to user");
        self.status_is_error = true;
        self.status_message = error.to_string();
        self.modal = Some(Modal::Error(error.to_string()));
    }

    // ---- key dispatch ----

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.new_file();
                return;
            }
            KeyCode::Char('s' | 'S') if ctrl && shift => {
                self.prompt_save_as();
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.save_file();
                return;
            }
            KeyCode::Char('b') if ctrl => {
                self.toggle_explorer();
                return;
            }
            KeyCode::Char('t') if ctrl => {
                self.toggle_terminal();
                return;
            }
            KeyCode::Char('o') if ctrl => {
                if self.explorer_visible {
                    self.focused_pane = FocusedPane::Explorer;
                    self.set_status("Select a file in the explorer and press Enter");
                }
                return;
            }
            // Settings dialog is still a stub, as in the menu surface.
            KeyCode::Char(',') if ctrl => {
                self.set_status("Settings dialog is not implemented yet");
                return;
            }
            KeyCode::F(5) => {
                self.run_current_file();
                return;
            }
            KeyCode::F(1) => {
                self.modal = Some(Modal::About);
                return;
            }
            KeyCode::BackTab => {
                self.cycle_focus();
                return;
            }
            _ => {}
        }

        match self.focused_pane {
            FocusedPane::Explorer => self.handle_explorer_key(key),
            FocusedPane::Editor => self.handle_editor_key(key),
            FocusedPane::Terminal => self.handle_terminal_key(key),
        }
    }

    fn cycle_focus(&mut self) {
        let order = [
            FocusedPane::Explorer,
            FocusedPane::Editor,
            FocusedPane::Terminal,
        ];
        let current = order
            .iter()
            .position(|p| *p == self.focused_pane)
            .unwrap_or(1);
        for step in 1..=order.len() {
            let candidate = order[(current + step) % order.len()];
            let visible = match candidate {
                FocusedPane::Explorer => self.explorer_visible,
                FocusedPane::Editor => true,
                FocusedPane::Terminal => self.terminal_visible,
            };
            if visible {
                self.focused_pane = candidate;
                return;
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Edit-menu actions forward to the focused surface, no-op if none.
        if ctrl {
            match key.code {
                KeyCode::Char('z') => {
                    self.undo();
                    return;
                }
                KeyCode::Char('y') => {
                    self.redo();
                    return;
                }
                KeyCode::Char('x') => {
                    self.cut();
                    return;
                }
                KeyCode::Char('c') => {
                    self.copy();
                    return;
                }
                KeyCode::Char('v') => {
                    self.paste();
                    return;
                }
                KeyCode::Char('a') => {
                    self.select_all();
                    return;
                }
                KeyCode::Char('w') => {
                    self.close_active_tab();
                    return;
                }
                _ => {}
            }
        }

        if alt {
            match key.code {
                KeyCode::Left => {
                    self.tabs.focus_prev();
                    return;
                }
                KeyCode::Right => {
                    self.tabs.focus_next();
                    return;
                }
                _ => {}
            }
        }

        let Some(tab) = self.tabs.active_tab_mut() else {
            return;
        };
        let buffer = &mut tab.buffer;
        match key.code {
            KeyCode::Char(c) if !ctrl => buffer.insert_char(c),
            KeyCode::Enter => buffer.insert_newline(),
            KeyCode::Tab => buffer.insert_tab(),
            KeyCode::Backspace => buffer.backspace(),
            KeyCode::Delete => buffer.delete_forward(),
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Up => buffer.move_up(),
            KeyCode::Down => buffer.move_down(),
            KeyCode::Home => buffer.move_home(),
            KeyCode::End => buffer.move_end(),
            KeyCode::PageUp => buffer.move_page_up(20),
            KeyCode::PageDown => buffer.move_page_down(20),
            _ => {}
        }
    }

    fn handle_explorer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.explorer.select_up(),
            KeyCode::Down => self.explorer.select_down(),
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Enter => match self.explorer.activate() {
                Activation::OpenFile(path) => self.open_file(&path),
                Activation::ToggledDir | Activation::None => {}
            },
            // Navigate into the selected folder (Open Folder)
            KeyCode::Char('o') => {
                if let Some(node) = self.explorer.selected_node() {
                    if node.is_dir {
                        self.explorer.set_root(&node.path);
                        self.explorer_scroll = 0;
                        self.set_status(format!("Opened folder: {}", node.path.display()));
                    }
                }
            }
            // Re-root at the parent directory
            KeyCode::Backspace => {
                let parent = self.explorer.root_path().parent().map(Path::to_path_buf);
                if let Some(parent) = parent {
                    self.explorer.set_root(&parent);
                    self.explorer_scroll = 0;
                    self.set_status(format!("Opened folder: {}", parent.display()));
                }
            }
            KeyCode::Char('r') | KeyCode::F(2) => {
                if let Some(node) = self.explorer.selected_node() {
                    if node.depth > 0 {
                        self.modal = Some(Modal::RenamePrompt {
                            path: node.path,
                            input: node.name,
                        });
                    }
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(node) = self.explorer.selected_node() {
                    if node.depth > 0 {
                        self.modal = Some(Modal::ConfirmDelete(node.path));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_terminal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.shell.input.push(c);
                self.terminal_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.shell.input.pop();
            }
            KeyCode::Enter => {
                self.shell.submit();
                self.terminal_scroll = usize::MAX;
            }
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Up | KeyCode::PageUp => {
                let current = self.current_terminal_scroll();
                self.terminal_scroll = current.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::PageDown => {
                self.terminal_scroll = self.terminal_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// The clamped scroll value (usize::MAX is the stick-to-bottom marker).
    fn current_terminal_scroll(&self) -> usize {
        if self.terminal_scroll == usize::MAX {
            self.shell.lines().len()
        } else {
            self.terminal_scroll
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::Error(_) | Modal::Warning(_) | Modal::About => match key.code {
                KeyCode::Enter | KeyCode::Esc => {}
                _ => self.modal = Some(modal),
            },
            Modal::ConfirmDelete(path) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    match self.explorer.delete(&path) {
                        Ok(()) => self.set_status(format!("Deleted {}", path.display())),
                        Err(e) => self.report(e),
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => self.modal = Some(Modal::ConfirmDelete(path)),
            },
            Modal::SaveAsPrompt { mut input } => match key.code {
                KeyCode::Enter => {
                    if !input.is_empty() {
                        self.finish_save_as(PathBuf::from(input));
                    }
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    input.pop();
                    self.modal = Some(Modal::SaveAsPrompt { input });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.modal = Some(Modal::SaveAsPrompt { input });
                }
                _ => self.modal = Some(Modal::SaveAsPrompt { input }),
            },
            Modal::RenamePrompt { path, mut input } => match key.code {
                KeyCode::Enter => {
                    if !input.is_empty() {
                        match self.explorer.rename(&path, &input) {
                            Ok(target) => {
                                self.set_status(format!("Renamed to {}", target.display()))
                            }
                            Err(e) => self.report(e),
                        }
                    }
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    input.pop();
                    self.modal = Some(Modal::RenamePrompt { path, input });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.modal = Some(Modal::RenamePrompt { path, input });
                }
                _ => self.modal = Some(Modal::RenamePrompt { path, input }),
            },
        }
    }

    // ---- file actions ----

    fn new_file(&mut self) {
        self.tabs.new_untitled();
        self.focused_pane = FocusedPane::Editor;
        self.set_status("New file created");
    }

    /// Open a file in the editor (delegated to by the explorer).
    pub fn open_file(&mut self, path: &Path) {
        match self.tabs.open(path) {
            Ok(()) => {
                self.focused_pane = FocusedPane::Editor;
                self.editor_scroll = 0;
                self.set_status(format!("Opened {}", path.display()));
            }
            Err(e) => self.report(e),
        }
    }

    fn save_file(&mut self) {
        match self.tabs.save_active() {
            Ok(SaveOutcome::Saved(path)) => self.set_status(format!("Saved {}", path.display())),
            Ok(SaveOutcome::NeedsPath) => self.prompt_save_as(),
            Err(e) => self.report(e),
        }
    }

    fn prompt_save_as(&mut self) {
        if self.tabs.active_tab().is_none() {
            return;
        }
        let input = format!("{}/", self.shell.cwd().display());
        self.modal = Some(Modal::SaveAsPrompt { input });
    }

    fn finish_save_as(&mut self, path: PathBuf) {
        match self.tabs.save_active_as(&path) {
            Ok(saved) => {
                self.set_status(format!("Saved as {}", saved.display()));
                if let Some(parent) = saved.parent() {
                    let parent = parent.to_path_buf();
                    self.explorer.refresh(&parent);
                }
            }
            Err(e) => self.report(e),
        }
    }

    fn close_active_tab(&mut self) {
        if let Some(index) = self.tabs.active_index() {
            self.tabs.close(index);
            self.set_status("Closed tab");
        }
    }

    // ---- edit actions (forwarded to the active surface) ----

    fn undo(&mut self) {
        if let Some(tab) = self.tabs.active_tab_mut() {
            tab.buffer.undo();
        }
    }

    fn redo(&mut self) {
        if let Some(tab) = self.tabs.active_tab_mut() {
            tab.buffer.redo();
        }
    }

    fn cut(&mut self) {
        if let Some(tab) = self.tabs.active_tab_mut() {
            if let Some(text) = tab.buffer.cut() {
                self.clipboard = text;
            }
        }
    }

    fn copy(&mut self) {
        if let Some(tab) = self.tabs.active_tab() {
            if let Some(text) = tab.buffer.copy() {
                self.clipboard = text;
            }
        }
    }

    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let text = self.clipboard.clone();
        if let Some(tab) = self.tabs.active_tab_mut() {
            tab.buffer.paste(&text);
        }
    }

    fn select_all(&mut self) {
        if let Some(tab) = self.tabs.active_tab_mut() {
            tab.buffer.select_all();
        }
    }

    // ---- view actions ----

    fn toggle_explorer(&mut self) {
        self.explorer_visible = !self.explorer_visible;
        if !self.explorer_visible && self.focused_pane == FocusedPane::Explorer {
            self.focused_pane = FocusedPane::Editor;
        }
    }

    fn toggle_terminal(&mut self) {
        self.terminal_visible = !self.terminal_visible;
        if !self.terminal_visible && self.focused_pane == FocusedPane::Terminal {
            self.focused_pane = FocusedPane::Editor;
        }
    }

    // ---- run ----

    /// Run the current file with the Python interpreter. Non-`.py` paths
    /// (and untitled tabs) get a warning; nothing is saved or executed.
    pub fn run_current_file(&mut self) {
        let path = self.tabs.active_tab().and_then(|tab| tab.path.clone());
        let Some(path) = path.filter(|p| is_runnable(p)) else {
            let shown = self
                .tabs
                .active_tab()
                .and_then(|t| t.path.clone())
                .unwrap_or_else(|| PathBuf::from("Untitled"));
            self.modal = Some(Modal::Warning(
                AppError::UnsupportedFileType(shown).to_string(),
            ));
            return;
        };

        // Save before running.
        match self.tabs.save_active() {
            Ok(_) => {}
            Err(e) => {
                self.report(e);
                return;
            }
        }

        self.terminal_visible = true;
        self.focused_pane = FocusedPane::Terminal;
        self.shell.execute(&format!("python {}", path.display()));
        self.terminal_scroll = usize::MAX;
        self.set_status(format!("Running {}", path.display()));
    }
}

/// Whether `path` has a recognized runnable source extension.
pub fn is_runnable(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
}
