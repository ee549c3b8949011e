//! The embedded command terminal.
//!
//! A line-oriented shell session: a typed command line is either handled
//! internally (`cd`) or handed to an external process whose output streams
//! back into the view. The working directory is session state, never a
//! process-wide mutation.
//!
//! State machine: `AwaitingInput` → (non-empty submit of an external
//! command) → `Running` → (process exits, output drained) → `AwaitingInput`.
//! An empty submit only re-displays the prompt. The prompt is shown exactly
//! once per command, after the process has fully exited.

pub mod process;

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use crate::error::AppError;

pub use process::ProcessEvent;

/// Whether the session is waiting for a line or running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Running,
}

/// One terminal session: cwd, prompt, scrollback and at most one in-flight
/// external process.
pub struct TerminalSession {
    cwd: PathBuf,
    prompt: String,
    /// Scrollback: past prompts, command echoes, and process output.
    lines: Vec<String>,
    /// The line currently being typed (shown after the live prompt).
    pub input: String,
    state: SessionState,
    events: Option<Receiver<ProcessEvent>>,
    /// Trailing partial output not yet terminated by a newline.
    partial: String,
}

impl TerminalSession {
    pub fn new(cwd: PathBuf) -> Self {
        let prompt = prompt_for(&cwd);
        Self {
            cwd,
            prompt,
            lines: Vec::new(),
            input: String::new(),
            state: SessionState::AwaitingInput,
            events: None,
            partial: String::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Scrollback lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Trailing output that has not yet been terminated by a newline.
    pub fn partial_line(&self) -> &str {
        &self.partial
    }

    /// Submit the current input line.
    pub fn submit(&mut self) {
        let command = std::mem::take(&mut self.input);
        let command = command.trim().to_string();
        self.execute(&command);
    }

    /// Execute a command line as if typed at the prompt. Used both by the
    /// key handler and by run-current-file.
    pub fn execute(&mut self, command: &str) {
        if self.state == SessionState::Running {
            // One command at a time; later submissions are rejected, not
            // queued.
            self.lines
                .push("(a command is still running)".to_string());
            return;
        }

        // Echo the prompt and the command into scrollback.
        self.lines.push(format!("{}{}", self.prompt, command));

        if command.is_empty() {
            return;
        }

        if let Some(path) = command.strip_prefix("cd ") {
            self.change_dir(path.trim());
            return;
        }
        if command == "cd" {
            self.change_dir("~");
            return;
        }

        match process::spawn_shell(command, &self.cwd) {
            Ok(rx) => {
                self.events = Some(rx);
                self.state = SessionState::Running;
            }
            Err(e) => {
                self.lines.push(e.to_string());
            }
        }
    }

    /// Handle `cd` internally and synchronously. Failure leaves the working
    /// directory unchanged and appends the error inline.
    fn change_dir(&mut self, path: &str) {
        let target = self.resolve(path);
        match std::fs::canonicalize(&target) {
            Ok(dir) if dir.is_dir() => {
                self.cwd = dir;
                self.prompt = prompt_for(&self.cwd);
            }
            Ok(other) => {
                let err = AppError::DirChange {
                    path: other,
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "not a directory",
                    ),
                };
                self.lines.push(err.to_string());
            }
            Err(source) => {
                let err = AppError::DirChange {
                    path: target,
                    source,
                };
                self.lines.push(err.to_string());
            }
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path == "~" {
            return dirs::home_dir().unwrap_or_else(|| self.cwd.clone());
        }
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.cwd.join(p)
        }
    }

    /// Drain pending process events into the view. Returns true if anything
    /// changed (the caller should redraw).
    pub fn poll(&mut self) -> bool {
        // Take the receiver for the duration of the drain; appending output
        // needs the rest of the session mutably.
        let Some(rx) = self.events.take() else {
            return false;
        };
        let mut changed = false;
        let mut finished = false;
        while let Ok(event) = rx.try_recv() {
            changed = true;
            match event {
                ProcessEvent::Stdout(chunk) | ProcessEvent::Stderr(chunk) => {
                    self.append_output(&chunk);
                }
                ProcessEvent::Exited(code) => {
                    self.flush_partial();
                    if let Some(code) = code {
                        if code != 0 {
                            tracing::debug!(exit_code = code, "command exited nonzero");
                        }
                    }
                    finished = true;
                }
            }
        }
        if finished {
            self.state = SessionState::AwaitingInput;
        } else {
            self.events = Some(rx);
        }
        changed
    }

    /// Append a UTF-8 output chunk, splitting on newlines and keeping any
    /// unterminated tail for the next chunk.
    fn append_output(&mut self, chunk: &str) {
        self.partial.push_str(chunk);
        while let Some(pos) = self.partial.find('\n') {
            let mut line: String = self.partial.drain(..=pos).collect();
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            self.lines.push(line);
        }
    }

    fn flush_partial(&mut self) {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.lines.push(line);
        }
    }
}

fn prompt_for(cwd: &Path) -> String {
    format!("{}> ", cwd.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TerminalSession {
        let cwd = std::env::temp_dir().canonicalize().expect("temp dir");
        TerminalSession::new(cwd)
    }

    #[test]
    fn prompt_reflects_cwd() {
        let s = session();
        assert_eq!(s.prompt(), format!("{}> ", s.cwd().display()));
    }

    #[test]
    fn empty_submit_redisplays_prompt_only() {
        let mut s = session();
        s.input = String::new();
        s.submit();
        assert_eq!(s.state(), SessionState::AwaitingInput);
        assert_eq!(s.lines().len(), 1);
        assert_eq!(s.lines()[0], s.prompt());
    }

    #[test]
    fn cd_to_valid_dir_updates_cwd_and_prompt() {
        let mut s = session();
        let sub = s.cwd().join("ride-cd-test");
        std::fs::create_dir_all(&sub).unwrap();
        s.input = format!("cd {}", sub.display());
        s.submit();
        assert_eq!(s.state(), SessionState::AwaitingInput);
        assert_eq!(s.cwd(), sub.canonicalize().unwrap());
        assert!(s.prompt().contains("ride-cd-test"));
        let _ = std::fs::remove_dir(sub);
    }

    #[test]
    fn cd_to_invalid_dir_is_inline_error_cwd_unchanged() {
        let mut s = session();
        let before = s.cwd().to_path_buf();
        let prompt_before = s.prompt().to_string();
        s.input = "cd /definitely/not/a/dir".to_string();
        s.submit();
        assert_eq!(s.cwd(), before);
        assert_eq!(s.prompt(), prompt_before);
        assert!(s.lines().last().unwrap().starts_with("cd:"));
        assert_eq!(s.state(), SessionState::AwaitingInput);
    }

    #[test]
    fn poll_drains_events_and_returns_to_awaiting() {
        let mut s = session();
        let (tx, rx) = std::sync::mpsc::channel();
        s.events = Some(rx);
        s.state = SessionState::Running;

        tx.send(ProcessEvent::Stdout("hi\n".to_string())).unwrap();
        tx.send(ProcessEvent::Exited(Some(0))).unwrap();

        assert!(s.poll());
        assert_eq!(s.lines(), &["hi".to_string()]);
        assert_eq!(s.state(), SessionState::AwaitingInput);
        // Nothing left to drain once the process has exited.
        assert!(!s.poll());
    }

    #[test]
    fn poll_keeps_the_receiver_while_still_running() {
        let mut s = session();
        let (tx, rx) = std::sync::mpsc::channel();
        s.events = Some(rx);
        s.state = SessionState::Running;

        tx.send(ProcessEvent::Stdout("partial".to_string())).unwrap();
        assert!(s.poll());
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.partial_line(), "partial");

        tx.send(ProcessEvent::Exited(Some(0))).unwrap();
        assert!(s.poll());
        assert_eq!(s.lines().last().unwrap(), "partial");
        assert_eq!(s.state(), SessionState::AwaitingInput);
    }

    #[test]
    fn output_chunks_split_on_newlines() {
        let mut s = session();
        s.append_output("hel");
        s.append_output("lo\nwor");
        assert_eq!(s.lines(), &["hello".to_string()]);
        assert_eq!(s.partial_line(), "wor");
        s.flush_partial();
        assert_eq!(s.lines().last().unwrap(), "wor");
    }
}
