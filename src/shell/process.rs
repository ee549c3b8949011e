//! External process plumbing for the terminal session.
//!
//! Commands run under the platform shell with piped stdio. Two reader
//! threads stream stdout/stderr chunks over an mpsc channel; a waiter thread
//! joins them and publishes the exit status. The UI event loop drains the
//! channel between redraws, so the interface stays responsive while a
//! command runs.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::AppError;

/// Output and lifecycle notifications from a running command.
#[derive(Debug)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    Exited(Option<i32>),
}

/// Spawn `command` under the platform shell with `cwd` as its working
/// directory. Returns the channel the process reports on.
pub fn spawn_shell(command: &str, cwd: &Path) -> Result<Receiver<ProcessEvent>, AppError> {
    let mut child = shell_command(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(AppError::Spawn)?;

    tracing::debug!(command, pid = child.id(), "spawned shell command");

    let (tx, rx) = mpsc::channel();

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let out_handle = stdout.map(|pipe| reader_thread(pipe, tx.clone(), ProcessEvent::Stdout));
    let err_handle = stderr.map(|pipe| reader_thread(pipe, tx.clone(), ProcessEvent::Stderr));

    thread::spawn(move || {
        let status = child.wait();
        if let Some(handle) = out_handle {
            let _ = handle.join();
        }
        if let Some(handle) = err_handle {
            let _ = handle.join();
        }
        let code = match status {
            Ok(status) => status.code(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to wait for command");
                None
            }
        };
        tracing::debug!(exit_code = ?code, "command finished");
        let _ = tx.send(ProcessEvent::Exited(code));
    });

    Ok(rx)
}

fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd.exe");
        cmd.arg("/c").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("/bin/bash");
        cmd.arg("-c").arg(command);
        cmd
    }
}

/// Read a pipe in chunks, decoding each as UTF-8 (lossily) and forwarding it
/// as an event. The thread ends when the pipe closes.
fn reader_thread<R>(
    mut pipe: R,
    tx: Sender<ProcessEvent>,
    wrap: fn(String) -> ProcessEvent,
) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                    if tx.send(wrap(chunk)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "pipe read failed");
                    break;
                }
            }
        }
    })
}
