// Integration tests for the terminal session state machine

use std::time::{Duration, Instant};

use ride::shell::{SessionState, TerminalSession};

fn session_in(dir: &std::path::Path) -> TerminalSession {
    TerminalSession::new(dir.canonicalize().expect("canonical cwd"))
}

/// Drain events until the session settles back to awaiting input.
fn wait_for_exit(session: &mut TerminalSession) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while session.is_running() {
        session.poll();
        if Instant::now() > deadline {
            panic!("command did not finish in time");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn empty_submit_never_starts_a_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    session.input = String::new();
    session.submit();

    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert_eq!(session.lines(), &[session.prompt().to_string()]);
}

#[test]
fn cd_valid_updates_cwd_and_prompt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let mut session = session_in(dir.path());

    session.input = "cd sub".to_string();
    session.submit();

    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert!(session.cwd().ends_with("sub"));
    assert_eq!(session.prompt(), format!("{}> ", session.cwd().display()));
}

#[test]
fn cd_invalid_leaves_cwd_and_prompt_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let cwd_before = session.cwd().to_path_buf();
    let prompt_before = session.prompt().to_string();

    session.input = "cd does-not-exist".to_string();
    session.submit();

    assert_eq!(session.cwd(), cwd_before);
    assert_eq!(session.prompt(), prompt_before);
    // Error line after the echoed command, still awaiting input.
    assert!(session.lines().last().unwrap().starts_with("cd:"));
    assert_eq!(session.state(), SessionState::AwaitingInput);
}

#[cfg(unix)]
#[test]
fn external_command_streams_output_then_returns_to_awaiting() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    session.input = "echo hello".to_string();
    session.submit();
    assert_eq!(session.state(), SessionState::Running);

    wait_for_exit(&mut session);
    assert!(session.lines().iter().any(|l| l == "hello"));
}

#[cfg(unix)]
#[test]
fn cwd_persists_across_commands() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let mut session = session_in(dir.path());

    session.input = "cd sub".to_string();
    session.submit();

    session.input = "pwd".to_string();
    session.submit();
    wait_for_exit(&mut session);

    let expected = session.cwd().display().to_string();
    assert!(
        session.lines().iter().any(|l| l.contains(&expected)),
        "pwd output should reflect the session cwd"
    );
}

#[cfg(unix)]
#[test]
fn second_command_while_running_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    session.input = "sleep 1".to_string();
    session.submit();
    assert_eq!(session.state(), SessionState::Running);

    session.input = "echo nope".to_string();
    session.submit();
    assert_eq!(
        session.lines().last().unwrap(),
        "(a command is still running)"
    );

    wait_for_exit(&mut session);
    // The rejected command never ran.
    assert!(!session.lines().iter().any(|l| l == "nope"));
}

#[cfg(unix)]
#[test]
fn stderr_is_appended_to_the_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    session.input = "echo oops 1>&2".to_string();
    session.submit();
    wait_for_exit(&mut session);

    assert!(session.lines().iter().any(|l| l == "oops"));
}
