use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the IDE.
///
/// File I/O failures become blocking modals; directory-change failures are
/// printed inline in the terminal view; settings failures are logged and
/// otherwise ignored. None of these are fatal to the application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("could not open {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not save {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cd: {path}: {source}")]
    DirChange {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("settings error: {0}")]
    Settings(String),

    #[error("only Python files can be executed: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("could not delete {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not rename {path}: {source}")]
    Rename {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not start command: {0}")]
    Spawn(std::io::Error),
}
