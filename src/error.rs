use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort a conversion run
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("directory not readable")]
    DirectoryNotReadable,

    #[error("the specified path is not inside a Git repository")]
    NotInRepository,

    #[error("The working tree is not clean. Please commit your changes before continuing.")]
    DirtyWorkingTree,

    /// The OS error is part of the message, not a separate cause
    #[error("{}: {error}", .path.display())]
    Io { path: PathBuf, error: std::io::Error },

    #[error("git status failed in {}: {message}", .root.display())]
    StatusCommand { root: PathBuf, message: String },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error: source,
        }
    }

    pub fn status_command(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::StatusCommand {
            root: root.into(),
            message: message.into(),
        }
    }
}
