use thiserror::Error;

use crate::library::LibraryError;

/// Errors that end the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no noise files found")]
    NoTracks,

    #[error("no audio output: {0}")]
    AudioOutput(String),
}

impl From<LibraryError> for AppError {
    fn from(e: LibraryError) -> Self {
        match e {
            LibraryError::NoTracks => AppError::NoTracks,
        }
    }
}
