use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug)]
pub enum AudioCmd {
    /// Prepare a paused sink for the file at position zero, tagged with its load generation.
    Load(PathBuf, u64),
    Play,
    Pause,
    /// Drop the sink but remember the file.
    Stop,
    /// Stop output and end the audio thread.
    Quit,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("cannot open sound file: {0}")]
    Open(#[from] std::io::Error),
    #[error("cannot decode sound file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
