//! Noise library: discovery of audio files and the sorted catalog built from them.
//!
//! Tracks are found by listing a fixed set of directories (no recursion), and
//! every rescan rebuilds the catalog from scratch.

mod display;
mod dirs;
mod model;
mod scan;

pub use display::display_name;
pub use dirs::candidate_dirs;
pub use model::{Catalog, Track};
pub use scan::{is_audio_file, scan_dirs};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// None of the candidate directories held a playable file.
    #[error("no noise files found")]
    NoTracks,
}
