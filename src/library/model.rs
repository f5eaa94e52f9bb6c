use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::LibraryError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    /// Human readable name derived from the file name.
    pub name: String,
    pub path: PathBuf,
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            duration: None,
        }
    }

    /// `file://` URL for the audio file.
    pub fn url(&self) -> String {
        file_url(&self.path)
    }

    /// Icon shipped next to the sound: same stem, `.png` extension.
    pub fn icon(&self) -> PathBuf {
        self.path.with_extension("png")
    }

    /// URL of the icon when it exists on disk, `fallback` otherwise.
    pub fn art_url(&self, fallback: Option<&str>) -> String {
        let icon = self.icon();
        if icon.is_file() {
            file_url(&icon)
        } else {
            fallback.unwrap_or_default().to_string()
        }
    }
}

/// Percent-encoded `file://` URL. Relative paths cannot be expressed and are
/// passed through unencoded.
fn file_url(path: &Path) -> String {
    Url::from_file_path(path)
        .map(String::from)
        .unwrap_or_else(|()| format!("file://{}", path.display()))
}

/// Tracks sorted by name. Never empty.
#[derive(Clone, Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog from already-deduplicated tracks, sorting them by name.
    pub fn new(mut tracks: Vec<Track>) -> Result<Self, LibraryError> {
        if tracks.is_empty() {
            return Err(LibraryError::NoTracks);
        }
        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Ordinal of the track stored at `path`, if any.
    pub fn position(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
