use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::LibraryError;
use super::display::display_name;
use super::model::{Catalog, Track};

/// Whether `path` carries one of the configured audio extensions (case-insensitive).
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

/// List every directory in `dirs` (one level deep) and build a catalog.
///
/// Missing directories are skipped. Files whose derived names collide keep
/// the path found last. Returns `LibraryError::NoTracks` if nothing matched.
pub fn scan_dirs(dirs: &[PathBuf], settings: &LibrarySettings) -> Result<Catalog, LibraryError> {
    let mut by_name: BTreeMap<String, PathBuf> = BTreeMap::new();

    for dir in dirs {
        if !dir.is_dir() {
            trace!(dir = %dir.display(), "skipping missing sound directory");
            continue;
        }

        let mut entries: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_audio_file(p, settings))
            .collect();
        // Directory listing order is filesystem dependent; fix it so the
        // "later path wins" rule for duplicate names is reproducible.
        entries.sort();

        for path in entries {
            let path = std::path::absolute(&path).unwrap_or(path);
            let name = display_name(&path);
            if let Some(old) = by_name.insert(name.clone(), path) {
                debug!(%name, replaced = %old.display(), "duplicate sound name");
            }
        }
    }

    let tracks: Vec<Track> = by_name
        .into_iter()
        .map(|(name, path)| {
            let mut track = Track::new(name, path);
            track.duration = read_duration(&track.path);
            track
        })
        .collect();

    let catalog = Catalog::new(tracks)?;
    debug!(tracks = catalog.len(), "catalog rebuilt");
    Ok(catalog)
}

fn read_duration(path: &Path) -> Option<std::time::Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
