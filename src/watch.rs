//! Directory watching.
//!
//! The watcher runs on notify's own thread and never touches the catalog: it
//! only posts `AppEvent::RescanRequested` for the event loop to act on.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, trace};

use crate::config::LibrarySettings;
use crate::event::AppEvent;
use crate::library::is_audio_file;

/// Keeps the OS watches alive; dropping it stops watching.
pub struct DirWatcher {
    _watcher: RecommendedWatcher,
    dirs: Vec<PathBuf>,
}

impl DirWatcher {
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Whether every directory in `dirs` is being watched. A candidate that
    /// did not exist at startup is not, so files added there need a rescan.
    pub fn covers(&self, dirs: &[PathBuf]) -> bool {
        dirs.iter().all(|d| self.dirs.contains(d))
    }
}

/// Whether `event` can change the catalog: an audio file appeared, vanished or was renamed.
fn affects_catalog(event: &Event, settings: &LibrarySettings) -> bool {
    let kind_matters = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    );
    kind_matters && event.paths.iter().any(|p| is_audio_file(p, settings))
}

/// Watch the existing directories in `dirs` (non-recursively).
///
/// Returns `Ok(None)` when none of them exist.
pub fn watch_dirs(
    dirs: &[PathBuf],
    settings: &LibrarySettings,
    tx: Sender<AppEvent>,
) -> notify::Result<Option<DirWatcher>> {
    let existing: Vec<PathBuf> = dirs.iter().filter(|d| d.is_dir()).cloned().collect();
    if existing.is_empty() {
        return Ok(None);
    }

    let filter = settings.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if affects_catalog(&event, &filter) => {
            trace!(paths = ?event.paths, "sound directory changed");
            let _ = tx.send(AppEvent::RescanRequested);
        }
        Ok(_) => {}
        Err(e) => debug!(error = %e, "watch error"),
    })?;

    for dir in &existing {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!(dir = %dir.display(), "watching sound directory");
    }

    Ok(Some(DirWatcher {
        _watcher: watcher,
        dirs: existing,
    }))
}
