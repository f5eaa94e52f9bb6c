use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::cursor::{Cursor, CursorStore};
use crate::error::AppError;
use crate::event::AppEvent;
use crate::library::scan_dirs;
use crate::lock::{SingletonLock, acquire_singleton_lock};
use crate::watch::{DirWatcher, watch_dirs};

/// Outcome of claiming the single-instance lock.
pub enum Instance {
    /// This process owns the lock until it is dropped.
    Primary(SingletonLock),
    /// Another process holds the lock.
    Secondary,
    /// The lock could not be checked; run without it.
    Unlocked(io::Error),
}

/// Claim `name` without writing anything to stdout or stderr.
pub fn claim_instance(name: &str) -> Instance {
    match acquire_singleton_lock(name) {
        Ok(Some(lock)) => Instance::Primary(lock),
        Ok(None) => Instance::Secondary,
        Err(e) => Instance::Unlocked(e),
    }
}

/// Log to stderr, filtered by `ANOISE_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("ANOISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Scan the library and restore the remembered sound.
///
/// Nothing is written to the cursor file when no sounds are found.
pub fn load_cursor(dirs: &[PathBuf], settings: &config::Settings) -> Result<Cursor, AppError> {
    let catalog = scan_dirs(dirs, &settings.library)?;
    info!(sounds = catalog.len(), "noise library ready");
    Ok(Cursor::load(catalog, CursorStore::new(settings.cursor_file())))
}

/// Watch the sound directories unless disabled. `None` means the catalog must
/// be refreshed by hand.
pub fn start_watcher(
    dirs: &[PathBuf],
    settings: &config::Settings,
    tx: Sender<AppEvent>,
) -> Option<DirWatcher> {
    if !settings.library.watch {
        return None;
    }
    match watch_dirs(dirs, &settings.library, tx) {
        Ok(w) => w,
        Err(e) => {
            warn!(error = %e, "cannot watch sound directories");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings_with_cursor(file: PathBuf) -> config::Settings {
        let mut settings = config::Settings::default();
        settings.state.cursor_file = Some(file);
        settings
    }

    #[test]
    fn empty_library_is_fatal_and_leaves_no_cursor_file() {
        let sounds = tempdir().unwrap();
        fs::write(sounds.path().join("notes.txt"), b"x").unwrap();
        let state = tempdir().unwrap();
        let file = state.path().join("anoise").join("anoise.cfg");

        let err = load_cursor(
            &[sounds.path().to_path_buf(), sounds.path().join("missing")],
            &settings_with_cursor(file.clone()),
        )
        .err()
        .unwrap();

        assert!(matches!(err, AppError::NoTracks));
        assert_eq!(err.to_string(), "no noise files found");
        assert!(!file.exists());
        assert!(!state.path().join("anoise").exists());
    }

    #[test]
    fn load_cursor_restores_remembered_sound() {
        let sounds = tempdir().unwrap();
        for f in ["fire.ogg", "rain.ogg", "sea.ogg"] {
            fs::write(sounds.path().join(f), b"x").unwrap();
        }
        let state = tempdir().unwrap();
        let file = state.path().join("anoise.cfg");
        fs::write(&file, "2\n").unwrap();

        let cursor = load_cursor(&[sounds.path().to_path_buf()], &settings_with_cursor(file)).unwrap();
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current().name, "Sea");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn second_claim_is_secondary_until_the_first_is_dropped() {
        let name = format!("anoise_test_claim_{}", std::process::id());

        let first = claim_instance(&name);
        assert!(matches!(first, Instance::Primary(_)));
        assert!(matches!(claim_instance(&name), Instance::Secondary));

        drop(first);
        assert!(matches!(claim_instance(&name), Instance::Primary(_)));
    }
}
