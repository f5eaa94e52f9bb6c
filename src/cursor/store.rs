use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

/// One-line text file holding the current index.
#[derive(Clone, Debug, Default)]
pub struct CursorStore {
    path: Option<PathBuf>,
}

impl CursorStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Read the stored index. `None` if the file is missing or does not parse.
    pub fn load(&self) -> Option<usize> {
        let path = self.path.as_ref()?;
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no saved sound index");
                return None;
            }
        };
        let line = contents.lines().next()?.trim();
        match line.parse() {
            Ok(i) => Some(i),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable sound index");
                None
            }
        }
    }

    /// Write `index`, creating the parent directory if needed. Errors are logged.
    pub fn save(&self, index: usize) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(dir = %parent.display(), error = %e, "cannot create config directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, index.to_string()) {
            warn!(path = %path.display(), error = %e, "cannot save sound index");
        }
    }
}
