use std::{env, path::PathBuf};

use crate::config::LibrarySettings;

/// Ordered list of directories that may hold sounds.
///
/// Bundled sounds come first, then `~/ANoise`, `~/.ANoise`, the XDG data
/// directory (`$XDG_DATA_HOME/anoise` or `~/.local/share/anoise`) and finally
/// any configured extra directories. Directories are not checked for existence.
pub fn candidate_dirs(settings: &LibrarySettings) -> Vec<PathBuf> {
    let home = env::var_os("HOME").map(PathBuf::from);

    let mut dirs = vec![settings.bundled_dir.clone()];

    if let Some(home) = &home {
        dirs.push(home.join("ANoise"));
        dirs.push(home.join(".ANoise"));
    }

    let data_home = match env::var_os("XDG_DATA_HOME") {
        Some(xdg) if !xdg.is_empty() => Some(PathBuf::from(xdg)),
        _ => home.map(|h| h.join(".local").join("share")),
    };
    if let Some(data_home) = data_home {
        dirs.push(data_home.join("anoise"));
    }

    dirs.extend(settings.extra_dirs.iter().cloned());
    dirs
}
