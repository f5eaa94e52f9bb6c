use std::{env, path::PathBuf};

use super::schema::Settings;

/// `Settings::load` layers environment variables (prefix `ANOISE__`) over an
/// optional config file over struct defaults.
impl Settings {
    /// Load settings from the optional config file and environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ANOISE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject settings the player cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.extensions must name at least one extension".to_string());
        }
        if self.indicator.desktop_entry.trim().is_empty() {
            return Err("indicator.desktop_entry must not be empty".to_string());
        }
        if self.playback.sleep_minutes == Some(0) {
            return Err("playback.sleep_minutes must be >= 1".to_string());
        }
        Ok(())
    }

    /// Cursor file location: the configured one, or `~/.config/anoise/anoise.cfg`.
    pub fn cursor_file(&self) -> Option<PathBuf> {
        self.state
            .cursor_file
            .clone()
            .or_else(|| config_home().map(|d| d.join("anoise").join("anoise.cfg")))
    }
}

/// Resolve the config path from `ANOISE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ANOISE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/anoise/config.toml`
/// or `~/.config/anoise/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    config_home().map(|d| d.join("anoise").join("config.toml"))
}

fn config_home() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    }
}
