use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/anoise/config.toml` or `~/.config/anoise/config.toml`
///
/// Precedence (highest wins):
/// 1) Command line flags (applied by the runtime)
/// 2) Environment variables (prefix `ANOISE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub indicator: IndicatorSettings,
    pub state: StateSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Sounds shipped with the package.
    pub bundled_dir: PathBuf,
    /// Additional directories scanned after the standard ones.
    pub extra_dirs: Vec<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Watch the sound directories and rebuild the catalog on changes.
    /// When off, the catalog is rebuilt before every next/previous.
    pub watch: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            bundled_dir: PathBuf::from("/usr/share/anoise/sounds"),
            extra_dirs: Vec::new(),
            extensions: vec!["ogg".into(), "mp3".into(), "wav".into(), "webm".into()],
            watch: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing the remembered sound shortly after launch.
    pub autoplay: bool,
    /// Delay before autoplay kicks in (milliseconds).
    pub autoplay_delay_ms: u64,
    /// Pause automatically after this many minutes.
    pub sleep_minutes: Option<u64>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_ms: 1000,
            sleep_minutes: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Player name shown by the sound menu.
    pub identity: String,
    /// Desktop file name (without `.desktop`); also names the bus service.
    pub desktop_entry: String,
    /// Value published as `xesam:album`.
    pub album: String,
    /// Value published as `xesam:artist`.
    pub artist: String,
    /// Art URL used when a sound has no icon next to it.
    pub fallback_icon: Option<String>,
    /// Page opened when the sound menu asks the player to raise itself.
    pub raise_url: Option<String>,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            identity: "ANoise".to_string(),
            desktop_entry: "anoise".to_string(),
            album: "Ambient Noise".to_string(),
            artist: "ANoise".to_string(),
            fallback_icon: None,
            raise_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StateSettings {
    /// Where the current sound index is remembered.
    /// Defaults to `~/.config/anoise/anoise.cfg`.
    pub cursor_file: Option<PathBuf>,
}
