use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::config;

/// Command line flags. They override the config file and environment.
#[derive(Debug, Parser)]
#[command(name = "anoise", version, about = "Ambient noise player for the desktop sound menu")]
pub struct Cli {
    /// Pause playback after this many minutes.
    #[arg(long, value_name = "MINUTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub sleep: Option<u64>,

    /// Do not start playing on launch.
    #[arg(long)]
    pub no_autoplay: bool,

    /// Extra directory to look for sounds in (repeatable).
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,
}

impl Cli {
    pub fn apply(&self, settings: &mut config::Settings) {
        if let Some(minutes) = self.sleep {
            settings.playback.sleep_minutes = Some(minutes);
        }
        if self.no_autoplay {
            settings.playback.autoplay = false;
        }
        settings.library.extra_dirs.extend(self.dirs.iter().cloned());
    }
}

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                warn!(%msg, "invalid config, using defaults");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            warn!(error = %e, "failed to load config, using defaults");
            config::Settings::default()
        }
    }
}
