use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use tracing::warn;

use crate::audio::AudioEngine;
use crate::error::AppError;
use crate::event::AppEvent;
use crate::indicator::Indicator;
use crate::library::candidate_dirs;
use crate::player::Player;

mod event_loop;
mod settings;
mod startup;

pub use event_loop::EventLoop;
pub use settings::Cli;
use startup::Instance;

/// Name of the abstract socket that keeps a second launch from starting.
const LOCK_NAME: &str = "anoise_running";

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Claimed before logging or settings so a second launch stays silent.
    let instance = startup::claim_instance(LOCK_NAME);
    if let Instance::Secondary = instance {
        return Ok(());
    }

    startup::init_logging();
    let _lock = match instance {
        Instance::Primary(lock) => Some(lock),
        Instance::Unlocked(e) => {
            warn!(error = %e, "cannot take single-instance lock");
            None
        }
        Instance::Secondary => None,
    };

    let mut settings = settings::load_settings();
    cli.apply(&mut settings);

    let dirs = candidate_dirs(&settings.library);
    let cursor = startup::load_cursor(&dirs, &settings)?;

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let engine = AudioEngine::spawn(tx.clone())?;
    let mpris = crate::mpris::spawn_mpris(tx.clone(), &settings.indicator);
    let player = Player::new(cursor, engine, mpris, settings.indicator.clone());

    let watcher = startup::start_watcher(&dirs, &settings, tx.clone());
    let rescan_on_skip = !watcher.as_ref().is_some_and(|w| w.covers(&dirs));

    let mut event_loop = EventLoop::new(
        Indicator::new(player),
        tx,
        dirs,
        settings.library.clone(),
        rescan_on_skip,
    );

    if settings.playback.autoplay {
        event_loop.schedule_autoplay(Duration::from_millis(settings.playback.autoplay_delay_ms));
    }
    if let Some(minutes) = settings.playback.sleep_minutes {
        event_loop.set_sleep_timer(Some(Duration::from_secs(minutes * 60)));
    }

    let result = event_loop.run(&rx);
    drop(watcher);
    result
}
