use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use tracing::{debug, info};

use crate::audio::Engine;
use crate::config::LibrarySettings;
use crate::error::AppError;
use crate::event::AppEvent;
use crate::indicator::{ControlCmd, Indicator, IndicatorSink};
use crate::library::scan_dirs;
use crate::player::Player;
use crate::timer::OneShot;

/// The single thread that owns the player.
///
/// Everything else (bus, audio, watcher, timers) reaches the player by
/// posting `AppEvent`s to this loop.
pub struct EventLoop<E: Engine, S: IndicatorSink> {
    indicator: Indicator<Player<E, S>>,
    tx: Sender<AppEvent>,
    dirs: Vec<PathBuf>,
    library: LibrarySettings,
    /// Without a directory watcher the catalog is refreshed before every skip.
    rescan_on_skip: bool,
    sleep_timer: Option<OneShot>,
    autoplay: Option<OneShot>,
}

impl<E: Engine, S: IndicatorSink> EventLoop<E, S> {
    pub fn new(
        indicator: Indicator<Player<E, S>>,
        tx: Sender<AppEvent>,
        dirs: Vec<PathBuf>,
        library: LibrarySettings,
        rescan_on_skip: bool,
    ) -> Self {
        Self {
            indicator,
            tx,
            dirs,
            library,
            rescan_on_skip,
            sleep_timer: None,
            autoplay: None,
        }
    }

    pub fn player(&self) -> &Player<E, S> {
        self.indicator.controls()
    }

    /// Start playback after `delay`, or right away when it is zero.
    pub fn schedule_autoplay(&mut self, delay: Duration) {
        if delay.is_zero() {
            self.indicator.dispatch(ControlCmd::Play);
            return;
        }
        self.autoplay = Some(OneShot::after(delay, self.tx.clone(), AppEvent::Autoplay));
    }

    /// Arm the sleep timer to pause after `after`, replacing any armed one.
    /// `None` disarms it.
    pub fn set_sleep_timer(&mut self, after: Option<Duration>) {
        if let Some(old) = self.sleep_timer.take() {
            old.cancel();
        }
        let Some(after) = after else {
            info!("sleep timer off");
            return;
        };

        let at = chrono::TimeDelta::from_std(after)
            .ok()
            .map(|d| (chrono::Local::now() + d).format("%H:%M").to_string())
            .unwrap_or_default();
        info!(%at, "noise will stop");

        self.sleep_timer = Some(OneShot::after(after, self.tx.clone(), AppEvent::SleepTimerFired));
    }

    pub fn sleep_timer_armed(&self) -> bool {
        self.sleep_timer.is_some()
    }

    /// Process events until every sender is gone.
    ///
    /// Rescan requests that arrive together are folded into one rescan.
    pub fn run(&mut self, rx: &Receiver<AppEvent>) -> Result<(), AppError> {
        while let Ok(first) = rx.recv() {
            let mut rescan = false;
            for event in std::iter::once(first).chain(rx.try_iter()) {
                if event == AppEvent::RescanRequested {
                    rescan = true;
                } else {
                    self.handle(event)?;
                }
            }
            if rescan {
                self.rescan()?;
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) -> Result<(), AppError> {
        debug!(?event, "event");
        match event {
            AppEvent::Control(cmd @ (ControlCmd::Next | ControlCmd::Previous)) => {
                if self.rescan_on_skip {
                    self.rescan()?;
                }
                self.indicator.dispatch(cmd);
            }
            AppEvent::Control(cmd) => self.indicator.dispatch(cmd),
            AppEvent::TrackFinished(generation) => {
                self.indicator.controls_mut().track_finished(generation)
            }
            AppEvent::RescanRequested => self.rescan()?,
            AppEvent::SleepTimerFired => {
                self.sleep_timer = None;
                info!("sleep timer expired");
                self.indicator.dispatch(ControlCmd::Pause);
            }
            AppEvent::Autoplay => {
                self.autoplay = None;
                self.indicator.dispatch(ControlCmd::Play);
            }
        }
        Ok(())
    }

    /// Rebuild the catalog from disk. An empty result is fatal.
    fn rescan(&mut self) -> Result<(), AppError> {
        let catalog = scan_dirs(&self.dirs, &self.library)?;
        self.indicator.controls_mut().rescan(catalog);
        Ok(())
    }
}
