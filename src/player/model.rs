//! Player model types: `Player` and `PlaybackState`.

use std::process::Command;
use std::thread;

use tracing::{debug, info, warn};

use crate::audio::Engine;
use crate::config::IndicatorSettings;
use crate::cursor::Cursor;
use crate::indicator::{IndicatorSink, MediaControls, TrackMetadata};
use crate::library::Catalog;

/// The playback state mirrored to the sound menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// MPRIS `PlaybackStatus` value.
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }
}

pub struct Player<E, S> {
    cursor: Cursor,
    engine: E,
    sink: S,
    state: PlaybackState,
    indicator: IndicatorSettings,
}

impl<E: Engine, S: IndicatorSink> Player<E, S> {
    /// Load the current sound into the engine (stopped) and publish its metadata.
    pub fn new(cursor: Cursor, mut engine: E, sink: S, indicator: IndicatorSettings) -> Self {
        engine.set_uri(&cursor.current().path);
        let mut player = Self {
            cursor,
            engine,
            sink,
            state: PlaybackState::Stopped,
            indicator,
        };
        player.publish_metadata();
        player.sink.stopped();
        player
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[cfg(test)]
    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn metadata(&self) -> TrackMetadata {
        let track = self.cursor.current();
        TrackMetadata {
            index: self.cursor.index(),
            url: track.url(),
            title: track.name.clone(),
            album: self.indicator.album.clone(),
            artist: vec![self.indicator.artist.clone()],
            art_url: track.art_url(self.indicator.fallback_icon.as_deref()),
            length: track.duration,
        }
    }

    fn publish_metadata(&mut self) {
        let metadata = self.metadata();
        self.sink.metadata_changed(&metadata);
    }

    /// Point the engine at the current sound, resuming if we were playing.
    fn redirect(&mut self) {
        self.engine.set_uri(&self.cursor.current().path);
        info!(sound = %self.cursor.current().name, index = self.cursor.index(), "current sound");
        self.publish_metadata();
        if self.state == PlaybackState::Playing {
            self.engine.play();
            self.sink.playing();
        }
    }

    /// The engine reached the end of the sound loaded at `generation`: start it over.
    ///
    /// A notice for an older load (queued before a skip) is ignored.
    pub fn track_finished(&mut self, generation: u64) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if generation != self.engine.generation() {
            debug!(generation, current = self.engine.generation(), "stale end of sound");
            return;
        }
        debug!(sound = %self.cursor.current().name, "looping sound");
        self.engine.set_uri(&self.cursor.current().path);
        self.engine.play();
    }

    /// Adopt a rebuilt catalog, keeping the current sound when it still exists.
    pub fn rescan(&mut self, catalog: Catalog) {
        if self.cursor.reconcile(catalog) {
            self.redirect();
        } else {
            self.publish_metadata();
        }
    }
}

impl<E: Engine, S: IndicatorSink> MediaControls for Player<E, S> {
    fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    fn play(&mut self) {
        self.engine.play();
        self.state = PlaybackState::Playing;
        self.publish_metadata();
        self.sink.playing();
    }

    fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.engine.pause();
        self.state = PlaybackState::Paused;
        self.sink.paused();
    }

    fn stop(&mut self) {
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.sink.stopped();
    }

    fn next(&mut self) {
        self.cursor.next();
        self.redirect();
    }

    fn previous(&mut self) {
        self.cursor.previous();
        self.redirect();
    }

    fn raise(&mut self) {
        let Some(url) = self.indicator.raise_url.as_deref() else {
            debug!("raise requested, nothing to show");
            return;
        };
        match Command::new("xdg-open").arg(url).spawn() {
            Ok(mut child) => {
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => warn!(%url, error = %e, "cannot open page"),
        }
    }
}
