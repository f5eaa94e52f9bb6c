//! The sound-menu side of the player.
//!
//! Inbound control calls arrive as `ControlCmd`s and are routed by an
//! `Indicator` to whatever implements `MediaControls`. Outbound, the player
//! reports through an `IndicatorSink`: the current sound's metadata and the
//! playing/paused/stopped status.

use std::time::Duration;

/// Control calls the sound menu (or a media key) can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Previous,
    Raise,
}

/// Callbacks a player provides to the indicator.
pub trait MediaControls {
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn next(&mut self);
    fn previous(&mut self);
    fn raise(&mut self);
}

/// Routes control calls to a `MediaControls` implementation.
pub struct Indicator<C> {
    controls: C,
}

impl<C: MediaControls> Indicator<C> {
    pub fn new(controls: C) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn dispatch(&mut self, cmd: ControlCmd) {
        match cmd {
            ControlCmd::Play => self.controls.play(),
            ControlCmd::Pause => self.controls.pause(),
            ControlCmd::PlayPause => {
                if self.controls.is_playing() {
                    self.controls.pause();
                } else {
                    self.controls.play();
                }
            }
            ControlCmd::Stop => self.controls.stop(),
            ControlCmd::Next => self.controls.next(),
            ControlCmd::Previous => self.controls.previous(),
            ControlCmd::Raise => self.controls.raise(),
        }
    }
}

/// What the sound menu shows for the current sound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Position in the catalog, used to build the `mpris:trackid` path.
    pub index: usize,
    pub url: String,
    pub title: String,
    pub album: String,
    pub artist: Vec<String>,
    pub art_url: String,
    pub length: Option<Duration>,
}

/// Where the player reports state changes.
pub trait IndicatorSink {
    fn metadata_changed(&mut self, metadata: &TrackMetadata);
    fn playing(&mut self);
    fn paused(&mut self);
    fn stopped(&mut self);
}
