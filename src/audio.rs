//! Audio output.
//!
//! The `Engine` trait is the only thing the player needs from audio output:
//! point it at a file, then play, pause or stop. `AudioEngine` implements it
//! with `rodio` on a dedicated thread.

mod player;
mod sink;
mod thread;
mod types;

use std::path::Path;

pub use player::AudioEngine;

/// Playback back-end driven by the player.
pub trait Engine {
    /// Load `path` at position zero, replacing whatever was loaded. Does not start playback.
    fn set_uri(&mut self, path: &Path);
    /// Counter bumped by every `set_uri`. End-of-sound notices carry the
    /// generation they belong to.
    fn generation(&self) -> u64;
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and rewind: the next `play` starts the loaded file from the beginning.
    fn stop(&mut self);
}
