//! Events delivered to the runtime event loop.
//!
//! Every thread that needs the player to act (the bus service, the audio
//! thread, the directory watcher and one-shot timers) posts one of these
//! instead of touching player state directly.

use crate::indicator::ControlCmd;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// A control call from the sound menu or media keys.
    Control(ControlCmd),
    /// The engine ran out of audio for the sound loaded at this generation.
    TrackFinished(u64),
    /// A sound directory changed on disk.
    RescanRequested,
    /// The sleep timer expired.
    SleepTimerFired,
    /// The startup delay elapsed and the remembered sound may start.
    Autoplay,
}
