//! Player module: the playback state machine behind the sound menu.
//!
//! `Player` ties the cursor, the audio engine and the indicator together and
//! implements `MediaControls`, so every control call ends up here.

mod model;

pub use model::*;
