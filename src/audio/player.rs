use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use tracing::debug;

use crate::error::AppError;
use crate::event::AppEvent;

use super::Engine;
use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// `rodio` output running on its own thread. Dropping it stops playback.
pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    generation: u64,
}

impl AudioEngine {
    /// Open the default output device. End-of-sound notices are posted on `events`.
    pub fn spawn(events: Sender<AppEvent>) -> Result<Self, AppError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let join = spawn_audio_thread(rx, events, ready_tx);

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                join: Some(join),
                generation: 0,
            }),
            Ok(Err(msg)) => {
                let _ = join.join();
                Err(AppError::AudioOutput(msg))
            }
            Err(_) => {
                let _ = join.join();
                Err(AppError::AudioOutput("audio thread exited during startup".to_string()))
            }
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            debug!(cmd = ?e.0, "audio thread is gone");
        }
    }
}

impl Engine for AudioEngine {
    fn set_uri(&mut self, path: &Path) {
        self.generation += 1;
        self.send(AudioCmd::Load(path.to_path_buf(), self.generation));
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
