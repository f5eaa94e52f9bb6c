use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::event::AppEvent;

use super::sink::create_sink;
use super::types::AudioCmd;

/// How often the thread checks whether the current sink ran dry.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Spawn the audio thread.
///
/// The outcome of opening the output device is reported once on `ready`;
/// on failure the thread exits right away.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AppEvent>,
    ready: SyncSender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when the stream is dropped.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut path: Option<PathBuf> = None;
        let mut generation = 0;
        let mut sink: Option<Sink> = None;
        let mut playing = false;
        let mut finish_reported = false;

        let open = |path: &PathBuf| match create_sink(&stream, path) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot play sound");
                None
            }
        };

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Load(p, g)) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    debug!(path = %p.display(), "loading sound");
                    sink = open(&p);
                    path = Some(p);
                    generation = g;
                    playing = false;
                    finish_reported = false;
                }
                Ok(AudioCmd::Play) => {
                    if sink.is_none() {
                        sink = path.as_ref().and_then(|p| open(p));
                    }
                    if let Some(s) = sink.as_ref() {
                        s.play();
                        playing = true;
                        finish_reported = false;
                    }
                }
                Ok(AudioCmd::Pause) => {
                    if let Some(s) = sink.as_ref() {
                        s.pause();
                    }
                    playing = false;
                }
                Ok(AudioCmd::Stop) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    playing = false;
                }
                Ok(AudioCmd::Quit) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let ran_dry = sink.as_ref().is_some_and(|s| s.empty());
                    if playing && ran_dry && !finish_reported {
                        finish_reported = true;
                        if events.send(AppEvent::TrackFinished(generation)).is_err() {
                            error!("event loop gone, stopping audio thread");
                            break;
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
