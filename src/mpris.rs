//! MPRIS2 service on the session bus.
//!
//! Bus method calls are forwarded to the event loop as `AppEvent::Control`.
//! The player reports back through `MprisHandle`, which keeps a snapshot of
//! the exported properties and asks the bus thread to emit
//! `PropertiesChanged` whenever something changes.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use async_io::block_on;
use tracing::{debug, info, warn};
use zbus::{Connection, interface};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::config::IndicatorSettings;
use crate::event::AppEvent;
use crate::indicator::{ControlCmd, IndicatorSink, TrackMetadata};
use crate::player::PlaybackState;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    track_id: Option<OwnedObjectPath>,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
}

/// Which property group changed.
#[derive(Debug, Clone, Copy)]
enum Change {
    Metadata,
    Playback,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<Change>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
        let _ = self.notify.send(Change::Playback);
    }

    pub fn set_track_metadata(&self, metadata: Option<&TrackMetadata>) {
        if let Ok(mut s) = self.state.lock() {
            match metadata {
                Some(m) => {
                    s.track_id = OwnedObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", m.index)).ok();
                    s.title = Some(m.title.clone());
                    s.artist = m.artist.clone();
                    s.album = Some(m.album.clone());
                    s.url = Some(m.url.clone());
                    s.art_url = Some(m.art_url.clone()).filter(|u| !u.is_empty());
                    s.length_micros = m.length.and_then(|d| i64::try_from(d.as_micros()).ok());
                }
                None => {
                    s.track_id = None;
                    s.title = None;
                    s.artist.clear();
                    s.album = None;
                    s.url = None;
                    s.art_url = None;
                    s.length_micros = None;
                }
            }
        }
        let _ = self.notify.send(Change::Metadata);
    }
}

impl IndicatorSink for MprisHandle {
    fn metadata_changed(&mut self, metadata: &TrackMetadata) {
        self.set_track_metadata(Some(metadata));
    }

    fn playing(&mut self) {
        self.set_playback(PlaybackState::Playing);
    }

    fn paused(&mut self) {
        self.set_playback(PlaybackState::Paused);
    }

    fn stopped(&mut self) {
        self.set_playback(PlaybackState::Stopped);
    }
}

struct RootIface {
    tx: Sender<AppEvent>,
    identity: String,
    desktop_entry: String,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        let _ = self.tx.send(AppEvent::Control(ControlCmd::Raise));
    }

    fn quit(&self) {
        // CanQuit is false; the player lives as long as the session.
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        &self.identity
    }

    #[zbus(property)]
    fn desktop_entry(&self) -> &str {
        &self.desktop_entry
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        ["audio/ogg", "audio/mpeg", "audio/x-wav", "audio/webm"]
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}

struct PlayerIface {
    tx: Sender<AppEvent>,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn send(&self, cmd: ControlCmd) {
        let _ = self.tx.send(AppEvent::Control(cmd));
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.send(ControlCmd::Next);
    }

    fn previous(&self) {
        self.send(ControlCmd::Previous);
    }

    fn play(&self) {
        self.send(ControlCmd::Play);
    }

    fn pause(&self) {
        self.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        self.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        s.playback.as_str()
    }

    /// Sounds always repeat.
    #[zbus(property)]
    fn loop_status(&self) -> &str {
        "Track"
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut put = |key: &str, value: Value<'_>| {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        };

        if let Some(id) = &s.track_id {
            put("mpris:trackid", Value::from(id.clone().into_inner()));
        }
        if let Some(title) = &s.title {
            put("xesam:title", Value::from(title.as_str()));
        }
        if !s.artist.is_empty() {
            put("xesam:artist", Value::from(s.artist.clone()));
        }
        if let Some(album) = &s.album {
            put("xesam:album", Value::from(album.as_str()));
        }
        if let Some(url) = &s.url {
            put("xesam:url", Value::from(url.as_str()));
        }
        if let Some(art) = &s.art_url {
            put("mpris:artUrl", Value::from(art.as_str()));
        }
        if let Some(len) = s.length_micros {
            put("mpris:length", Value::from(len));
        }
        map
    }
}

async fn serve(
    tx: Sender<AppEvent>,
    state: Arc<Mutex<SharedState>>,
    identity: String,
    desktop_entry: String,
) -> zbus::Result<Connection> {
    let connection = Connection::session().await?;
    let object_server = connection.object_server();

    let bus_name = format!("org.mpris.MediaPlayer2.{desktop_entry}");
    object_server
        .at(
            OBJECT_PATH,
            RootIface {
                tx: tx.clone(),
                identity,
                desktop_entry,
            },
        )
        .await?;
    object_server.at(OBJECT_PATH, PlayerIface { tx, state }).await?;

    connection.request_name(bus_name.as_str()).await?;
    info!(name = %bus_name, "sound menu service registered");
    Ok(connection)
}

async fn emit(connection: &Connection, change: Change) -> zbus::Result<()> {
    let iface_ref = connection
        .object_server()
        .interface::<_, PlayerIface>(OBJECT_PATH)
        .await?;
    let iface = iface_ref.get().await;
    let emitter = iface_ref.signal_emitter();
    match change {
        Change::Metadata => iface.metadata_changed(emitter).await,
        Change::Playback => iface.playback_status_changed(emitter).await,
    }
}

/// Register the MPRIS service on a background thread.
///
/// Bus failures are logged and leave the player running without a sound menu.
pub fn spawn_mpris(tx: Sender<AppEvent>, settings: &IndicatorSettings) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<Change>();

    let state_for_thread = state.clone();
    let identity = settings.identity.clone();
    let desktop_entry = settings.desktop_entry.clone();
    thread::spawn(move || {
        let connection = match block_on(serve(tx, state_for_thread, identity, desktop_entry)) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "sound menu unavailable");
                return;
            }
        };

        // Runs until every `MprisHandle` sender is gone.
        for change in notify_rx {
            if let Err(e) = block_on(emit(&connection, change)) {
                debug!(?change, error = %e, "cannot emit PropertiesChanged");
            }
        }
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

#[cfg(test)]
mod tests;
