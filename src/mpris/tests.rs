use super::*;
use std::sync::mpsc;
use std::time::Duration;
use zvariant::ObjectPath;

fn make_metadata() -> TrackMetadata {
    TrackMetadata {
        index: 7,
        url: "file:///usr/share/anoise/sounds/rain.ogg".to_string(),
        title: "Rain".to_string(),
        album: "Ambient Noise".to_string(),
        artist: vec!["ANoise".to_string()],
        art_url: "file:///usr/share/anoise/sounds/rain.png".to_string(),
        length: Some(Duration::from_micros(1_234_567)),
    }
}

fn handle() -> (MprisHandle, Arc<Mutex<SharedState>>, mpsc::Receiver<Change>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<Change>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    (handle, state, notify_rx)
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let (handle, state, notify_rx) = handle();

    handle.set_track_metadata(Some(&make_metadata()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Rain"));
        assert_eq!(s.artist, vec!["ANoise".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Ambient Noise"));
        assert!(s.url.as_deref().unwrap().ends_with("/sounds/rain.ogg"));
        assert!(s.art_url.as_deref().unwrap().ends_with("/sounds/rain.png"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }
    assert!(matches!(notify_rx.try_recv(), Ok(Change::Metadata)));

    handle.set_track_metadata(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.art_url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn empty_art_url_is_not_exported() {
    let (handle, state, _rx) = handle();
    let mut m = make_metadata();
    m.art_url = String::new();
    handle.set_track_metadata(Some(&m));
    assert_eq!(state.lock().unwrap().art_url, None);
}

#[test]
fn indicator_sink_signals_update_playback_and_notify() {
    let (mut handle, state, notify_rx) = handle();

    handle.playing();
    assert_eq!(state.lock().unwrap().playback, PlaybackState::Playing);
    handle.paused();
    assert_eq!(state.lock().unwrap().playback, PlaybackState::Paused);
    handle.stopped();
    assert_eq!(state.lock().unwrap().playback, PlaybackState::Stopped);

    let changes: Vec<Change> = notify_rx.try_iter().collect();
    assert_eq!(changes.len(), 3);
    assert!(changes.iter().all(|c| matches!(c, Change::Playback)));
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<AppEvent>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = PlaybackState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = PlaybackState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
    assert_eq!(iface.loop_status(), "Track");
}

#[test]
fn player_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let iface = PlayerIface { tx, state };

    iface.next();
    iface.previous();
    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();

    let got: Vec<AppEvent> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            AppEvent::Control(ControlCmd::Next),
            AppEvent::Control(ControlCmd::Previous),
            AppEvent::Control(ControlCmd::Play),
            AppEvent::Control(ControlCmd::Pause),
            AppEvent::Control(ControlCmd::PlayPause),
            AppEvent::Control(ControlCmd::Stop),
        ]
    );
}

#[test]
fn root_iface_advertises_capabilities_and_forwards_raise() {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let root = RootIface {
        tx,
        identity: "ANoise".to_string(),
        desktop_entry: "anoise".to_string(),
    };

    assert!(!root.can_quit());
    assert!(root.can_raise());
    assert!(!root.has_track_list());
    assert_eq!(root.identity(), "ANoise");
    assert_eq!(root.desktop_entry(), "anoise");

    root.quit();
    assert!(rx.try_recv().is_err());
    root.raise();
    assert_eq!(rx.try_recv().unwrap(), AppEvent::Control(ControlCmd::Raise));
}

#[test]
fn player_capabilities() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<AppEvent>();
    let iface = PlayerIface { tx, state };
    assert!(iface.can_control());
    assert!(iface.can_play());
    assert!(iface.can_pause());
    assert!(iface.can_go_next());
    assert!(iface.can_go_previous());
    assert!(!iface.can_seek());
    assert_eq!(iface.rate(), 1.0);
    assert_eq!(iface.minimum_rate(), 1.0);
    assert_eq!(iface.maximum_rate(), 1.0);
    assert_eq!(iface.volume(), 1.0);
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<AppEvent>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    assert!(iface.metadata().is_empty());

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Rain".to_string());
        s.artist = vec!["ANoise".to_string()];
        s.album = Some("Ambient Noise".to_string());
        s.url = Some("file:///tmp/rain.ogg".to_string());
        s.art_url = Some("file:///tmp/rain.png".to_string());
        s.length_micros = Some(42);
        s.track_id = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1")
            .ok()
            .map(|p| p.into());
    }

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}
