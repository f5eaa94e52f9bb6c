//! Helpers shared by unit tests that touch process-wide state.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::audio::Engine;
use crate::indicator::{IndicatorSink, TrackMetadata};
use crate::library::{Catalog, Track};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialises tests that read or write environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets or removes an environment variable and restores it on drop.
pub struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

/// Catalog of `/a/<lowercase name>.ogg` tracks.
pub fn catalog(names: &[&str]) -> Catalog {
    Catalog::new(
        names
            .iter()
            .map(|n| Track::new(*n, format!("/a/{}.ogg", n.to_lowercase())))
            .collect(),
    )
    .unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetUri(PathBuf),
    Play,
    Pause,
    Stop,
}

/// Engine that records what it was asked to do.
#[derive(Default)]
pub struct FakeEngine {
    pub calls: Vec<EngineCall>,
    pub generation: u64,
}

impl Engine for FakeEngine {
    fn set_uri(&mut self, path: &Path) {
        self.generation += 1;
        self.calls.push(EngineCall::SetUri(path.to_path_buf()));
    }
    fn generation(&self) -> u64 {
        self.generation
    }
    fn play(&mut self) {
        self.calls.push(EngineCall::Play);
    }
    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
    }
    fn stop(&mut self) {
        self.calls.push(EngineCall::Stop);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Metadata(String),
    Playing,
    Paused,
    Stopped,
}

/// Indicator sink that records every signal.
#[derive(Default)]
pub struct FakeSink {
    pub signals: Vec<Signal>,
    pub last: Option<TrackMetadata>,
}

impl IndicatorSink for FakeSink {
    fn metadata_changed(&mut self, metadata: &TrackMetadata) {
        self.signals.push(Signal::Metadata(metadata.title.clone()));
        self.last = Some(metadata.clone());
    }
    fn playing(&mut self) {
        self.signals.push(Signal::Playing);
    }
    fn paused(&mut self) {
        self.signals.push(Signal::Paused);
    }
    fn stopped(&mut self) {
        self.signals.push(Signal::Stopped);
    }
}
