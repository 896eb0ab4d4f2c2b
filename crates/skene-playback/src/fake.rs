#![forbid(unsafe_code)]

//! Recording fakes for the media capability traits.
//!
//! Tests move the boxed fake into the engine and keep the shared log handle
//! to assert on the calls the engine made.

use std::sync::{Arc, Mutex};

use crate::traits::media::MediaElement;
use crate::traits::session::{AdaptiveSession, AdaptiveSessionFactory};

#[derive(Debug, Default)]
pub struct MediaLog {
    pub sources: Vec<String>,
    pub clears: u32,
    pub loads: u32,
    pub plays: u32,
    pub pauses: u32,
    pub volumes: Vec<f32>,
}

pub struct FakeMediaElement {
    native_manifests: bool,
    log: Arc<Mutex<MediaLog>>,
}

impl FakeMediaElement {
    #[must_use]
    pub fn new(native_manifests: bool) -> (Self, Arc<Mutex<MediaLog>>) {
        let log = Arc::new(Mutex::new(MediaLog::default()));
        (
            Self {
                native_manifests,
                log: log.clone(),
            },
            log,
        )
    }
}

impl MediaElement for FakeMediaElement {
    fn set_source(&self, uri: &str) {
        self.log.lock().unwrap().sources.push(uri.to_string());
    }

    fn clear_source(&self) {
        self.log.lock().unwrap().clears += 1;
    }

    fn load(&self) {
        self.log.lock().unwrap().loads += 1;
    }

    fn request_play(&self) {
        self.log.lock().unwrap().plays += 1;
    }

    fn pause(&self) {
        self.log.lock().unwrap().pauses += 1;
    }

    fn set_volume(&self, volume: f32) {
        self.log.lock().unwrap().volumes.push(volume);
    }

    fn supports_native_manifests(&self) -> bool {
        self.native_manifests
    }
}

#[derive(Debug, Default)]
pub struct SessionLog {
    pub loads: Vec<String>,
    pub network_restarts: u32,
    pub media_recoveries: u32,
    pub destroys: u32,
}

pub struct FakeAdaptiveSession {
    log: Arc<Mutex<SessionLog>>,
}

impl AdaptiveSession for FakeAdaptiveSession {
    fn load(&self, manifest_uri: &str) {
        self.log.lock().unwrap().loads.push(manifest_uri.to_string());
    }

    fn restart_network_load(&self) {
        self.log.lock().unwrap().network_restarts += 1;
    }

    fn recover_media_decode(&self) {
        self.log.lock().unwrap().media_recoveries += 1;
    }

    fn destroy(&self) {
        self.log.lock().unwrap().destroys += 1;
    }
}

/// Factory whose sessions all record into one shared log.
pub struct FakeSessionFactory {
    log: Arc<Mutex<SessionLog>>,
}

impl FakeSessionFactory {
    #[must_use]
    pub fn new() -> (Self, Arc<Mutex<SessionLog>>) {
        let log = Arc::new(Mutex::new(SessionLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl AdaptiveSessionFactory for FakeSessionFactory {
    fn create(&self) -> Box<dyn AdaptiveSession> {
        Box::new(FakeAdaptiveSession {
            log: self.log.clone(),
        })
    }
}
