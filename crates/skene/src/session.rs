#![forbid(unsafe_code)]

//! One studio surface: a playback engine, the overlay set, and the gesture
//! controller, stitched to a unified event bus.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use skene_events::{Event, EventBus, OverlayEvent};
use skene_overlay::{
    GeometryCommit, GestureKind, InteractionController, OverlayDraft, OverlayError, OverlayId,
    OverlayNode, OverlayPatch, OverlayRecord, OverlayStore, render,
};
use skene_playback::{
    FailureKind, MediaSignal, PlaybackEngine, PlaybackError, PlaybackState, SessionSignal,
    traits::{media::MediaElement, session::AdaptiveSessionFactory},
};
use skene_source::{ConversionService, ConvertedStream, SourceError, resolve};

use crate::SessionConfig;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// A live-stream surface: the single playback engine plus its overlay set.
///
/// The session holds the local overlay cache and selection, drives the
/// gesture controller against the current playback phase, and forwards
/// engine events onto the unified bus. Must be created on a tokio runtime.
pub struct StudioSession {
    engine: PlaybackEngine,
    store: Arc<dyn OverlayStore>,
    bus: EventBus,
    overlays: Vec<OverlayRecord>,
    controller: InteractionController,
    selected: Option<OverlayId>,
    broken_images: HashSet<String>,
}

impl StudioSession {
    #[must_use]
    pub fn new(
        media: Box<dyn MediaElement>,
        factory: Option<Box<dyn AdaptiveSessionFactory>>,
        store: Arc<dyn OverlayStore>,
        config: SessionConfig,
    ) -> Self {
        let engine = PlaybackEngine::new(media, factory, config.engine);
        let bus = EventBus::new(config.bus_capacity);
        spawn_forwarder(engine.subscribe(), bus.clone());

        Self {
            engine,
            store,
            bus,
            overlays: Vec::new(),
            controller: InteractionController::new(),
            selected: None,
            broken_images: HashSet::new(),
        }
    }

    // ── Playback ────────────────────────────────────────────────────────

    /// Classify `uri` and bind it, fully releasing any previous source.
    pub fn attach(&self, uri: &str) -> Result<(), SessionError> {
        self.engine.bind(resolve(uri))?;
        Ok(())
    }

    /// Convert a camera transport URI through the external service, then
    /// bind the manifest it hands back.
    pub async fn attach_camera(
        &self,
        camera_uri: &str,
        conversion: &dyn ConversionService,
    ) -> Result<ConvertedStream, SessionError> {
        let converted = conversion.convert(camera_uri).await?;
        debug!(stream = %converted.stream_id, "camera stream converted");
        self.engine.bind(resolve(&converted.manifest_uri))?;
        Ok(converted)
    }

    /// Tear down the bound source and release all gesture bindings.
    pub fn detach(&mut self) -> Result<(), SessionError> {
        self.controller.teardown();
        self.engine.unbind()?;
        Ok(())
    }

    pub fn media_signal(&self, signal: MediaSignal) -> Result<(), SessionError> {
        self.engine.media_signal(signal)?;
        Ok(())
    }

    pub fn session_signal(&self, signal: SessionSignal) -> Result<(), SessionError> {
        self.engine.session_signal(signal)?;
        Ok(())
    }

    /// User-facing retry affordance; resets reconnection bookkeeping.
    pub fn retry(&self) -> Result<(), SessionError> {
        self.engine.manual_retry()?;
        Ok(())
    }

    pub fn play(&self) -> Result<(), SessionError> {
        self.engine.play()?;
        Ok(())
    }

    pub fn pause(&self) -> Result<(), SessionError> {
        self.engine.pause()?;
        Ok(())
    }

    pub fn set_volume(&self, volume: f32) -> Result<(), SessionError> {
        self.engine.set_volume(volume)?;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    /// Status line for the host chrome.
    #[must_use]
    pub fn status_label(&self) -> String {
        match self.engine.state() {
            PlaybackState::Loading | PlaybackState::Buffering => "Connecting…".to_string(),
            PlaybackState::Ready | PlaybackState::Playing | PlaybackState::Paused => {
                "LIVE".to_string()
            }
            PlaybackState::Error { kind, retries } => match kind {
                FailureKind::Unsupported => "Unsupported stream protocol".to_string(),
                FailureKind::RetriesExhausted => {
                    format!("Stream unavailable after {retries} attempts")
                }
                FailureKind::LoadFailed => "Failed to load stream".to_string(),
                FailureKind::Session { detail } => format!("Stream error: {detail}"),
                _ => "Stream error".to_string(),
            },
            _ => "Offline".to_string(),
        }
    }

    // ── Overlays ────────────────────────────────────────────────────────

    /// Replace the local overlay cache from the store.
    pub async fn refresh_overlays(&mut self) -> Result<(), SessionError> {
        self.overlays = self.store.list().await?;
        self.sync_interactions();
        Ok(())
    }

    #[must_use]
    pub fn overlays(&self) -> &[OverlayRecord] {
        &self.overlays
    }

    pub async fn create_overlay(
        &mut self,
        draft: OverlayDraft,
    ) -> Result<OverlayRecord, SessionError> {
        let record = self.store.create(draft).await?;
        self.overlays.push(record.clone());
        self.sync_interactions();
        self.bus.publish(OverlayEvent::Created {
            id: record.id.clone(),
        });
        Ok(record)
    }

    pub async fn update_overlay(
        &mut self,
        id: &OverlayId,
        patch: &OverlayPatch,
    ) -> Result<OverlayRecord, SessionError> {
        let record = self.store.update(id, patch).await?;
        if let Some(local) = self.overlays.iter_mut().find(|r| r.id == *id) {
            *local = record.clone();
        }
        self.bus.publish(OverlayEvent::Updated { id: id.clone() });
        Ok(record)
    }

    pub async fn delete_overlay(&mut self, id: &OverlayId) -> Result<(), SessionError> {
        self.store.delete(id).await?;
        self.overlays.retain(|r| r.id != *id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.sync_interactions();
        self.bus.publish(OverlayEvent::Deleted { id: id.clone() });
        Ok(())
    }

    /// Change the selected overlay; `None` clears the selection.
    pub fn select(&mut self, id: Option<OverlayId>) {
        if self.selected == id {
            return;
        }
        self.selected = id.clone();
        self.bus.publish(OverlayEvent::SelectionChanged { id });
    }

    #[must_use]
    pub fn selected(&self) -> Option<&OverlayId> {
        self.selected.as_ref()
    }

    // ── Gestures ────────────────────────────────────────────────────────

    /// Reconcile gesture bindings with the current overlay set and playback
    /// phase. Call after observing a playback state change.
    pub fn sync_interactions(&mut self) {
        let state = self.engine.state();
        self.controller.sync_bindings(&self.overlays, &state);
    }

    pub fn begin_gesture(&mut self, id: &OverlayId, kind: GestureKind) -> bool {
        self.sync_interactions();
        self.controller.begin(id, kind)
    }

    pub fn pointer_move(&mut self, id: &OverlayId, dx: f64, dy: f64) {
        self.controller.pointer_move(id, dx, dy);
    }

    /// End a gesture: fold the delta into committed geometry, apply it
    /// locally at once, and persist to the store fire-and-forget. A store
    /// failure keeps the optimistic local state.
    pub fn end_gesture(&mut self, id: &OverlayId) -> Option<GeometryCommit> {
        let record = self.overlays.iter_mut().find(|r| r.id == *id)?;
        let commit = self.controller.end(record)?;
        let patch = commit.patch();
        record.apply(&patch);

        self.bus.publish(OverlayEvent::GeometryCommitted {
            id: commit.overlay_id.clone(),
            position: commit.position,
            size: commit.size,
        });

        let store = Arc::clone(&self.store);
        let bus = self.bus.clone();
        let overlay_id = commit.overlay_id.clone();
        tokio::spawn(async move {
            if let Err(error) = store.update(&overlay_id, &patch).await {
                warn!(overlay = %overlay_id, %error, "geometry update rejected; keeping local state");
                bus.publish(OverlayEvent::CommitRejected { id: overlay_id });
            }
        });
        Some(commit)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Mark an image overlay asset as failed to load; its node renders
    /// hidden until the asset recovers.
    pub fn mark_image_broken(&mut self, uri: impl Into<String>) {
        self.broken_images.insert(uri.into());
    }

    pub fn mark_image_recovered(&mut self, uri: &str) {
        self.broken_images.remove(uri);
    }

    /// Project the overlay set into draw order for the current frame.
    #[must_use]
    pub fn render(&self) -> Vec<OverlayNode> {
        render(
            &self.overlays,
            self.selected.as_ref(),
            &self.controller.live_deltas(),
            &self.engine.state(),
            &self.broken_images,
        )
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Subscribe to the unified event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Clone of the unified bus, for components that publish directly.
    #[must_use]
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }
}

/// Forward engine events onto the unified bus until the engine closes.
fn spawn_forwarder(
    mut rx: broadcast::Receiver<skene_playback::PlaybackEvent>,
    bus: EventBus,
) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => bus.publish(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event forwarding lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("event forwarder finished");
    });
}
