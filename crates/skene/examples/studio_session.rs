//! Example: drive a studio session end to end against in-process doubles.
//!
//! Demonstrates the top-level `StudioSession` API:
//! - `attach(uri)` classifies the URI and binds it to the engine
//! - media/session signals move the lifecycle to `LIVE`
//! - a drag gesture commits new geometry to the overlay store
//!
//! Run with:
//! ```
//! cargo run -p skene --example studio_session [URI]
//! ```

use std::{env::args, error::Error, sync::Arc};

use skene::overlay::{MemoryStore, OverlayDraft};
use skene::prelude::*;
use skene_playback::fake::{FakeMediaElement, FakeSessionFactory};
use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("skene=debug".parse()?)
                .add_directive("skene_playback=debug".parse()?)
                .add_directive("skene_overlay=debug".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let uri = args()
        .nth(1)
        .unwrap_or_else(|| "https://cdn.example.com/live/stream.m3u8".to_string());

    let (media, _media_log) = FakeMediaElement::new(false);
    let (factory, _session_log) = FakeSessionFactory::new();
    let store = Arc::new(MemoryStore::new());

    let mut session = StudioSession::new(
        Box::new(media),
        Some(Box::new(factory)),
        store,
        SessionConfig::default(),
    );

    // Log everything crossing the unified bus.
    let mut events = session.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(?event);
        }
    });

    info!(%uri, "attaching");
    session.attach(&uri)?;
    session.session_signal(SessionSignal::ManifestParsed)?;
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
    info!(status = %session.status_label(), "stream up");

    let overlay = session
        .create_overlay(OverlayDraft {
            content: "LIVE from the plaza".to_string(),
            ..OverlayDraft::default()
        })
        .await?;

    session.begin_gesture(&overlay.id, GestureKind::Drag);
    session.pointer_move(&overlay.id, 15.0, -5.0);
    let commit = session.end_gesture(&overlay.id);
    info!(?commit, "gesture committed");

    for node in session.render() {
        info!(id = %node.id, frame = ?node.frame, "overlay node");
    }

    session.detach()?;
    Ok(())
}
