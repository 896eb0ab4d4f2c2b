#![forbid(unsafe_code)]

//! Playback engine: owns the single media element and (at most) one
//! adaptive-playback session, and drives the transition machine from a
//! command queue.
//!
//! The engine runs as a task fed by an ordered command channel, so lifecycle
//! signals are processed strictly in emission order with no locking. Retry
//! timers re-enter the queue as [`Cmd::ReloadDue`]; a per-binding generation
//! plus a cancellation token guarantees a stale timer can never fire against
//! a superseded source.

use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use skene_source::StreamSource;

use crate::error::{PlaybackError, PlaybackResult};
use crate::events::{PlaybackEvent, RecoveryKind};
use crate::machine::{Effect, Machine};
use crate::signals::{MediaSignal, SessionSignal};
use crate::traits::media::MediaElement;
use crate::traits::session::{AdaptiveSession, AdaptiveSessionFactory};
use crate::types::{PlaybackState, RetryPolicy};

/// Configuration for [`PlaybackEngine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Reconnection pacing for adaptive sources.
    pub retry: RetryPolicy,
    /// Capacity of the events broadcast channel.
    pub events_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            events_capacity: 32,
        }
    }
}

impl EngineConfig {
    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the events channel capacity.
    #[must_use]
    pub fn with_events_capacity(mut self, capacity: usize) -> Self {
        self.events_capacity = capacity.max(1);
        self
    }
}

enum Cmd {
    Bind(StreamSource),
    Unbind,
    Media(MediaSignal),
    Session(SessionSignal),
    ManualRetry,
    ReloadDue { generation: u64, attempt: u32 },
    Play,
    Pause,
    SetVolume(f32),
}

/// Handle to the engine task.
///
/// Dropping every handle shuts the task down and releases the bound source,
/// its session, and any pending retry timer.
#[derive(Clone)]
pub struct PlaybackEngine {
    cmd_tx: mpsc::UnboundedSender<Cmd>,
    events_tx: broadcast::Sender<PlaybackEvent>,
    state_rx: watch::Receiver<PlaybackState>,
}

impl PlaybackEngine {
    /// Spawn the engine over an injected media element and, optionally, an
    /// adaptive-session factory. Without a factory, adaptive sources fall
    /// back to direct element binding.
    #[must_use]
    pub fn new(
        media: Box<dyn MediaElement>,
        factory: Option<Box<dyn AdaptiveSessionFactory>>,
        config: EngineConfig,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (events_tx, _) = broadcast::channel(config.events_capacity);
        let (state_tx, state_rx) = watch::channel(PlaybackState::Idle);

        let task = EngineTask {
            machine: Machine::new(config.retry),
            media,
            factory,
            session: None,
            source: None,
            generation: 0,
            reload_cancel: CancellationToken::new(),
            cmd_tx: cmd_tx.clone(),
            events_tx: events_tx.clone(),
            state_tx,
        };
        tokio::spawn(task.run(cmd_rx));

        Self {
            cmd_tx,
            events_tx,
            state_rx,
        }
    }

    /// Bind a classified source, fully unbinding any previous one first.
    pub fn bind(&self, source: StreamSource) -> PlaybackResult<()> {
        self.send(Cmd::Bind(source))
    }

    /// Tear down the current source, session, subscriptions, and timers.
    pub fn unbind(&self) -> PlaybackResult<()> {
        self.send(Cmd::Unbind)
    }

    /// Feed a media-element lifecycle signal into the queue.
    pub fn media_signal(&self, signal: MediaSignal) -> PlaybackResult<()> {
        self.send(Cmd::Media(signal))
    }

    /// Feed an adaptive-session signal into the queue.
    pub fn session_signal(&self, signal: SessionSignal) -> PlaybackResult<()> {
        self.send(Cmd::Session(signal))
    }

    /// User-triggered retry: resets bookkeeping and re-binds the current
    /// source. No-op when nothing is bound.
    pub fn manual_retry(&self) -> PlaybackResult<()> {
        self.send(Cmd::ManualRetry)
    }

    pub fn play(&self) -> PlaybackResult<()> {
        self.send(Cmd::Play)
    }

    pub fn pause(&self) -> PlaybackResult<()> {
        self.send(Cmd::Pause)
    }

    pub fn set_volume(&self, volume: f32) -> PlaybackResult<()> {
        self.send(Cmd::SetVolume(volume.clamp(0.0, 1.0)))
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state_rx.borrow().clone()
    }

    /// Watch channel over lifecycle state, for awaiting transitions.
    #[must_use]
    pub fn state_watch(&self) -> watch::Receiver<PlaybackState> {
        self.state_rx.clone()
    }

    /// Subscribe to engine events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events_tx.subscribe()
    }

    fn send(&self, cmd: Cmd) -> PlaybackResult<()> {
        self.cmd_tx.send(cmd).map_err(|_| PlaybackError::EngineClosed)
    }
}

struct EngineTask {
    machine: Machine,
    media: Box<dyn MediaElement>,
    factory: Option<Box<dyn AdaptiveSessionFactory>>,
    session: Option<Box<dyn AdaptiveSession>>,
    source: Option<StreamSource>,
    /// Bumped on every bind/unbind; tags retry timers so a stale firing is
    /// discarded even if it races the cancellation token.
    generation: u64,
    reload_cancel: CancellationToken,
    cmd_tx: mpsc::UnboundedSender<Cmd>,
    events_tx: broadcast::Sender<PlaybackEvent>,
    state_tx: watch::Sender<PlaybackState>,
}

impl EngineTask {
    async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<Cmd>) {
        while let Some(cmd) = cmd_rx.recv().await {
            self.handle(cmd);
        }
        // All handles dropped: release everything exactly once.
        self.teardown();
        debug!("playback engine task finished");
    }

    fn handle(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Bind(source) => self.bind(source),
            Cmd::Unbind => {
                self.teardown();
                self.sync_state();
            }
            Cmd::Media(signal) => {
                if let MediaSignal::MetadataReady { width, height } = signal {
                    self.publish(PlaybackEvent::Dimensions { width, height });
                }
                let effects = self.machine.on_media(&signal);
                self.sync_state();
                self.run_effects(effects);
            }
            Cmd::Session(signal) => {
                let effects = self.machine.on_session(&signal);
                self.sync_state();
                self.run_effects(effects);
            }
            Cmd::ManualRetry => match self.source.clone() {
                Some(source) => {
                    info!(uri = %source.uri, "manual retry requested");
                    self.bind(source);
                }
                None => debug!("manual retry ignored: no source bound"),
            },
            Cmd::ReloadDue { generation, attempt } => {
                if generation != self.generation {
                    debug!(attempt, "discarding stale reload timer");
                    return;
                }
                let effects = self.machine.on_reload_due(attempt);
                self.run_effects(effects);
            }
            Cmd::Play => self.media.request_play(),
            Cmd::Pause => self.media.pause(),
            Cmd::SetVolume(volume) => self.media.set_volume(volume),
        }
    }

    fn bind(&mut self, source: StreamSource) {
        // A previous binding is fully released before the new one starts: no
        // leaked sessions, no duplicate subscriptions, no live timers.
        self.teardown();

        info!(uri = %source.uri, kind = ?source.kind, "binding source");
        let native = self.media.supports_native_manifests();
        let effects = self.machine.bind(source.kind, native);
        self.publish(PlaybackEvent::Bound {
            uri: source.uri.clone(),
            kind: source.kind,
        });
        self.source = Some(source);
        self.sync_state();
        self.run_effects(effects);
    }

    /// Release the current binding. Safe to call on every exit path; each
    /// resource is taken out of its slot so release happens at most once.
    fn teardown(&mut self) {
        self.generation += 1;
        self.reload_cancel.cancel();
        self.reload_cancel = CancellationToken::new();

        if let Some(session) = self.session.take() {
            session.destroy();
        }
        if self.source.take().is_some() {
            self.media.clear_source();
            self.publish(PlaybackEvent::Unbound);
        }
        self.machine.unbind();
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        let Some(uri) = self.source.as_ref().map(|s| s.uri.clone()) else {
            return;
        };

        match effect {
            Effect::BindNative => {
                self.media.set_source(&uri);
                self.media.load();
            }
            Effect::StartSession => match &self.factory {
                Some(factory) => {
                    let session = factory.create();
                    session.load(&uri);
                    self.session = Some(session);
                }
                None => {
                    // Same fallback a browser without an adaptive library
                    // uses: hand the manifest straight to the element.
                    warn!(uri = %uri, "no adaptive session factory; binding manifest directly");
                    self.media.set_source(&uri);
                    self.media.load();
                }
            },
            Effect::RequestPlay => self.media.request_play(),
            Effect::ScheduleReload { attempt, delay } => {
                info!(attempt, ?delay, "scheduling stream reload");
                self.publish(PlaybackEvent::RetryScheduled { attempt, delay });
                let token = self.reload_cancel.clone();
                let tx = self.cmd_tx.clone();
                let generation = self.generation;
                tokio::spawn(async move {
                    tokio::select! {
                        () = token.cancelled() => {}
                        () = tokio::time::sleep(delay) => {
                            let _ = tx.send(Cmd::ReloadDue { generation, attempt });
                        }
                    }
                });
            }
            Effect::IssueReload { attempt } => {
                info!(attempt, "reloading stream");
                self.publish(PlaybackEvent::ReloadIssued { attempt });
                self.media.load();
            }
            Effect::RestartNetworkLoad => {
                self.publish(PlaybackEvent::RecoveryStarted {
                    kind: RecoveryKind::NetworkRestart,
                });
                if let Some(session) = &self.session {
                    session.restart_network_load();
                }
            }
            Effect::RecoverMediaDecode => {
                self.publish(PlaybackEvent::RecoveryStarted {
                    kind: RecoveryKind::MediaDecode,
                });
                if let Some(session) = &self.session {
                    session.recover_media_decode();
                }
            }
        }
    }

    /// Publish a state change when the machine moved since the last sync.
    fn sync_state(&mut self) {
        let current = self.machine.state().clone();
        let changed = self.state_tx.send_if_modified(|published| {
            if *published == current {
                false
            } else {
                *published = current.clone();
                true
            }
        });
        if changed {
            debug!(state = ?current, "playback state changed");
            self.publish(PlaybackEvent::StateChanged { state: current });
        }
    }

    fn publish(&self, event: PlaybackEvent) {
        // No subscribers is fine; events are best-effort.
        let _ = self.events_tx.send(event);
    }
}
