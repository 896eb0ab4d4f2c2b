#![forbid(unsafe_code)]

//! Pure playback transition logic.
//!
//! The machine owns `PlaybackState` + `RetryState` and reacts to discrete
//! signals by mutating state and returning [`Effect`]s for the engine to
//! interpret against the injected capabilities. No I/O happens here, which
//! keeps every transition testable without a media surface or a runtime.

use std::time::Duration;

use skene_source::SourceKind;

use crate::signals::{MediaSignal, SessionErrorKind, SessionSignal};
use crate::types::{FailureKind, PlaybackState, RetryPolicy, RetryState};

/// Side effects requested by a transition, executed by the engine in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
    /// Bind the current URI directly to the media element and load it.
    BindNative,
    /// Construct an adaptive session from the factory and start its load.
    StartSession,
    /// Ask the media element to start playing.
    RequestPlay,
    /// Schedule a paced reload of the media element.
    ScheduleReload { attempt: u32, delay: Duration },
    /// A scheduled reload came due: invoke the element's reload primitive.
    IssueReload { attempt: u32 },
    /// Session-level recovery: restart the network load.
    RestartNetworkLoad,
    /// Session-level recovery: recover the media decode pipeline.
    RecoverMediaDecode,
}

#[derive(Debug)]
pub(crate) struct Machine {
    state: PlaybackState,
    retry: RetryState,
    policy: RetryPolicy,
    kind: Option<SourceKind>,
}

impl Machine {
    pub(crate) fn new(policy: RetryPolicy) -> Self {
        Self {
            state: PlaybackState::Idle,
            retry: RetryState::new(policy.max_attempts),
            policy,
            kind: None,
        }
    }

    pub(crate) fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn retry(&self) -> RetryState {
        self.retry
    }

    /// A new source is bound. Retry bookkeeping always starts fresh.
    pub(crate) fn bind(&mut self, kind: SourceKind, native_manifests: bool) -> Vec<Effect> {
        self.retry.reset();
        self.kind = Some(kind);

        match kind {
            SourceKind::UnsupportedProtocol => {
                self.state = PlaybackState::Error {
                    kind: FailureKind::Unsupported,
                    retries: 0,
                };
                Vec::new()
            }
            SourceKind::AdaptiveManifest => {
                self.state = PlaybackState::Loading;
                if native_manifests {
                    vec![Effect::BindNative]
                } else {
                    vec![Effect::StartSession]
                }
            }
            SourceKind::NativeFile => {
                self.state = PlaybackState::Loading;
                vec![Effect::BindNative]
            }
        }
    }

    /// The source was torn down; state and bookkeeping reset with it.
    pub(crate) fn unbind(&mut self) {
        self.state = PlaybackState::Idle;
        self.retry.reset();
        self.kind = None;
    }

    pub(crate) fn on_media(&mut self, signal: &MediaSignal) -> Vec<Effect> {
        if self.kind.is_none() {
            // A stale signal after unbind. Cancellation should prevent this,
            // but a torn-down machine must stay inert regardless.
            return Vec::new();
        }
        if matches!(
            self.state,
            PlaybackState::Error {
                kind: FailureKind::Unsupported,
                ..
            }
        ) {
            return Vec::new();
        }

        match signal {
            MediaSignal::LoadStart => Vec::new(),
            MediaSignal::MetadataReady { .. } | MediaSignal::CanPlay => {
                // A readiness signal always clears retry bookkeeping, even
                // with error signals still queued behind it.
                self.retry.reset();
                self.state = PlaybackState::Ready;
                Vec::new()
            }
            MediaSignal::Play | MediaSignal::Playing => {
                self.state = PlaybackState::Playing;
                Vec::new()
            }
            MediaSignal::Pause => {
                self.state = PlaybackState::Paused;
                Vec::new()
            }
            MediaSignal::Waiting => {
                self.state = PlaybackState::Buffering;
                Vec::new()
            }
            MediaSignal::Error { .. } => self.on_media_error(),
        }
    }

    fn on_media_error(&mut self) -> Vec<Effect> {
        // Terminal failures stay put: late error signals (from a reload
        // already in flight, say) must not inflate the surfaced count.
        if self.state.is_error() {
            return Vec::new();
        }
        match self.kind {
            Some(SourceKind::AdaptiveManifest) => {
                self.retry.attempt += 1;
                if self.retry.exhausted() {
                    self.retry.active = false;
                    self.state = PlaybackState::Error {
                        kind: FailureKind::RetriesExhausted,
                        retries: self.retry.attempt,
                    };
                    Vec::new()
                } else {
                    self.state = PlaybackState::Loading;
                    vec![Effect::ScheduleReload {
                        attempt: self.retry.attempt,
                        delay: self.policy.delay_for_attempt(self.retry.attempt),
                    }]
                }
            }
            Some(SourceKind::NativeFile) => {
                // A single failure is terminal for progressive files.
                self.state = PlaybackState::Error {
                    kind: FailureKind::LoadFailed,
                    retries: 0,
                };
                Vec::new()
            }
            Some(SourceKind::UnsupportedProtocol) | None => Vec::new(),
        }
    }

    pub(crate) fn on_session(&mut self, signal: &SessionSignal) -> Vec<Effect> {
        if self.kind != Some(SourceKind::AdaptiveManifest) {
            return Vec::new();
        }

        match signal {
            SessionSignal::ManifestParsed => {
                self.retry.reset();
                self.state = PlaybackState::Ready;
                vec![Effect::RequestPlay]
            }
            SessionSignal::FatalError { kind, detail } => match kind {
                SessionErrorKind::Network => vec![Effect::RestartNetworkLoad],
                SessionErrorKind::Media => vec![Effect::RecoverMediaDecode],
                SessionErrorKind::Other => {
                    self.state = PlaybackState::Error {
                        kind: FailureKind::Session {
                            detail: detail.clone(),
                        },
                        retries: self.retry.attempt,
                    };
                    Vec::new()
                }
            },
        }
    }

    /// A scheduled reload fired for `attempt`. Stale firings are filtered by
    /// the engine's cancellation token before they reach the machine.
    pub(crate) fn on_reload_due(&mut self, attempt: u32) -> Vec<Effect> {
        if self.kind != Some(SourceKind::AdaptiveManifest) || !self.retry.active {
            return Vec::new();
        }
        vec![Effect::IssueReload { attempt }]
    }
}
