#![forbid(unsafe_code)]

use std::time::Duration;

/// Why playback ended up in [`PlaybackState::Error`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailureKind {
    /// Camera transport protocol; needs external conversion before playback.
    Unsupported,
    /// Adaptive stream kept failing past the retry ceiling.
    RetriesExhausted,
    /// A progressive file failed to load. Not retried: files are not
    /// transiently unavailable the way a live manifest is.
    LoadFailed,
    /// Fatal adaptive-session error outside the network/media recovery policy.
    Session { detail: String },
}

/// Playback lifecycle state, owned exclusively by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    /// Non-terminal, informational. The stream is stalled waiting for data.
    Buffering,
    Error { kind: FailureKind, retries: u32 },
}

impl PlaybackState {
    /// Overlays are only interactive (and rendered) while the stream has
    /// produced at least one readiness signal and has not failed.
    #[must_use]
    pub fn overlays_eligible(&self) -> bool {
        matches!(
            self,
            Self::Ready | Self::Playing | Self::Paused | Self::Buffering
        )
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Reconnection bookkeeping for the currently bound source.
///
/// `attempt` resets to 0 whenever a new source is bound or playback reaches
/// `Ready`; `active` drops once the ceiling is hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryState {
    pub attempt: u32,
    pub max_attempts: u32,
    pub active: bool,
}

impl RetryState {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            active: true,
        }
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
        self.active = true;
    }

    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }
}

/// Retry pacing: bounded attempts with progressive backoff.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before reload attempt `attempt` (1-based): `attempt * base_delay`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 1000)]
    #[case(2, 2000)]
    #[case(3, 3000)]
    #[case(5, 5000)]
    fn backoff_is_proportional_to_attempt(#[case] attempt: u32, #[case] millis: u64) {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_for_attempt(attempt),
            Duration::from_millis(millis)
        );
    }

    #[test]
    fn retry_ceiling() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(0));
        assert!(policy.should_retry(4));
        assert!(!policy.should_retry(5));
    }

    #[test]
    fn eligibility_follows_phase() {
        assert!(!PlaybackState::Idle.overlays_eligible());
        assert!(!PlaybackState::Loading.overlays_eligible());
        assert!(PlaybackState::Ready.overlays_eligible());
        assert!(PlaybackState::Buffering.overlays_eligible());
        assert!(
            !PlaybackState::Error {
                kind: FailureKind::LoadFailed,
                retries: 0
            }
            .overlays_eligible()
        );
    }
}
