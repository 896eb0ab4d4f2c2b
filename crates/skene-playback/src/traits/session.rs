#![forbid(unsafe_code)]

/// A runtime adaptive-playback session (hls.js-equivalent).
///
/// Fetches manifest-described segments and feeds them to the media element
/// on platforms without native manifest support. Created per bound source,
/// destroyed exactly once on every exit path.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = AdaptiveSessionMock)
)]
pub trait AdaptiveSession: Send + 'static {
    /// Start loading the manifest and attach to the media element.
    fn load(&self, manifest_uri: &str);

    /// Internal recovery for fatal network errors: restart the network load.
    fn restart_network_load(&self);

    /// Internal recovery for fatal media errors: recover the decode pipeline.
    fn recover_media_decode(&self);

    /// Release the session. Must be safe to call exactly once; the engine
    /// guarantees it is never called twice on the same session.
    fn destroy(&self);
}

/// Capability to construct adaptive sessions.
///
/// Passed into the engine at construction (no runtime library detection).
/// An engine without a factory can still play adaptive sources when the
/// media element supports manifests natively.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = AdaptiveSessionFactoryMock)
)]
pub trait AdaptiveSessionFactory: Send + 'static {
    fn create(&self) -> Box<dyn AdaptiveSession>;
}
