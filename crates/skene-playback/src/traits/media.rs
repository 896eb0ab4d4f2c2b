#![forbid(unsafe_code)]

/// The single media element the engine owns.
///
/// Abstracts a `<video>`-equivalent surface: source binding, the reload
/// primitive used by retry, and transport controls. Implementations use
/// interior mutability; the engine holds the only handle.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = MediaElementMock)
)]
pub trait MediaElement: Send + 'static {
    /// Bind a URI directly to the element.
    fn set_source(&self, uri: &str);

    /// Detach any bound URI.
    fn clear_source(&self);

    /// Reload the current source from scratch. This is the retry primitive.
    fn load(&self);

    /// Ask the element to start playing. Autoplay rejection surfaces later
    /// as a `Pause` lifecycle signal, not as an error here.
    fn request_play(&self);

    fn pause(&self);

    fn set_volume(&self, volume: f32);

    /// Whether the platform plays manifest streams natively (Safari-style).
    /// When true, adaptive sources bind directly without a session.
    fn supports_native_manifests(&self) -> bool;
}
