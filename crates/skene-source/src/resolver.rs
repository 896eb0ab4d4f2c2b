#![forbid(unsafe_code)]

use url::Url;

/// Playback strategy derived from a URI. A closed set: every URI falls
/// into exactly one of these three strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Progressive file (MP4, WebM, etc.) playable directly by a media element.
    NativeFile,
    /// Manifest-described adaptive stream (`.m3u8`).
    AdaptiveManifest,
    /// Camera transport scheme a media element cannot play. The caller must
    /// surface a "needs external conversion" error and not attempt playback.
    UnsupportedProtocol,
}

/// A classified media source.
///
/// `kind` is a pure function of `uri`; call [`resolve`] again whenever the
/// URI changes instead of caching a kind across distinct URIs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSource {
    pub uri: String,
    pub kind: SourceKind,
}

impl StreamSource {
    pub fn new(uri: impl Into<String>) -> Self {
        resolve(&uri.into())
    }
}

const MANIFEST_EXT: &str = ".m3u8";
const CAMERA_SCHEMES: &[&str] = &["rtsp", "rtsps"];

/// Classify a URI into a [`StreamSource`].
///
/// Classification rules, in priority order:
///
/// 1. path ending in `.m3u8` (query/fragment tolerated) → [`SourceKind::AdaptiveManifest`]
/// 2. `rtsp://` / `rtsps://` scheme → [`SourceKind::UnsupportedProtocol`]
/// 3. anything else → [`SourceKind::NativeFile`]
///
/// Pure classification; no I/O, nothing cached.
#[must_use]
pub fn resolve(uri: &str) -> StreamSource {
    let kind = classify(uri.trim());
    StreamSource {
        uri: uri.to_string(),
        kind,
    }
}

fn classify(uri: &str) -> SourceKind {
    // Absolute URIs get proper parsing; server-relative paths like
    // `/hls/stream_1/index.m3u8` fall back to raw string inspection.
    match Url::parse(uri) {
        Ok(parsed) => {
            if parsed.path().ends_with(MANIFEST_EXT) {
                SourceKind::AdaptiveManifest
            } else if CAMERA_SCHEMES.contains(&parsed.scheme()) {
                SourceKind::UnsupportedProtocol
            } else {
                SourceKind::NativeFile
            }
        }
        Err(_) => {
            let lower = uri.to_ascii_lowercase();
            if path_portion(&lower).ends_with(MANIFEST_EXT) {
                SourceKind::AdaptiveManifest
            } else if CAMERA_SCHEMES.iter().any(|s| lower.starts_with(&format!("{s}://"))) {
                SourceKind::UnsupportedProtocol
            } else {
                SourceKind::NativeFile
            }
        }
    }
}

/// Strip query string and fragment from a raw (unparseable) URI.
fn path_portion(uri: &str) -> &str {
    let end = uri.find(['?', '#']).unwrap_or(uri.len());
    &uri[..end]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://cdn.example.com/live/stream.m3u8", SourceKind::AdaptiveManifest)]
    #[case("https://cdn.example.com/live/stream.m3u8?token=abc", SourceKind::AdaptiveManifest)]
    #[case("/api/stream/hls/stream_1/stream.m3u8", SourceKind::AdaptiveManifest)]
    #[case("rtsp://camera.local:554/h264/ch1.m3u8", SourceKind::AdaptiveManifest)]
    #[case("rtsp://camera.local:554/h264/ch1", SourceKind::UnsupportedProtocol)]
    #[case("rtsps://camera.local/secure", SourceKind::UnsupportedProtocol)]
    #[case("https://example.com/clip.mp4", SourceKind::NativeFile)]
    #[case("https://example.com/clip.webm", SourceKind::NativeFile)]
    #[case("/media/local.mp4", SourceKind::NativeFile)]
    #[case("https://example.com/download?file=a.m3u8", SourceKind::NativeFile)]
    fn classifies_uris(#[case] uri: &str, #[case] expected: SourceKind) {
        assert_eq!(resolve(uri).kind, expected);
    }

    #[test]
    fn preserves_original_uri() {
        let src = resolve("  https://example.com/clip.mp4");
        assert_eq!(src.uri, "  https://example.com/clip.mp4");
        assert_eq!(src.kind, SourceKind::NativeFile);
    }

    #[test]
    fn recomputes_per_uri() {
        assert_eq!(
            StreamSource::new("https://a/1.m3u8").kind,
            SourceKind::AdaptiveManifest
        );
        assert_eq!(StreamSource::new("https://a/1.mp4").kind, SourceKind::NativeFile);
    }
}
