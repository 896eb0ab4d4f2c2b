#![forbid(unsafe_code)]

use async_trait::async_trait;

use crate::error::SourceResult;

/// Result of handing a camera-stream URI to the conversion service.
///
/// Only `manifest_uri` crosses back into [`resolve`](crate::resolve); the
/// opaque `stream_id` is for external status polling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedStream {
    pub stream_id: String,
    pub manifest_uri: String,
}

/// External RTSP→HLS conversion service.
///
/// Consumed, never implemented here: the service transcodes a camera stream
/// into a manifest the browser-side media element can play. Conversion
/// status is polled by the host, outside this boundary.
#[async_trait]
pub trait ConversionService: Send + Sync {
    async fn convert(&self, camera_uri: &str) -> SourceResult<ConvertedStream>;
}
