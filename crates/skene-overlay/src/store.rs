#![forbid(unsafe_code)]

//! Boundary trait for whatever owns overlay documents.

use async_trait::async_trait;

use crate::error::OverlayResult;
use crate::model::{OverlayDraft, OverlayId, OverlayPatch, OverlayRecord};

/// The external overlay store. The core treats it as the single source of
/// truth for records; geometry commits are sent here as partial updates.
#[async_trait]
pub trait OverlayStore: Send + Sync {
    async fn list(&self) -> OverlayResult<Vec<OverlayRecord>>;

    /// Persist a draft; the store assigns the id.
    async fn create(&self, draft: OverlayDraft) -> OverlayResult<OverlayRecord>;

    /// Apply a partial update and return the updated record.
    async fn update(&self, id: &OverlayId, patch: &OverlayPatch) -> OverlayResult<OverlayRecord>;

    async fn delete(&self, id: &OverlayId) -> OverlayResult<()>;
}
