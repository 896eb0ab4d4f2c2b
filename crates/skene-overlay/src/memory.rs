#![forbid(unsafe_code)]

//! In-process overlay store, used when no external store is wired up and as
//! the store double in session tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{OverlayError, OverlayResult};
use crate::model::{OverlayDraft, OverlayId, OverlayPatch, OverlayRecord};
use crate::store::OverlayStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<OverlayRecord>,
    next_id: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> OverlayResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| OverlayError::Store("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl OverlayStore for MemoryStore {
    async fn list(&self) -> OverlayResult<Vec<OverlayRecord>> {
        Ok(self.lock()?.records.clone())
    }

    async fn create(&self, draft: OverlayDraft) -> OverlayResult<OverlayRecord> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let record = OverlayRecord {
            id: OverlayId(format!("mem-{}", inner.next_id)),
            kind: draft.kind,
            content: draft.content,
            style: draft.style,
            position: draft.position,
            size: draft.size,
            z_index: draft.z_index,
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &OverlayId, patch: &OverlayPatch) -> OverlayResult<OverlayRecord> {
        let mut inner = self.lock()?;
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| OverlayError::NotFound(id.clone()))?;
        record.apply(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: &OverlayId) -> OverlayResult<()> {
        let mut inner = self.lock()?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != *id);
        if inner.records.len() == before {
            return Err(OverlayError::NotFound(id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Point, Size};

    use super::*;

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.create(OverlayDraft::default()).await.unwrap();
        let b = store.create(OverlayDraft::default()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_is_partial() {
        let store = MemoryStore::new();
        let created = store
            .create(OverlayDraft {
                content: "caption".to_string(),
                ..OverlayDraft::default()
            })
            .await
            .unwrap();

        let updated = store
            .update(
                &created.id,
                &OverlayPatch::geometry(Point::new(65.0, 45.0), Some(Size::new(210.0, 70.0))),
            )
            .await
            .unwrap();
        assert_eq!(updated.position, Point::new(65.0, 45.0));
        assert_eq!(updated.size, Size::new(210.0, 70.0));
        assert_eq!(updated.content, "caption");
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete(&OverlayId::from("nope")).await.unwrap_err();
        assert!(matches!(err, OverlayError::NotFound(_)));

        let err = store
            .update(&OverlayId::from("nope"), &OverlayPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OverlayError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::new();
        let created = store.create(OverlayDraft::default()).await.unwrap();
        store.delete(&created.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
