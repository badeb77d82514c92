use std::sync::Arc;

use assess_core::model::{Catalog, ProgressMap};
use storage::repository::KeyValueRepository;
use tracing::{debug, warn};

use crate::error::ProgressStoreError;

/// Storage key holding the serialized progress map.
pub const PROGRESS_KEY: &str = "assessmentCheckedItems";

/// Sole writer of the user's checklist progress.
///
/// Storage failures never reach the caller: reads fall back to an empty map
/// and failed writes are logged, leaving the in-memory map authoritative.
/// A failed read is never followed by a write-back, so progress saved
/// earlier survives a transient outage.
#[derive(Clone)]
pub struct ProgressStore {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
}

impl ProgressStore {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>) -> Self {
        Self::with_key(repo, PROGRESS_KEY)
    }

    #[must_use]
    pub fn with_key(repo: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restore progress and back-fill every catalog group that has no entry.
    ///
    /// A missing, unreadable or malformed stored value is read as empty. The
    /// back-filled map is written back before returning unless the read
    /// itself failed.
    pub async fn load(&self, catalog: &Catalog) -> ProgressMap {
        let (mut map, readable) = match self.read_stored().await {
            Some(map) => (map, true),
            None => (ProgressMap::new(), false),
        };
        let added = map.backfill(catalog);
        debug!(groups = map.len(), added, readable, "loaded progress");
        if readable {
            self.persist(&map).await;
        }
        map
    }

    /// Flip one item of `map` and persist the whole map.
    ///
    /// Returns the item's new state.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError::Progress` if the group has no entry or the
    /// index is out of range. Neither the map nor storage is touched then.
    pub async fn toggle(
        &self,
        map: &mut ProgressMap,
        group: &str,
        index: usize,
    ) -> Result<bool, ProgressStoreError> {
        let checked = map.toggle(group, index)?;
        debug!(group, index, checked, "toggled item");
        self.persist(map).await;
        Ok(checked)
    }

    /// Delete the stored progress. Maps already held by callers are stale
    /// afterwards and should be reloaded.
    pub async fn reset(&self) {
        match self.repo.delete(&self.key).await {
            Ok(()) => debug!(key = %self.key, "cleared progress"),
            Err(err) => warn!(key = %self.key, error = %err, "failed to clear stored progress"),
        }
    }

    /// `None` when the repository could not be read at all.
    async fn read_stored(&self) -> Option<ProgressMap> {
        let text = match self.repo.get(&self.key).await {
            Ok(Some(text)) => text,
            Ok(None) => return Some(ProgressMap::new()),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read stored progress");
                return None;
            }
        };

        match ProgressMap::decode(&text) {
            Ok(decoded) => {
                if !decoded.dropped.is_empty() {
                    warn!(groups = ?decoded.dropped, "dropped malformed progress entries");
                }
                Some(decoded.map)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "discarding stored progress");
                Some(ProgressMap::new())
            }
        }
    }

    async fn persist(&self, map: &ProgressMap) {
        if let Err(err) = self.repo.put(&self.key, &map.encode()).await {
            warn!(key = %self.key, error = %err, "failed to persist progress");
        }
    }
}
