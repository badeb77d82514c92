use std::sync::Arc;

use assess_core::model::{Catalog, ProgressMap, Section};
use assess_core::scoring::{self, AssessmentSummary, GroupProgress, SectionScore};

use crate::error::ProgressStoreError;
use crate::progress_store::ProgressStore;

/// A catalog paired with the progress loaded for it.
///
/// This is what a screen holds between user actions: reads go through the
/// aggregator, writes through the store.
#[derive(Clone)]
pub struct AssessmentSession {
    catalog: Arc<Catalog>,
    store: ProgressStore,
    progress: ProgressMap,
}

impl AssessmentSession {
    /// Load progress for `catalog` from `store`.
    pub async fn open(catalog: Arc<Catalog>, store: ProgressStore) -> Self {
        let progress = store.load(&catalog).await;
        Self {
            catalog,
            store,
            progress,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    /// Flip one item and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the group or index does not exist.
    pub async fn toggle(&mut self, group: &str, index: usize) -> Result<bool, ProgressStoreError> {
        self.store.toggle(&mut self.progress, group, index).await
    }

    /// Clear stored progress, then reload so every item reads unchecked.
    pub async fn reset(&mut self) {
        self.store.reset().await;
        self.progress = self.store.load(&self.catalog).await;
    }

    #[must_use]
    pub fn group_progress(&self, group: &str) -> GroupProgress {
        scoring::group_progress(&self.progress, group)
    }

    #[must_use]
    pub fn total_progress(&self) -> GroupProgress {
        scoring::total_progress(&self.progress)
    }

    /// Item progress over one section's groups only.
    #[must_use]
    pub fn section_progress(&self, section: Section) -> GroupProgress {
        self.catalog
            .section(section)
            .map(|group| self.group_progress(group.id().as_str()))
            .fold(GroupProgress::default(), |acc, next| acc + next)
    }

    #[must_use]
    pub fn section_score(&self, section: Section) -> SectionScore {
        let ids = self.catalog.section_group_ids(section);
        scoring::section_score(&self.catalog, &self.progress, &ids)
    }

    #[must_use]
    pub fn summary(&self) -> AssessmentSummary {
        scoring::assessment_summary(&self.catalog, &self.progress)
    }
}
