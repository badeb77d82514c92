use std::path::Path;
use std::sync::Arc;

use assess_core::model::Catalog;
use storage::repository::Storage;

use crate::catalog::load_catalog;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::session::AssessmentSession;

/// Assembles the catalog and progress store a front-end needs.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    progress: ProgressStore,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// A catalog that fails to load is replaced by an empty one.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog_path: impl AsRef<Path>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let catalog = load_catalog(catalog_path).await;
        Ok(Self::from_parts(catalog, &storage))
    }

    /// Build services backed by in-memory storage.
    pub async fn new_in_memory(catalog_path: impl AsRef<Path>) -> Self {
        let catalog = load_catalog(catalog_path).await;
        Self::from_parts(catalog, &Storage::in_memory())
    }

    #[must_use]
    pub fn from_parts(catalog: Catalog, storage: &Storage) -> Self {
        Self {
            catalog: Arc::new(catalog),
            progress: ProgressStore::new(Arc::clone(&storage.values)),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress_store(&self) -> &ProgressStore {
        &self.progress
    }

    /// Load the current progress into a fresh session.
    pub async fn open_session(&self) -> AssessmentSession {
        AssessmentSession::open(self.catalog(), self.progress.clone()).await
    }
}
