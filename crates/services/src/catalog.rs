use std::path::Path;

use assess_core::model::Catalog;
use tracing::{error, info};

use crate::error::CatalogLoadError;

/// Read and parse the catalog document at `path`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub async fn try_load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogLoadError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let catalog = Catalog::from_json(&text)?;
    info!(
        path = %path.display(),
        groups = catalog.groups().len(),
        items = catalog.item_count(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Like `try_load_catalog`, but a failure is logged and yields an empty
/// catalog so screens render zero items instead of failing.
pub async fn load_catalog(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    match try_load_catalog(path).await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to load assessment catalog");
            Catalog::empty()
        }
    }
}
