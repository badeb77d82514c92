#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod progress_store;
pub mod session;

pub use assess_core::scoring;

pub use app_services::AppServices;
pub use catalog::{load_catalog, try_load_catalog};
pub use error::{AppServicesError, CatalogLoadError, ProgressStoreError};
pub use progress_store::{PROGRESS_KEY, ProgressStore};
pub use session::AssessmentSession;
