#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;

pub use model::{
    Catalog, CatalogError, CatalogGroup, CatalogItem, CompetencyLevel, GroupId, ProgressError,
    ProgressMap, Recommendation, Section,
};
pub use scoring::{AssessmentSummary, GroupProgress, SectionScore};
