mod catalog;
mod competency;
mod ids;
mod progress;
mod section;

pub use catalog::{Catalog, CatalogError, CatalogGroup, CatalogItem};
pub use competency::{CompetencyLevel, Recommendation};
pub use ids::GroupId;
pub use progress::{DecodedProgress, ProgressError, ProgressMap};
pub use section::Section;
