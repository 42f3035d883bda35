mod chart_repository;
mod scaffold_store;
mod template_catalog;

pub use chart_repository::{ChartLoader, ChartSaver};
pub use scaffold_store::ScaffoldStore;
pub use template_catalog::TemplateCatalog;
