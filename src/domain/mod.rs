pub mod chart;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod plan;
pub mod templates;

pub use chart::{Chart, ChartFile, ChartMetadata};
pub use config::{ChartDefaults, ScaffoldConfig};
pub use error::AppError;
pub use identifiers::{ChartName, ModuleName, NameError};
pub use plan::{GeneratedFile, PlanEntry, ScaffoldMode, ScaffoldPlan};
pub use templates::{ManifestKind, TemplateEntry};
