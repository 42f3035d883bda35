pub mod chart_name;
pub mod module_name;
pub mod validation;

pub use chart_name::ChartName;
pub use module_name::ModuleName;
pub use validation::{MAX_NAME_LENGTH, NameError, validate_name};
