use std::path::Path;

use crate::domain::{AppError, Chart};

/// Loads a chart directory into the in-memory model.
pub trait ChartLoader {
    fn load(&self, path: &Path) -> Result<Chart, AppError>;
}

/// Writes a chart into `chart_dir`, creating it as needed.
///
/// Raw `values.yaml` bytes take precedence over the parsed values so comments
/// survive.
pub trait ChartSaver {
    fn save(&self, chart: &Chart, chart_dir: &Path) -> Result<(), AppError>;
}
