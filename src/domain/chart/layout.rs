//! File and directory names of the generated chart tree.

use std::path::{Path, PathBuf};

/// `Chart.yaml`
pub const CHARTFILE_NAME: &str = "Chart.yaml";
/// `values.yaml`
pub const VALUES_FILE_NAME: &str = "values.yaml";
/// `.helmignore`
pub const IGNORE_FILE_NAME: &str = ".helmignore";
/// Directory holding every template.
pub const TEMPLATES_DIR: &str = "templates";
/// Directory holding chart dependencies.
pub const CHARTS_DIR: &str = "charts";

/// `<chart>/values.yaml`
pub fn values_file(chart_root: &Path) -> PathBuf {
    chart_root.join(VALUES_FILE_NAME)
}

/// `<chart>/templates`
pub fn templates_dir(chart_root: &Path) -> PathBuf {
    chart_root.join(TEMPLATES_DIR)
}

/// `<chart>/charts`
pub fn charts_dir(chart_root: &Path) -> PathBuf {
    chart_root.join(CHARTS_DIR)
}
