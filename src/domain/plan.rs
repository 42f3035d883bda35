//! Planned filesystem changes, computed before anything is written.

use std::path::{Path, PathBuf};

use super::identifiers::ModuleName;

/// A file to be written: absolute path and final content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), content: content.into() }
    }
}

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
    File(GeneratedFile),
    /// Directory created even though no file lands in it.
    Dir(PathBuf),
}

impl PlanEntry {
    pub fn path(&self) -> &Path {
        match self {
            PlanEntry::File(file) => &file.path,
            PlanEntry::Dir(path) => path,
        }
    }
}

/// How a scaffold request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldMode {
    /// Create a whole chart in a fresh directory.
    NewChart,
    /// Add one module to the chart in the working directory.
    AddModule,
}

impl ScaffoldMode {
    /// Pick the mode from whether the caller runs inside a chart.
    pub fn select(inside_chart: bool) -> Self {
        if inside_chart { ScaffoldMode::AddModule } else { ScaffoldMode::NewChart }
    }
}

/// Everything a scaffold run will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub mode: ScaffoldMode,
    /// Chart root the entries live under.
    pub chart_root: PathBuf,
    pub module: ModuleName,
    pub entries: Vec<PlanEntry>,
    /// Module body to add to the existing `values.yaml` (add-module mode
    /// only), as indented entries without the module key.
    pub values_body: Option<String>,
}

impl ScaffoldPlan {
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.entries.iter().filter_map(|entry| match entry {
            PlanEntry::File(file) => Some(file),
            PlanEntry::Dir(_) => None,
        })
    }

    /// Whether every entry stays under the chart root.
    pub fn is_contained(&self) -> bool {
        self.entries.iter().all(|entry| entry.path().starts_with(&self.chart_root))
    }
}
