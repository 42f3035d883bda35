//! modchart: scaffold Helm charts composed of named modules.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

use std::io::Write;
use std::path::Path;

use adapters::{ChartDirectory, EmbeddedTemplateCatalog, FilesystemScaffoldStore};
use app::AppContext;
use app::commands::create_from::{self, CreateFromRequest};
use app::commands::manifest::{self, ManifestRequest};
use app::commands::scaffold::{self, ScaffoldRequest};
use domain::chart::layout;
use ports::ScaffoldStore;

pub use app::commands::create_from::CreateFromOutcome;
pub use app::commands::scaffold::ScaffoldOutcome;
pub use app::services::file_writer::ValuesUpdate;
pub use domain::{AppError, ManifestKind, ScaffoldMode};

/// Create chart `name` in the current directory, or add module `name` when the
/// current directory already holds a chart.
///
/// Overwrite warnings and values-append failures are written to `diagnostics`.
pub fn create(name: &str, diagnostics: &mut dyn Write) -> Result<ScaffoldOutcome, AppError> {
    let cwd = std::env::current_dir()?;
    create_in(name, &cwd, diagnostics)
}

/// Same as [`create`] with `dir` standing in for the current directory.
pub fn create_in(
    name: &str,
    dir: &Path,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError> {
    let store = FilesystemScaffoldStore::new();
    let config = app::config::load_config(&store)?;
    let inside_chart = store.exists(&layout::values_file(dir));

    let ctx = AppContext::new(store, EmbeddedTemplateCatalog::new());
    let request = ScaffoldRequest { name, parent_dir: dir, chart_root: dir, inside_chart };
    scaffold::execute(&ctx, &request, &config.chart, diagnostics)
}

/// Create chart `name` in the current directory by cloning a starter chart.
///
/// `starter` is an absolute path or the name of a chart in the configured
/// starters directory.
pub fn create_from(name: &str, starter: &str) -> Result<CreateFromOutcome, AppError> {
    let cwd = std::env::current_dir()?;
    create_from_in(name, starter, &cwd)
}

/// Same as [`create_from`] with the chart created under `dir`.
pub fn create_from_in(
    name: &str,
    starter: &str,
    dir: &Path,
) -> Result<CreateFromOutcome, AppError> {
    let store = FilesystemScaffoldStore::new();
    let config = app::config::load_config(&store)?;
    let starters_dir = app::config::starters_dir(&config);

    let ctx = AppContext::new(store, EmbeddedTemplateCatalog::new());
    let charts = ChartDirectory::new();
    let request =
        CreateFromRequest { name, parent_dir: dir, starter, starters_dir: starters_dir.as_deref() };
    create_from::execute(&ctx, &charts, &charts, &request, &config.chart)
}

/// Add a manifest of `kind` for module `name` to the chart in the current
/// directory.
pub fn create_manifest(
    kind: &str,
    name: &str,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError> {
    let cwd = std::env::current_dir()?;
    create_manifest_in(kind, name, &cwd, diagnostics)
}

/// Same as [`create_manifest`] for the chart at `chart_root`.
pub fn create_manifest_in(
    kind: &str,
    name: &str,
    chart_root: &Path,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError> {
    let kind: ManifestKind = kind.parse()?;
    let ctx = AppContext::new(FilesystemScaffoldStore::new(), EmbeddedTemplateCatalog::new());
    let request = ManifestRequest { kind, name, chart_root };
    manifest::execute(&ctx, &ChartDirectory::new(), &request, diagnostics)
}
