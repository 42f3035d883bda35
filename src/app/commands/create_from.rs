//! Create a chart by cloning a starter chart.

use std::path::{Path, PathBuf};

use log::debug;

use crate::app::AppContext;
use crate::app::services::chart_cloner;
use crate::domain::{AppError, ChartDefaults, ChartName};
use crate::ports::{ChartLoader, ChartSaver, ScaffoldStore, TemplateCatalog};

/// Input of a clone run.
#[derive(Debug, Clone)]
pub struct CreateFromRequest<'a> {
    pub name: &'a str,
    pub parent_dir: &'a Path,
    /// Absolute path, or a name under `starters_dir`.
    pub starter: &'a str,
    pub starters_dir: Option<&'a Path>,
}

/// Result of a clone run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFromOutcome {
    pub chart_root: PathBuf,
    pub starter: PathBuf,
}

/// Locate a starter: absolute paths are used as given, anything else is
/// looked up in `starters_dir`.
pub fn resolve_starter(starter: &str, starters_dir: Option<&Path>) -> Result<PathBuf, AppError> {
    let path = Path::new(starter);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let dir = starters_dir.ok_or_else(|| {
        AppError::config_error(format!(
            "cannot resolve starter '{}': no starters directory configured",
            starter
        ))
    })?;
    Ok(dir.join(path))
}

pub fn execute<S, T, L, V>(
    ctx: &AppContext<S, T>,
    loader: &L,
    saver: &V,
    request: &CreateFromRequest<'_>,
    defaults: &ChartDefaults,
) -> Result<CreateFromOutcome, AppError>
where
    S: ScaffoldStore,
    T: TemplateCatalog,
    L: ChartLoader,
    V: ChartSaver,
{
    let chart_name = ChartName::new(request.name)?;

    if !ctx.store().is_dir(request.parent_dir) {
        return Err(AppError::NotADirectory(request.parent_dir.to_path_buf()));
    }
    let chart_root = request.parent_dir.join(chart_name.as_str());
    if ctx.store().exists(&chart_root) && !ctx.store().is_dir(&chart_root) {
        return Err(AppError::ChartPathOccupied(chart_root));
    }

    let starter = resolve_starter(request.starter, request.starters_dir)?;
    let source = loader.load(&starter)?;
    debug!("Cloning starter {} ({}) into {}", source.name(), starter.display(), chart_root.display());

    let chart = chart_cloner::clone_chart(source, &chart_name, defaults)?;
    saver.save(&chart, &chart_root)?;

    Ok(CreateFromOutcome { chart_root, starter })
}
