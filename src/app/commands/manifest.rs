//! Add a single manifest of one kind to the chart in the working directory.

use std::io::Write;
use std::path::Path;

use log::debug;

use crate::app::AppContext;
use crate::app::services::file_planner;
use crate::domain::chart::layout;
use crate::domain::templates::placeholder;
use crate::domain::{AppError, ChartName, ManifestKind, ModuleName};
use crate::ports::{ChartLoader, ScaffoldStore, TemplateCatalog};

use super::scaffold::{ScaffoldOutcome, run_plan};

/// Input of a manifest run.
#[derive(Debug, Clone)]
pub struct ManifestRequest<'a> {
    pub kind: ManifestKind,
    /// Module the manifest belongs to.
    pub name: &'a str,
    pub chart_root: &'a Path,
}

pub fn execute<S, T, L>(
    ctx: &AppContext<S, T>,
    loader: &L,
    request: &ManifestRequest<'_>,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError>
where
    S: ScaffoldStore,
    T: TemplateCatalog,
    L: ChartLoader,
{
    let module = ModuleName::new(request.name)?;

    let chart = loader.load(request.chart_root)?;
    let chart_name = ChartName::new(chart.name())?;
    if !ctx.store().exists(&layout::values_file(request.chart_root)) {
        return Err(AppError::ChartNotFound(request.chart_root.to_path_buf()));
    }
    debug!("Adding {} manifest for module {} to chart {}", request.kind, module, chart_name);

    // Every manifest includes the module helpers.
    let helpers = request
        .chart_root
        .join(placeholder::resolve_path(ManifestKind::Helpers.path_template(), &module));
    let include_helpers = !ctx.store().exists(&helpers);

    let plan = file_planner::plan_manifest(
        ctx.templates(),
        request.chart_root,
        request.kind,
        &module,
        include_helpers,
    );
    run_plan(ctx.store(), plan, layout::templates_dir(request.chart_root), diagnostics)
}
