//! Create a chart, or add a module to the chart in the working directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::AppContext;
use crate::app::services::file_planner;
use crate::app::services::file_writer::{self, ValuesUpdate};
use crate::domain::chart::layout;
use crate::domain::{AppError, ChartDefaults, ChartName, ModuleName, ScaffoldMode, ScaffoldPlan};
use crate::ports::{ScaffoldStore, TemplateCatalog};

/// Input of a scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest<'a> {
    /// Chart name in new-chart mode, module name in add-module mode.
    pub name: &'a str,
    /// Directory the new chart directory is created in.
    pub parent_dir: &'a Path,
    /// Chart extended in add-module mode.
    pub chart_root: &'a Path,
    /// Whether the caller runs inside a chart. Selects the mode.
    pub inside_chart: bool,
}

/// Result of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub mode: ScaffoldMode,
    /// Chart the files were written into.
    pub chart_root: PathBuf,
    /// New chart directory, or the templates directory the module landed in.
    pub root: PathBuf,
    pub module: ModuleName,
    pub written: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub values: ValuesUpdate,
}

impl ScaffoldOutcome {
    /// Error message of a failed values append.
    pub fn values_append_error(&self) -> Option<&str> {
        match &self.values {
            ValuesUpdate::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub fn execute<S, T>(
    ctx: &AppContext<S, T>,
    request: &ScaffoldRequest<'_>,
    defaults: &ChartDefaults,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError>
where
    S: ScaffoldStore,
    T: TemplateCatalog,
{
    let chart_name = ChartName::new(request.name)?;

    match ScaffoldMode::select(request.inside_chart) {
        ScaffoldMode::NewChart => new_chart(ctx, request.parent_dir, &chart_name, defaults, diagnostics),
        ScaffoldMode::AddModule => {
            let module = ModuleName::new(request.name)?;
            add_module(ctx, request.chart_root, &module, diagnostics)
        }
    }
}

fn new_chart<S, T>(
    ctx: &AppContext<S, T>,
    parent_dir: &Path,
    chart_name: &ChartName,
    defaults: &ChartDefaults,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError>
where
    S: ScaffoldStore,
    T: TemplateCatalog,
{
    let store = ctx.store();
    if !store.is_dir(parent_dir) {
        return Err(AppError::NotADirectory(parent_dir.to_path_buf()));
    }
    let chart_root = parent_dir.join(chart_name.as_str());
    if store.exists(&chart_root) && !store.is_dir(&chart_root) {
        return Err(AppError::ChartPathOccupied(chart_root));
    }

    let plan = file_planner::plan_new_chart(ctx.templates(), &chart_root, chart_name, defaults);
    debug!("Planned {} entries for new chart {}", plan.entries.len(), chart_name);
    run_plan(store, plan, chart_root.clone(), diagnostics)
}

fn add_module<S, T>(
    ctx: &AppContext<S, T>,
    chart_root: &Path,
    module: &ModuleName,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError>
where
    S: ScaffoldStore,
    T: TemplateCatalog,
{
    let plan = file_planner::plan_add_module(ctx.templates(), chart_root, module);
    debug!("Planned {} manifests for module {}", plan.entries.len(), module);
    run_plan(ctx.store(), plan, layout::templates_dir(chart_root), diagnostics)
}

/// Write a plan, then add its module values when it carries a body.
pub(crate) fn run_plan<S: ScaffoldStore + ?Sized>(
    store: &S,
    plan: ScaffoldPlan,
    root: PathBuf,
    diagnostics: &mut dyn Write,
) -> Result<ScaffoldOutcome, AppError> {
    debug_assert!(plan.is_contained(), "plan entry outside {}", plan.chart_root.display());
    let report = file_writer::write_planned(store, &plan.entries, diagnostics)?;

    let values = match &plan.values_body {
        Some(body) => file_writer::append_module_values(
            store,
            &layout::values_file(&plan.chart_root),
            &plan.module,
            body,
            diagnostics,
        ),
        None => ValuesUpdate::Created,
    };

    Ok(ScaffoldOutcome {
        mode: plan.mode,
        chart_root: plan.chart_root,
        root,
        module: plan.module,
        written: report.written,
        overwritten: report.overwritten,
        values,
    })
}
