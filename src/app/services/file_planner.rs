//! Computes the files a scaffold run writes.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::chart::layout::{self, CHARTFILE_NAME, IGNORE_FILE_NAME, VALUES_FILE_NAME};
use crate::domain::templates::{placeholder, values};
use crate::domain::{
    ChartDefaults, ChartName, GeneratedFile, ManifestKind, ModuleName, PlanEntry, ScaffoldMode,
    ScaffoldPlan,
};
use crate::ports::TemplateCatalog;

const DESCRIPTION_MARKER: &str = "<CHART_DESCRIPTION>";
const VERSION_MARKER: &str = "<CHART_VERSION>";
const APP_VERSION_MARKER: &str = "<APP_VERSION>";

/// Full file set of a new chart rooted at `chart_root`, module `main`.
pub fn plan_new_chart<T: TemplateCatalog + ?Sized>(
    catalog: &T,
    chart_root: &Path,
    chart: &ChartName,
    defaults: &ChartDefaults,
) -> ScaffoldPlan {
    let module = ModuleName::main();

    let chartfile = render_chartfile(catalog.chartfile(), chart, defaults);
    let block = values::module_block(module_fragments(catalog, &ManifestKind::MODULE_KINDS), &module);
    let values_file = values::values_document(catalog.values_header(), chart, &block);

    let mut entries = vec![
        file(chart_root.join(CHARTFILE_NAME), chartfile),
        file(chart_root.join(VALUES_FILE_NAME), values_file),
        file(chart_root.join(IGNORE_FILE_NAME), catalog.ignore_file()),
    ];
    entries.extend(manifest_entries(catalog, chart_root, &module, &ManifestKind::MODULE_KINDS));
    entries.extend(manifest_entries(catalog, chart_root, &module, &[ManifestKind::Notes]));
    entries.push(PlanEntry::Dir(layout::charts_dir(chart_root)));

    ScaffoldPlan {
        mode: ScaffoldMode::NewChart,
        chart_root: chart_root.to_path_buf(),
        module,
        entries,
        values_body: None,
    }
}

/// The seven module manifests of `module` inside an existing chart, plus the
/// values body of the module.
pub fn plan_add_module<T: TemplateCatalog + ?Sized>(
    catalog: &T,
    chart_root: &Path,
    module: &ModuleName,
) -> ScaffoldPlan {
    let kinds = ManifestKind::MODULE_KINDS;
    let body = values::module_body(module_fragments(catalog, &kinds), module);

    ScaffoldPlan {
        mode: ScaffoldMode::AddModule,
        chart_root: chart_root.to_path_buf(),
        module: module.clone(),
        entries: manifest_entries(catalog, chart_root, module, &kinds),
        values_body: Some(body),
    }
}

/// A single manifest of `kind` for `module`; with `include_helpers` the
/// module helpers come along.
pub fn plan_manifest<T: TemplateCatalog + ?Sized>(
    catalog: &T,
    chart_root: &Path,
    kind: ManifestKind,
    module: &ModuleName,
    include_helpers: bool,
) -> ScaffoldPlan {
    let mut kinds = vec![kind];
    if include_helpers && kind != ManifestKind::Helpers {
        kinds.push(ManifestKind::Helpers);
    }
    let body = manifest_values_body(catalog, &kinds, module);

    ScaffoldPlan {
        mode: ScaffoldMode::AddModule,
        chart_root: chart_root.to_path_buf(),
        module: module.clone(),
        entries: manifest_entries(catalog, chart_root, module, &kinds),
        values_body: Some(body),
    }
}

/// Values entries `kinds` need: their own fragments plus every module key
/// their templates read, in the order a full module block lists them.
fn manifest_values_body<T: TemplateCatalog + ?Sized>(
    catalog: &T,
    kinds: &[ManifestKind],
    module: &ModuleName,
) -> String {
    let own = values::module_body(module_fragments(catalog, kinds), module);
    let own_keys: Vec<String> = values::body_entries(&own).into_iter().map(|entry| entry.key).collect();
    let reads: BTreeSet<&str> =
        kinds.iter().flat_map(|kind| values::module_value_reads(catalog.entry(*kind).content)).collect();

    let full = values::module_body(module_fragments(catalog, &ManifestKind::MODULE_KINDS), module);
    values::select_entries(&full, |key| reads.contains(key) || own_keys.iter().any(|own| own == key))
}

/// Render `Chart.yaml` for `chart`.
pub fn render_chartfile(template: &str, chart: &ChartName, defaults: &ChartDefaults) -> String {
    placeholder::substitute_chart(template, chart)
        .replace(DESCRIPTION_MARKER, &yaml_scalar(&defaults.description))
        .replace(VERSION_MARKER, &yaml_scalar(&defaults.version))
        .replace(APP_VERSION_MARKER, &defaults.app_version.replace('\\', "\\\\").replace('"', "\\\""))
}

/// `value` as a single-line YAML scalar, quoted only when needed.
fn yaml_scalar(value: &str) -> String {
    match serde_yaml::to_string(value) {
        Ok(rendered) if !rendered.trim_end().contains('\n') => rendered.trim_end().to_string(),
        _ => format!("{:?}", value),
    }
}

fn module_fragments<'a, T: TemplateCatalog + ?Sized>(
    catalog: &'a T,
    kinds: &'a [ManifestKind],
) -> impl Iterator<Item = &'a str> + 'a {
    kinds.iter().map(move |kind| catalog.entry(*kind).values)
}

fn manifest_entries<T: TemplateCatalog + ?Sized>(
    catalog: &T,
    chart_root: &Path,
    module: &ModuleName,
    kinds: &[ManifestKind],
) -> Vec<PlanEntry> {
    kinds
        .iter()
        .map(|kind| {
            let path = placeholder::resolve_path(kind.path_template(), module);
            let content = placeholder::transform(catalog.entry(*kind).content, module);
            file(chart_root.join(path), content)
        })
        .collect()
}

fn file(path: impl Into<std::path::PathBuf>, content: impl Into<Vec<u8>>) -> PlanEntry {
    PlanEntry::File(GeneratedFile::new(path, content))
}
