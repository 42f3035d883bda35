//! Turns a loaded starter chart into a new chart.

use crate::domain::chart::layout::VALUES_FILE_NAME;
use crate::domain::templates::placeholder;
use crate::domain::{AppError, Chart, ChartDefaults, ChartFile, ChartName, ModuleName};

/// Rename `source` to `name` and resolve every marker in its templates and
/// values, with module `main`.
pub fn clone_chart(
    source: Chart,
    name: &ChartName,
    defaults: &ChartDefaults,
) -> Result<Chart, AppError> {
    let module = ModuleName::main();
    let render = |file: ChartFile| transform_file(file, &module, name);

    let values_yaml = serde_yaml::to_string(&source.values).map_err(|e| AppError::ParseError {
        what: "starter values".to_string(),
        details: e.to_string(),
    })?;
    let values_yaml =
        String::from_utf8_lossy(&placeholder::transform_with_chart(&values_yaml, &module, name))
            .into_owned();
    let values = serde_yaml::from_str::<Option<serde_yaml::Mapping>>(&values_yaml)
        .map_err(|e| AppError::ParseError {
            what: "starter values".to_string(),
            details: e.to_string(),
        })?
        .unwrap_or_default();

    let raw = source
        .raw
        .into_iter()
        .map(|file| if file.name == VALUES_FILE_NAME { render(file) } else { file })
        .collect();

    Ok(Chart {
        metadata: defaults.metadata(name),
        templates: source.templates.into_iter().map(render).collect(),
        raw,
        values,
    })
}

fn transform_file(file: ChartFile, module: &ModuleName, chart: &ChartName) -> ChartFile {
    match std::str::from_utf8(&file.data) {
        Ok(text) => ChartFile::new(
            file.name.clone(),
            placeholder::transform_with_chart(text, module, chart),
        ),
        // Binary files carry no markers.
        Err(_) => file,
    }
}
