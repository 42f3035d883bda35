//! Textual placeholder substitution.
//!
//! Templates are plain text. Markers are replaced verbatim; nothing is parsed,
//! so template bodies must not contain a marker as incidental text.

use crate::domain::identifiers::ModuleName;

/// Stands for the module name inside template bodies.
pub const MODULE_MARKER: &str = "<MODULE_NAME>";
/// Stands for `<module>_` inside output paths.
pub const MODULE_PATH_MARKER: &str = "<MODULE>_";
/// Stands for the chart name (chart metadata and starter charts).
pub const CHART_MARKER: &str = "<CHARTNAME>";

/// Every marker that must be gone from generated output.
pub const MARKERS: [&str; 3] = [MODULE_MARKER, MODULE_PATH_MARKER, CHART_MARKER];

/// Replace the module markers with `module`.
pub fn substitute_module(template: &str, module: &ModuleName) -> String {
    template
        .replace(MODULE_PATH_MARKER, &format!("{}_", module))
        .replace(MODULE_MARKER, module)
}

/// Replace the chart marker with `chart`.
pub fn substitute_chart(template: &str, chart: &str) -> String {
    template.replace(CHART_MARKER, chart)
}

/// Render a module-scoped template.
pub fn transform(template: &str, module: &ModuleName) -> Vec<u8> {
    substitute_module(template, module).into_bytes()
}

/// Render a template that may carry both module and chart markers.
pub fn transform_with_chart(template: &str, module: &ModuleName, chart: &str) -> Vec<u8> {
    substitute_chart(&substitute_module(template, module), chart).into_bytes()
}

/// Resolve a chart-relative path template for `module`.
pub fn resolve_path(path_template: &str, module: &ModuleName) -> String {
    substitute_module(path_template, module)
}

/// First marker still present in `text`.
pub fn find_marker(text: &str) -> Option<&'static str> {
    MARKERS.iter().copied().find(|marker| text.contains(marker))
}
