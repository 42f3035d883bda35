use crate::domain::{ManifestKind, TemplateEntry};

/// Port for the fixed set of chart templates.
///
/// Lookup is total over [`ManifestKind`]; there is no "unknown kind" at this
/// level.
pub trait TemplateCatalog {
    /// Manifest body and values fragment for `kind`.
    fn entry(&self, kind: ManifestKind) -> TemplateEntry<'_>;

    /// `Chart.yaml` template. Carries the chart marker and the metadata
    /// markers, never the module marker.
    fn chartfile(&self) -> &str;

    /// Comment header opening a new `values.yaml`.
    fn values_header(&self) -> &str;

    /// `.helmignore` content, written verbatim.
    fn ignore_file(&self) -> &str;
}
