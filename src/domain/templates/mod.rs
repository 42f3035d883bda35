pub mod manifest_kind;
pub mod placeholder;
pub mod values;

pub use manifest_kind::ManifestKind;

/// A catalog entry: manifest body plus the values fragment it reads from.
///
/// `values` holds two-space indented lines meant to sit under the module key;
/// it is empty for kinds that read no module values of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry<'a> {
    pub content: &'a str,
    pub values: &'a str,
}
