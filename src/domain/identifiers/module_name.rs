use crate::impl_validated_name;

/// Module used for the first module of a freshly created chart.
pub const DEFAULT_MODULE: &str = "main";

/// A validated module name.
///
/// Module names obey the same rules as chart names. They prefix the file names
/// of the module's manifests and key its block in `values.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl_validated_name!(ModuleName);

impl ModuleName {
    /// The sentinel module every new chart starts with.
    pub fn main() -> Self {
        Self(DEFAULT_MODULE.to_string())
    }
}

impl Default for ModuleName {
    fn default() -> Self {
        Self::main()
    }
}
