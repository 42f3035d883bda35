use crate::impl_validated_name;

/// A validated chart name.
///
/// Guarantees:
/// - Between 1 and 250 characters
/// - Contains only ASCII alphanumeric characters, `.`, `_`, or `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartName(String);

impl_validated_name!(ChartName);

impl From<ChartName> for String {
    fn from(val: ChartName) -> Self {
        val.0
    }
}
