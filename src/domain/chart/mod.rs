//! In-memory chart model exchanged with the chart loader and saver.

pub mod layout;

use serde::{Deserialize, Serialize};

/// Contents of `Chart.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub api_version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

/// A file of a chart, addressed by its path relative to the chart root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl ChartFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), data: data.into() }
    }
}

/// A loaded chart.
///
/// `raw` keeps the original bytes of every non-template file so the saver can
/// preserve comments in `values.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub metadata: ChartMetadata,
    pub templates: Vec<ChartFile>,
    pub raw: Vec<ChartFile>,
    pub values: serde_yaml::Mapping,
}

impl Chart {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Raw file with the given chart-relative name.
    pub fn raw_file(&self, name: &str) -> Option<&ChartFile> {
        self.raw.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_uses_chart_yaml_keys() {
        let metadata: ChartMetadata = serde_yaml::from_str(
            "apiVersion: v2\nname: demo\ntype: application\nversion: 0.1.0\nappVersion: \"1.16.0\"\n",
        )
        .unwrap();

        assert_eq!(metadata.name, "demo");
        assert_eq!(metadata.chart_type.as_deref(), Some("application"));
        assert_eq!(metadata.app_version.as_deref(), Some("1.16.0"));
        assert!(metadata.description.is_none());

        let yaml = serde_yaml::to_string(&metadata).unwrap();
        assert!(yaml.contains("apiVersion: v2"));
        assert!(yaml.contains("type: application"));
        assert!(!yaml.contains("description"));
    }
}
