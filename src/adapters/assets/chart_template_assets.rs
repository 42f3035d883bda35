use crate::domain::{ManifestKind, TemplateEntry};
use crate::ports::TemplateCatalog;

/// Chart templates compiled into the binary.
mod templates {
    pub static CHARTFILE: &str = include_str!("../../assets/chart/Chart.yaml");
    pub static VALUES_HEADER: &str = include_str!("../../assets/chart/values_header.yaml");
    pub static IGNORE: &str = include_str!("../../assets/chart/helmignore");

    pub static INGRESS: &str = include_str!("../../assets/chart/templates/ingress.yaml");
    pub static DEPLOYMENT: &str = include_str!("../../assets/chart/templates/deployment.yaml");
    pub static SERVICE: &str = include_str!("../../assets/chart/templates/service.yaml");
    pub static SERVICE_ACCOUNT: &str =
        include_str!("../../assets/chart/templates/serviceaccount.yaml");
    pub static HPA: &str = include_str!("../../assets/chart/templates/hpa.yaml");
    pub static HELPERS: &str = include_str!("../../assets/chart/templates/helpers.tpl");
    pub static TEST_CONNECTION: &str =
        include_str!("../../assets/chart/templates/test-connection.yaml");
    pub static NOTES: &str = include_str!("../../assets/chart/templates/NOTES.txt");
}

/// Values fragments, indented to sit under a module key.
mod values {
    pub static INGRESS: &str = include_str!("../../assets/chart/values/ingress.yaml");
    pub static DEPLOYMENT: &str = include_str!("../../assets/chart/values/deployment.yaml");
    pub static SERVICE: &str = include_str!("../../assets/chart/values/service.yaml");
    pub static SERVICE_ACCOUNT: &str =
        include_str!("../../assets/chart/values/serviceaccount.yaml");
    pub static HPA: &str = include_str!("../../assets/chart/values/hpa.yaml");
    pub static HELPERS: &str = include_str!("../../assets/chart/values/helpers.yaml");
}

/// Embedded template catalog implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateCatalog;

impl EmbeddedTemplateCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCatalog for EmbeddedTemplateCatalog {
    fn entry(&self, kind: ManifestKind) -> TemplateEntry<'_> {
        let (content, values) = match kind {
            ManifestKind::Ingress => (templates::INGRESS, values::INGRESS),
            ManifestKind::Deployment => (templates::DEPLOYMENT, values::DEPLOYMENT),
            ManifestKind::Service => (templates::SERVICE, values::SERVICE),
            ManifestKind::ServiceAccount => (templates::SERVICE_ACCOUNT, values::SERVICE_ACCOUNT),
            ManifestKind::HorizontalPodAutoscaler => (templates::HPA, values::HPA),
            ManifestKind::Helpers => (templates::HELPERS, values::HELPERS),
            ManifestKind::TestConnection => (templates::TEST_CONNECTION, ""),
            ManifestKind::Notes => (templates::NOTES, ""),
        };
        TemplateEntry { content, values }
    }

    fn chartfile(&self) -> &str {
        templates::CHARTFILE
    }

    fn values_header(&self) -> &str {
        templates::VALUES_HEADER
    }

    fn ignore_file(&self) -> &str {
        templates::IGNORE
    }
}
