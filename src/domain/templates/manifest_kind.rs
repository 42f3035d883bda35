use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Kinds of manifest the template catalog knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    Ingress,
    Deployment,
    Service,
    ServiceAccount,
    HorizontalPodAutoscaler,
    Helpers,
    TestConnection,
    Notes,
}

impl ManifestKind {
    /// Kinds generated for every module, in generation order.
    pub const MODULE_KINDS: [ManifestKind; 7] = [
        ManifestKind::Ingress,
        ManifestKind::Deployment,
        ManifestKind::Service,
        ManifestKind::ServiceAccount,
        ManifestKind::HorizontalPodAutoscaler,
        ManifestKind::Helpers,
        ManifestKind::TestConnection,
    ];

    /// Every catalog kind, module-scoped first.
    pub const ALL: [ManifestKind; 8] = [
        ManifestKind::Ingress,
        ManifestKind::Deployment,
        ManifestKind::Service,
        ManifestKind::ServiceAccount,
        ManifestKind::HorizontalPodAutoscaler,
        ManifestKind::Helpers,
        ManifestKind::TestConnection,
        ManifestKind::Notes,
    ];

    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            ManifestKind::Ingress => "ingress",
            ManifestKind::Deployment => "deployment",
            ManifestKind::Service => "service",
            ManifestKind::ServiceAccount => "serviceaccount",
            ManifestKind::HorizontalPodAutoscaler => "hpa",
            ManifestKind::Helpers => "helpers",
            ManifestKind::TestConnection => "test-connection",
            ManifestKind::Notes => "notes",
        }
    }

    /// Chart-relative output path. Module-scoped kinds carry the `<MODULE>_`
    /// path marker, resolved per module.
    pub fn path_template(self) -> &'static str {
        match self {
            ManifestKind::Ingress => "templates/<MODULE>_ingress.yaml",
            ManifestKind::Deployment => "templates/<MODULE>_deployment.yaml",
            ManifestKind::Service => "templates/<MODULE>_service.yaml",
            ManifestKind::ServiceAccount => "templates/<MODULE>_serviceaccount.yaml",
            ManifestKind::HorizontalPodAutoscaler => "templates/<MODULE>_hpa.yaml",
            ManifestKind::Helpers => "templates/_<MODULE>_helpers.tpl",
            ManifestKind::TestConnection => "templates/tests/<MODULE>_test-connection.yaml",
            ManifestKind::Notes => "templates/NOTES.txt",
        }
    }

    /// Whether the kind produces one file per module.
    pub fn is_module_scoped(self) -> bool {
        !matches!(self, ManifestKind::Notes)
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ManifestKind {
    type Err = AppError;

    /// Parses a module-scoped kind. `notes` is chart-level and not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ingress" => Ok(ManifestKind::Ingress),
            "deployment" => Ok(ManifestKind::Deployment),
            "service" => Ok(ManifestKind::Service),
            "serviceaccount" | "service-account" => Ok(ManifestKind::ServiceAccount),
            "hpa" | "autoscaler" | "horizontal-autoscaler" => {
                Ok(ManifestKind::HorizontalPodAutoscaler)
            }
            "helpers" => Ok(ManifestKind::Helpers),
            "test-connection" => Ok(ManifestKind::TestConnection),
            _ => Err(AppError::UnknownManifestKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::templates::placeholder::MODULE_PATH_MARKER;

    #[test]
    fn module_kinds_carry_path_marker() {
        for kind in ManifestKind::MODULE_KINDS {
            assert!(kind.is_module_scoped());
            assert!(
                kind.path_template().contains(MODULE_PATH_MARKER),
                "{} path should be module-scoped",
                kind
            );
        }
        assert!(!ManifestKind::Notes.path_template().contains(MODULE_PATH_MARKER));
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in ManifestKind::MODULE_KINDS {
            assert_eq!(kind.id().parse::<ManifestKind>().unwrap(), kind);
        }
    }

    #[test]
    fn aliases_are_accepted() {
        assert_eq!("Service-Account".parse::<ManifestKind>().unwrap(), ManifestKind::ServiceAccount);
        assert_eq!("autoscaler".parse::<ManifestKind>().unwrap(), ManifestKind::HorizontalPodAutoscaler);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            "configmap".parse::<ManifestKind>(),
            Err(AppError::UnknownManifestKind(kind)) if kind == "configmap"
        ));
        assert!("notes".parse::<ManifestKind>().is_err());
    }

    #[test]
    fn all_lists_every_kind_once() {
        let mut ids: Vec<_> = ManifestKind::ALL.iter().map(|k| k.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ManifestKind::ALL.len());
    }
}
