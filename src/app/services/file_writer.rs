//! Writes planned files and appends module values.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::domain::templates::values::{self, BodyMerge};
use crate::domain::{AppError, ModuleName, PlanEntry};
use crate::ports::ScaffoldStore;

/// Paths touched by [`write_planned`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Every file written, in plan order.
    pub written: Vec<PathBuf>,
    /// Subset of `written` that replaced an existing file.
    pub overwritten: Vec<PathBuf>,
}

/// What happened to `values.yaml` during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuesUpdate {
    /// Written as part of a new chart.
    Created,
    /// Module block appended.
    Appended,
    /// The module already had a top-level key with every needed entry.
    SkippedExistingKey,
    /// Entries added inside the existing module block.
    Merged(Vec<String>),
    /// The existing module block lacks these entries and could not take them.
    MissingKeys(Vec<String>),
    /// The append failed. Manifests were still written.
    Failed(String),
}

/// Write every entry of a plan.
///
/// Existing files are replaced after a warning on `diagnostics`. The first
/// failing write aborts the run; files written before it stay on disk.
pub fn write_planned<S: ScaffoldStore + ?Sized>(
    store: &S,
    entries: &[PlanEntry],
    diagnostics: &mut dyn Write,
) -> Result<WriteReport, AppError> {
    let mut report = WriteReport::default();

    for entry in entries {
        match entry {
            PlanEntry::File(file) => {
                let existed = store.exists(&file.path);
                if existed {
                    emit(
                        diagnostics,
                        &format!("WARNING: File \"{}\" already exists. Overwriting.", file.path.display()),
                    );
                }
                store
                    .write_file(&file.path, &file.content)
                    .map_err(|e| AppError::write_error(&file.path, e))?;
                debug!("Wrote {}", file.path.display());

                report.written.push(file.path.clone());
                if existed {
                    report.overwritten.push(file.path.clone());
                }
            }
            PlanEntry::Dir(path) => {
                store.create_dir_all(path).map_err(|e| AppError::write_error(path, e))?;
                debug!("Created directory {}", path.display());
            }
        }
    }

    Ok(report)
}

/// Append `fragment` to the values file, creating it when absent.
pub fn append_values<S: ScaffoldStore + ?Sized>(
    store: &S,
    values_path: &Path,
    fragment: &[u8],
) -> Result<(), AppError> {
    store.append_file(values_path, fragment).map_err(|e| AppError::write_error(values_path, e))
}

/// Add the values of `module` built from `body`.
///
/// A new module gets its whole block appended. When the file already
/// declares the module, only the entries its block lacks are added, inside
/// that block.
///
/// Never fails: problems are reported on `diagnostics` and in the returned
/// [`ValuesUpdate`].
pub fn append_module_values<S: ScaffoldStore + ?Sized>(
    store: &S,
    values_path: &Path,
    module: &ModuleName,
    body: &str,
    diagnostics: &mut dyn Write,
) -> ValuesUpdate {
    if let Ok(existing) = store.read_file(values_path)
        && values::has_top_level_key(&existing, module)
    {
        return merge_module_values(store, values_path, module, &existing, body, diagnostics);
    }

    let fragment = values::append_fragment(&values::block_from_body(body, module));
    match append_values(store, values_path, fragment.as_bytes()) {
        Ok(()) => {
            debug!("Appended values for module {} to {}", module, values_path.display());
            ValuesUpdate::Appended
        }
        Err(err) => {
            warn!("Values append failed for module {}: {}", module, err);
            emit(diagnostics, &format!("WARNING: {}", err));
            ValuesUpdate::Failed(err.to_string())
        }
    }
}

fn merge_module_values<S: ScaffoldStore + ?Sized>(
    store: &S,
    values_path: &Path,
    module: &ModuleName,
    existing: &str,
    body: &str,
    diagnostics: &mut dyn Write,
) -> ValuesUpdate {
    match values::merge_module_body(existing, module, body) {
        BodyMerge::Unchanged => {
            emit(
                diagnostics,
                &format!(
                    "WARNING: {} already declares \"{}\". Skipping values append.",
                    values_path.display(),
                    module
                ),
            );
            ValuesUpdate::SkippedExistingKey
        }
        BodyMerge::Merged { document, added } => {
            match store.write_file(values_path, document.as_bytes()) {
                Ok(()) => {
                    debug!("Added {} to module {} in {}", added.join(", "), module, values_path.display());
                    ValuesUpdate::Merged(added)
                }
                Err(e) => {
                    let err = AppError::write_error(values_path, e);
                    warn!("Values merge failed for module {}: {}", module, err);
                    emit(diagnostics, &format!("WARNING: {}", err));
                    ValuesUpdate::Failed(err.to_string())
                }
            }
        }
        BodyMerge::Unmergeable { missing } => {
            emit(
                diagnostics,
                &format!(
                    "WARNING: {} already declares \"{}\" but lacks {}. Add them by hand.",
                    values_path.display(),
                    module,
                    missing.join(", ")
                ),
            );
            ValuesUpdate::MissingKeys(missing)
        }
    }
}

fn emit(diagnostics: &mut dyn Write, message: &str) {
    // A closed diagnostic stream must not fail the scaffold.
    let _ = writeln!(diagnostics, "{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryScaffoldStore;
    use crate::domain::GeneratedFile;

    fn entries() -> Vec<PlanEntry> {
        vec![
            PlanEntry::File(GeneratedFile::new("/w/demo/Chart.yaml", "name: demo\n")),
            PlanEntry::File(GeneratedFile::new("/w/demo/templates/tests/t.yaml", "kind: Pod\n")),
            PlanEntry::Dir(PathBuf::from("/w/demo/charts")),
        ]
    }

    #[test]
    fn writes_files_and_directories() {
        let store = MemoryScaffoldStore::new();
        let mut diagnostics = Vec::new();

        let report = write_planned(&store, &entries(), &mut diagnostics).unwrap();

        assert_eq!(report.written.len(), 2);
        assert!(report.overwritten.is_empty());
        assert!(diagnostics.is_empty());
        assert!(store.is_dir(Path::new("/w/demo/charts")));
        assert_eq!(store.file_string("/w/demo/templates/tests/t.yaml").as_deref(), Some("kind: Pod\n"));
    }

    #[test]
    fn overwrite_warns_once_per_existing_file() {
        let store = MemoryScaffoldStore::new().with_file("/w/demo/Chart.yaml", "old");
        let mut diagnostics = Vec::new();

        let report = write_planned(&store, &entries(), &mut diagnostics).unwrap();

        assert_eq!(report.overwritten, vec![PathBuf::from("/w/demo/Chart.yaml")]);
        assert_eq!(
            String::from_utf8(diagnostics).unwrap(),
            "WARNING: File \"/w/demo/Chart.yaml\" already exists. Overwriting.\n"
        );
        assert_eq!(store.file_string("/w/demo/Chart.yaml").as_deref(), Some("name: demo\n"));
    }

    #[test]
    fn first_failed_write_aborts() {
        let store = MemoryScaffoldStore::new();
        store.set_read_only("/w/demo/templates/tests/t.yaml");

        let err = write_planned(&store, &entries(), &mut Vec::new()).unwrap_err();

        assert!(matches!(err, AppError::Write { ref path, .. } if path.ends_with("t.yaml")));
        assert!(store.file("/w/demo/Chart.yaml").is_some());
        assert!(!store.is_dir(Path::new("/w/demo/charts")));
    }

    #[test]
    fn module_values_are_appended() {
        let store = MemoryScaffoldStore::new().with_file("/w/values.yaml", "main: {}\n");
        let module = ModuleName::new("cache").unwrap();

        let update =
            append_module_values(&store, Path::new("/w/values.yaml"), &module, "  a: 1\n", &mut Vec::new());

        assert_eq!(update, ValuesUpdate::Appended);
        assert_eq!(store.file_string("/w/values.yaml").as_deref(), Some("main: {}\n\ncache:\n  a: 1\n"));
    }

    #[test]
    fn complete_module_block_skips_append() {
        let store = MemoryScaffoldStore::new().with_file("/w/values.yaml", "cache:\n  a: 1\n");
        let module = ModuleName::new("cache").unwrap();
        let mut diagnostics = Vec::new();

        let update =
            append_module_values(&store, Path::new("/w/values.yaml"), &module, "  a: 2\n", &mut diagnostics);

        assert_eq!(update, ValuesUpdate::SkippedExistingKey);
        assert!(String::from_utf8(diagnostics).unwrap().contains("already declares \"cache\""));
        assert_eq!(store.file_string("/w/values.yaml").as_deref(), Some("cache:\n  a: 1\n"));
    }

    #[test]
    fn missing_entries_are_added_to_existing_block() {
        let store = MemoryScaffoldStore::new().with_file("/w/values.yaml", "cache:\n  a: 1\nmain: {}\n");
        let module = ModuleName::new("cache").unwrap();
        let mut diagnostics = Vec::new();

        let update = append_module_values(
            &store,
            Path::new("/w/values.yaml"),
            &module,
            "  a: 2\n\n  b: 3\n",
            &mut diagnostics,
        );

        assert_eq!(update, ValuesUpdate::Merged(vec!["b".to_string()]));
        assert!(diagnostics.is_empty());
        assert_eq!(
            store.file_string("/w/values.yaml").as_deref(),
            Some("cache:\n  a: 1\n\n  b: 3\nmain: {}\n")
        );
    }

    #[test]
    fn unmergeable_block_names_the_missing_keys() {
        let store = MemoryScaffoldStore::new().with_file("/w/values.yaml", "cache: 5\n");
        let module = ModuleName::new("cache").unwrap();
        let mut diagnostics = Vec::new();

        let update = append_module_values(
            &store,
            Path::new("/w/values.yaml"),
            &module,
            "  a: 1\n\n  b: 2\n",
            &mut diagnostics,
        );

        assert_eq!(update, ValuesUpdate::MissingKeys(vec!["a".to_string(), "b".to_string()]));
        assert!(String::from_utf8(diagnostics).unwrap().contains("lacks a, b. Add them by hand."));
        assert_eq!(store.file_string("/w/values.yaml").as_deref(), Some("cache: 5\n"));
    }

    #[test]
    fn failed_append_is_reported_not_raised() {
        let store = MemoryScaffoldStore::new().with_file("/w/values.yaml", "main: {}\n");
        store.set_read_only("/w/values.yaml");
        let module = ModuleName::new("cache").unwrap();
        let mut diagnostics = Vec::new();

        let update =
            append_module_values(&store, Path::new("/w/values.yaml"), &module, "", &mut diagnostics);

        assert!(matches!(update, ValuesUpdate::Failed(ref msg) if msg.contains("/w/values.yaml")));
        assert!(String::from_utf8(diagnostics).unwrap().starts_with("WARNING: failed to write /w/values.yaml"));
    }
}
