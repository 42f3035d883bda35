use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::chart::layout::{CHARTFILE_NAME, TEMPLATES_DIR, VALUES_FILE_NAME};
use crate::domain::{AppError, Chart, ChartFile, ChartMetadata};
use crate::ports::ChartLoader;

use super::ChartDirectory;

impl ChartLoader for ChartDirectory {
    fn load(&self, path: &Path) -> Result<Chart, AppError> {
        let load_error = |details: String| AppError::ChartLoad { path: path.to_path_buf(), details };

        if !path.is_dir() {
            return Err(load_error("not a chart directory".to_string()));
        }

        let chartfile = path.join(CHARTFILE_NAME);
        if !chartfile.is_file() {
            return Err(load_error(format!("{} file is missing", CHARTFILE_NAME)));
        }
        let metadata: ChartMetadata = serde_yaml::from_str(&fs::read_to_string(&chartfile)?)
            .map_err(|e| load_error(format!("invalid {}: {}", CHARTFILE_NAME, e)))?;
        if metadata.name.trim().is_empty() {
            return Err(load_error("chart name is empty".to_string()));
        }

        let mut files = Vec::new();
        collect_files(path, path, &mut files)?;

        let mut templates = Vec::new();
        let mut raw = Vec::new();
        for (name, full_path) in files {
            if name == CHARTFILE_NAME {
                continue;
            }
            let file = ChartFile::new(name, fs::read(&full_path)?);
            if file.name.starts_with(&format!("{}/", TEMPLATES_DIR)) {
                templates.push(file);
            } else {
                raw.push(file);
            }
        }

        let values = match raw.iter().find(|f| f.name == VALUES_FILE_NAME) {
            Some(file) => parse_values(&file.data).map_err(|e| {
                load_error(format!("invalid {}: {}", VALUES_FILE_NAME, e))
            })?,
            None => serde_yaml::Mapping::new(),
        };

        debug!(
            "Loaded chart {} from {} ({} templates, {} other files)",
            metadata.name,
            path.display(),
            templates.len(),
            raw.len()
        );
        Ok(Chart { metadata, templates, raw, values })
    }
}

fn parse_values(data: &[u8]) -> Result<serde_yaml::Mapping, serde_yaml::Error> {
    match serde_yaml::from_slice::<serde_yaml::Value>(data)? {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        other => serde_yaml::from_value(other),
    }
}

/// Chart-relative names (always `/`-separated) of every file under `dir`.
fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> std::io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, out)?;
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else { continue };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        out.push((name, path));
    }
    Ok(())
}
