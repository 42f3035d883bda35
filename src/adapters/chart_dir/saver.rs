use std::fs;
use std::path::Path;

use log::debug;

use crate::domain::chart::layout::{CHARTFILE_NAME, VALUES_FILE_NAME};
use crate::domain::{AppError, Chart};
use crate::ports::ChartSaver;

use super::ChartDirectory;

impl ChartSaver for ChartDirectory {
    fn save(&self, chart: &Chart, chart_dir: &Path) -> Result<(), AppError> {
        let save_error =
            |details: String| AppError::ChartSave { path: chart_dir.to_path_buf(), details };

        if chart_dir.exists() && !chart_dir.is_dir() {
            return Err(AppError::ChartPathOccupied(chart_dir.to_path_buf()));
        }
        let files: Vec<_> = chart
            .templates
            .iter()
            .chain(chart.raw.iter().filter(|f| f.name != VALUES_FILE_NAME))
            .collect();
        if let Some(file) = files.iter().find(|f| !is_contained(&f.name)) {
            return Err(save_error(format!("refusing to write outside the chart: {}", file.name)));
        }

        fs::create_dir_all(chart_dir).map_err(|e| AppError::write_error(chart_dir, e))?;

        let chartfile = serde_yaml::to_string(&chart.metadata)
            .map_err(|e| save_error(format!("cannot serialize {}: {}", CHARTFILE_NAME, e)))?;
        write_file(chart_dir, CHARTFILE_NAME, chartfile.as_bytes())?;

        // Raw bytes keep the comments of the source values file.
        match chart.raw_file(VALUES_FILE_NAME) {
            Some(file) => write_file(chart_dir, VALUES_FILE_NAME, &file.data)?,
            None if !chart.values.is_empty() => {
                let values = serde_yaml::to_string(&chart.values)
                    .map_err(|e| save_error(format!("cannot serialize {}: {}", VALUES_FILE_NAME, e)))?;
                write_file(chart_dir, VALUES_FILE_NAME, values.as_bytes())?;
            }
            None => {}
        }

        for file in files {
            write_file(chart_dir, &file.name, &file.data)?;
        }

        debug!("Saved chart {} to {}", chart.name(), chart_dir.display());
        Ok(())
    }
}

fn is_contained(name: &str) -> bool {
    !name.split('/').any(|part| part == ".." || part.is_empty())
}

fn write_file(chart_dir: &Path, name: &str, data: &[u8]) -> Result<(), AppError> {
    let path = chart_dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::write_error(parent, e))?;
    }
    fs::write(&path, data).map_err(|e| AppError::write_error(path, e))
}
