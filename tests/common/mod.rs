//! Shared testing utilities for modchart CLI tests.

use assert_cmd::Command;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables that point modchart at user configuration.
const CONFIG_VARS: [&str; 3] = ["XDG_CONFIG_HOME", "XDG_DATA_HOME", "MODCHART_CONFIG"];

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    original_env: Vec<(&'static str, Option<OsString>)>,
    original_cwd: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        let original_cwd = env::current_dir().expect("Failed to get current directory");
        let original_env = std::iter::once("HOME")
            .chain(CONFIG_VARS)
            .map(|key| (key, env::var_os(key)))
            .collect();

        unsafe {
            env::set_var("HOME", root.path());
            for key in CONFIG_VARS {
                env::remove_var(key);
            }
        }

        Self { root, work_dir, original_env, original_cwd }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Default config file location under the emulated home.
    pub fn config_path(&self) -> PathBuf {
        self.home().join(".config/modchart/config.toml")
    }

    /// Write the user config file.
    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        fs::write(path, content).expect("Failed to write config");
    }

    /// Build a command for invoking the compiled `modchart` binary within the default workspace.
    pub fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `modchart` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("modchart").expect("Failed to locate modchart binary");
        cmd.current_dir(dir.as_ref()).env("HOME", self.home());
        for key in CONFIG_VARS {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Path of a chart created in the work directory.
    pub fn chart_path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Read a file of a chart as text.
    pub fn read_chart_file(&self, chart: &str, relative: &str) -> String {
        let path = self.chart_path(chart).join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Parse `values.yaml` of a chart.
    pub fn chart_values(&self, chart: &str) -> serde_yaml::Mapping {
        serde_yaml::from_str(&self.read_chart_file(chart, "values.yaml"))
            .expect("values.yaml should be valid YAML")
    }

    /// Every file under a chart, relative and sorted.
    pub fn chart_files(&self, chart: &str) -> Vec<String> {
        let root = self.chart_path(chart);
        let mut files = Vec::new();
        collect(&root, &root, &mut files);
        files.sort();
        files
    }

    /// Assert that the module manifests of `module` exist in a chart.
    pub fn assert_module_manifests_exist(&self, chart: &str, module: &str) {
        let templates = self.chart_path(chart).join("templates");
        for name in [
            format!("{}_ingress.yaml", module),
            format!("{}_deployment.yaml", module),
            format!("{}_service.yaml", module),
            format!("{}_serviceaccount.yaml", module),
            format!("{}_hpa.yaml", module),
            format!("_{}_helpers.tpl", module),
            format!("tests/{}_test-connection.yaml", module),
        ] {
            assert!(templates.join(&name).is_file(), "templates/{} should exist", name);
        }
    }

    /// Assert that no file under a chart still carries a placeholder marker.
    pub fn assert_no_markers(&self, chart: &str) {
        for file in self.chart_files(chart) {
            let content = self.read_chart_file(chart, &file);
            for marker in ["<MODULE_NAME>", "<MODULE>_", "<CHARTNAME>"] {
                assert!(!content.contains(marker), "{} still contains {}", file, marker);
            }
        }
    }

    /// Execute a closure after temporarily switching into the work directory.
    pub fn with_work_dir<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::current_dir().expect("Failed to capture current dir");
        env::set_current_dir(&self.work_dir).expect("Failed to switch current dir");
        let result = action();
        env::set_current_dir(original).expect("Failed to restore current dir");
        result
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read dir") {
        let path = entry.expect("Failed to read dir entry").path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            out.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Restore original CWD first (in case we're still in the temp dir)
        let _ = env::set_current_dir(&self.original_cwd);

        for (key, value) in &self.original_env {
            match value {
                Some(value) => unsafe {
                    env::set_var(key, value);
                },
                None => unsafe {
                    env::remove_var(key);
                },
            }
        }
    }
}
