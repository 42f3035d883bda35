use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::ScaffoldStore;

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
}

impl State {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.keys().any(|file| file.starts_with(path) && file != path)
    }

    fn add_ancestors(&mut self, path: &Path) -> io::Result<()> {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if self.files.contains_key(ancestor) {
                return Err(io::Error::other(format!("{} is not a directory", ancestor.display())));
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        if self.is_dir(path) {
            return Err(io::Error::other(format!("{} is a directory", path.display())));
        }
        Ok(())
    }
}

/// In-memory scaffold store for testing.
///
/// Clones share state, so a test can keep a handle while the orchestrator owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryScaffoldStore {
    state: Arc<Mutex<State>>,
}

impl MemoryScaffoldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        {
            let path = path.into();
            let mut state = self.lock();
            // Seeding only happens in test setup; a clash there is a broken fixture.
            let _ = state.add_ancestors(&path);
            state.files.insert(path, content.into());
        }
        self
    }

    /// Seed an empty directory.
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        {
            let path = path.into();
            let mut state = self.lock();
            let _ = state.add_ancestors(&path);
            state.dirs.insert(path);
        }
        self
    }

    /// Make writes and appends to `path` fail with `PermissionDenied`.
    pub fn set_read_only(&self, path: impl Into<PathBuf>) {
        self.lock().read_only.insert(path.into());
    }

    /// Content of a stored file.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Content of a stored file as text.
    pub fn file_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.file(path).and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Every stored file path, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ScaffoldStore for MemoryScaffoldStore {
    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().is_dir(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        let state = self.lock();
        let bytes = state.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        String::from_utf8(bytes.clone()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        state.check_writable(path)?;
        state.add_ancestors(path)?;
        state.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        state.check_writable(path)?;
        state.add_ancestors(path)?;
        state.files.entry(path.to_path_buf()).or_default().extend_from_slice(content);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", path.display()),
            ));
        }
        state.add_ancestors(path)?;
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }
}
