use std::io;
use std::path::Path;

/// Port for the filesystem operations of scaffolding.
///
/// Paths are absolute. Errors are plain `io::Error`s; callers attach the path.
pub trait ScaffoldStore {
    /// Check whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Write `content` to `path`, creating parent directories and replacing
    /// any existing file.
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Append `content` to `path`, creating the file when absent.
    fn append_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Create `path` and its parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}
