//! Filesystem adapter for the `ScaffoldStore` port.

mod scaffold_store;

/// Store operating directly on the local filesystem.
///
/// Paths are used as given; the orchestrator resolves them against the
/// working directory before planning.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemScaffoldStore;

impl FilesystemScaffoldStore {
    pub fn new() -> Self {
        Self
    }
}
