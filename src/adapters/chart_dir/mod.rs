//! Chart directory adapter: loads and saves charts laid out on disk.

mod loader;
mod saver;

/// Reads and writes charts as plain directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartDirectory;

impl ChartDirectory {
    pub fn new() -> Self {
        Self
    }
}
