pub mod assets;
pub mod chart_dir;
pub mod filesystem;
pub mod memory_scaffold_store;

pub use assets::EmbeddedTemplateCatalog;
pub use chart_dir::ChartDirectory;
pub use filesystem::FilesystemScaffoldStore;
pub use memory_scaffold_store::MemoryScaffoldStore;
