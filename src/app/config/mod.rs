mod load_config;

pub use load_config::{load_config, load_config_from, starters_dir};
