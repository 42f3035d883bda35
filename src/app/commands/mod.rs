pub mod create_from;
pub mod manifest;
pub mod scaffold;
