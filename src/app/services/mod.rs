pub mod chart_cloner;
pub mod file_planner;
pub mod file_writer;
