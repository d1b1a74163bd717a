pub mod build_pipeline;
pub mod commands;
pub mod compiler;
pub mod config;
pub mod extract;
pub mod flutter_scaffold;
pub mod logging;
pub mod package;
