//! Side-effecting edges of the engine: configuration files and renderers.

pub mod config;
pub mod renderer;
