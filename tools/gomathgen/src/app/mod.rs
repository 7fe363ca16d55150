//! High-level orchestration: holds the configuration and drives the pipeline.

pub mod config;
pub mod state;

pub use state::AppContext;
