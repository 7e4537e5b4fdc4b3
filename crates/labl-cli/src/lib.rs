//! CLI library components for the Labl IQ column mapper.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod overrides;
pub mod summary;
pub mod types;
