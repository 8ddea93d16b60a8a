//! Configuration management for the Lights Off solver

pub mod settings;

pub use settings::{CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings, SolverConfig};
