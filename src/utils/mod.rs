//! Console presentation helpers

pub mod display;

pub use display::{ColorOutput, ReportFormatter, TerminalProgress, Tone};
