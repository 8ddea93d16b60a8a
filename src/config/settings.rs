//! Configuration settings for the Lights Off solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on the minimum-weight search, 0 for no limit
    pub timeout_seconds: u64,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field to read when no size is given; stdin when unset
    pub field_file: Option<PathBuf>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_image: bool,
    pub print_info: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 300,
            show_progress: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            save_image: false,
            print_info: false,
            output_directory: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Load settings from `path`, or fall back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.input.rows == Some(0) || self.input.cols == Some(0) {
            anyhow::bail!("Field dimensions must be positive");
        }

        if self.field_size().is_none() {
            if let Some(ref field_file) = self.input.field_file {
                if !field_file.exists() {
                    anyhow::bail!("Field file does not exist: {}", field_file.display());
                }
            }
        }

        Ok(())
    }

    /// Size of the all-lit field to synthesise, if one was requested.
    ///
    /// Giving only rows or only columns makes the field square.
    pub fn field_size(&self) -> Option<(usize, usize)> {
        match (self.input.rows, self.input.cols) {
            (Some(rows), Some(cols)) => Some((rows, cols)),
            (Some(rows), None) => Some((rows, rows)),
            (None, Some(cols)) => Some((cols, cols)),
            (None, None) => None,
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.input.rows = Some(rows);
        }
        if let Some(cols) = cli_overrides.cols {
            self.input.cols = Some(cols);
        }
        if let Some(ref field_file) = cli_overrides.field_file {
            self.input.field_file = Some(field_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(timeout_seconds) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout_seconds;
        }
        if cli_overrides.save_image {
            self.output.save_image = true;
        }
        if cli_overrides.print_info {
            self.output.print_info = true;
        }
        if cli_overrides.show_progress {
            self.solver.show_progress = true;
        }
        if cli_overrides.json {
            self.output.format = OutputFormat::Json;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub field_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
    pub save_image: bool,
    pub print_info: bool,
    pub show_progress: bool,
    pub json: bool,
}
