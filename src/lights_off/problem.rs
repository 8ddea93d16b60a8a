//! Lights Off problem definition and solve pipeline

use super::io::{load_field_from_file, read_field};
use super::mapper::{all_lit, build_system, presses_from_solution};
use crate::bits::BitMatrix;
use crate::config::Settings;
use crate::error::LightsOffError;
use crate::gf2::{GaussSolver, ProgressSink, StopCondition};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of solving one field
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub rows: usize,
    pub cols: usize,
    /// Rank of the `rows*cols` equation system
    pub rank: usize,
    /// Minimum-weight press grid, `None` when the field cannot be cleared
    pub presses: Option<BitMatrix>,
    /// `2^(rows*cols - rank)` when solvable, otherwise 0
    pub solution_count: u128,
    /// Number of presses in `presses`
    pub weight: usize,
    pub elapsed: Duration,
}

/// Serializable view of a [`SolveReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveSummary {
    pub rows: usize,
    pub cols: usize,
    pub rank: usize,
    pub solvable: bool,
    /// Decimal string so counts beyond 2^53 survive JSON consumers
    pub solution_count: String,
    pub weight: usize,
    pub elapsed_ms: u64,
    pub presses: Option<Vec<String>>,
}

impl SolveReport {
    pub fn is_solvable(&self) -> bool {
        self.presses.is_some()
    }

    /// Number of unknowns left free by the elimination
    pub fn nullity(&self) -> usize {
        self.rows * self.cols - self.rank
    }

    pub fn summary(&self) -> SolveSummary {
        SolveSummary {
            rows: self.rows,
            cols: self.cols,
            rank: self.rank,
            solvable: self.is_solvable(),
            solution_count: self.solution_count.to_string(),
            weight: self.weight,
            elapsed_ms: self.elapsed.as_millis() as u64,
            presses: self.presses.as_ref().map(|presses| {
                presses
                    .rows()
                    .map(|row| row.to_bit_string(presses.n_cols()))
                    .collect()
            }),
        }
    }

    /// Convert the summary to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}

/// Number of solutions of a consistent system with `free` free variables
pub fn solution_count(free: usize) -> u128 {
    1u128.checked_shl(free as u32).unwrap_or(u128::MAX)
}

/// Find the minimum-weight press grid that switches every light in `field` off
#[tracing::instrument(skip_all, fields(rows = field.n_rows(), cols = field.n_cols()))]
pub fn solve<P: ProgressSink + ?Sized>(
    field: &BitMatrix,
    progress: &mut P,
    stop: &StopCondition,
) -> Result<SolveReport, LightsOffError> {
    let start_time = Instant::now();
    let (rows, cols) = field.dimensions();

    let system = build_system(field)?;
    let mut gauss = GaussSolver::new(system);
    let (rank, solution) = gauss.solve(progress, stop)?;

    let (presses, count, weight) = match solution {
        Some(solution) => {
            let presses = presses_from_solution(&solution, rows, cols)?;
            let weight = presses.count_ones();
            (Some(presses), solution_count(rows * cols - rank), weight)
        }
        None => (None, 0, 0),
    };

    let elapsed = start_time.elapsed();
    info!(
        rank,
        solvable = presses.is_some(),
        weight,
        elapsed_ms = elapsed.as_millis() as u64,
        "solved field"
    );

    Ok(SolveReport {
        rows,
        cols,
        rank,
        presses,
        solution_count: count,
        weight,
        elapsed,
    })
}

/// A Lights Off field together with the settings it is solved under
pub struct LightsOffProblem {
    settings: Settings,
    field: BitMatrix,
}

impl LightsOffProblem {
    /// Create a problem from settings: an all-lit field when a size is
    /// configured, else the configured field file, else stdin.
    pub fn new(settings: Settings) -> Result<Self> {
        let field = if let Some((rows, cols)) = settings.field_size() {
            all_lit(rows, cols).context("Failed to create all-lit field")?
        } else if let Some(ref path) = settings.input.field_file {
            load_field_from_file(path)?
        } else {
            read_field(std::io::stdin().lock()).context("Failed to read field from stdin")?
        };

        Ok(Self { settings, field })
    }

    /// Create a problem with an explicit field
    pub fn with_field(settings: Settings, field: BitMatrix) -> Self {
        Self { settings, field }
    }

    pub fn field(&self) -> &BitMatrix {
        &self.field
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Stop condition derived from the configured timeout
    pub fn stop_condition(&self) -> StopCondition {
        StopCondition::from_timeout_seconds(self.settings.solver.timeout_seconds)
    }

    /// Solve the field, reporting elimination progress to `progress`
    pub fn solve<P: ProgressSink + ?Sized>(&self, progress: &mut P) -> Result<SolveReport> {
        solve(&self.field, progress, &self.stop_condition()).with_context(|| {
            format!(
                "Failed to solve {}x{} field",
                self.field.n_rows(),
                self.field.n_cols()
            )
        })
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size      : {} x {}", self.rows, self.cols)?;
        writeln!(f, "Solutions : {}", self.solution_count)?;
        writeln!(f, "Weight    : {}", self.weight)?;
        write!(f, "Time      : {:.3}s", self.elapsed.as_secs_f64())
    }
}
