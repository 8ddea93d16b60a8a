//! Lights Off solver
//!
//! Finds the minimum number of presses that switch every light of a
//! rectangular field off, by Gaussian elimination over GF(2) followed by an
//! exhaustive search of the free variables.

pub mod bits;
pub mod config;
pub mod error;
pub mod gf2;
pub mod lights_off;
pub mod utils;

pub use bits::{BitMatrix, BitVector};
pub use config::Settings;
pub use error::{BitError, LightsOffError, SolveError};
pub use lights_off::{LightsOffProblem, SolveReport};

use anyhow::Result;
use gf2::NoProgress;

/// Main entry point: load or synthesise the configured field and solve it
pub fn solve_lights_off(settings: Settings) -> Result<SolveReport> {
    let problem = LightsOffProblem::new(settings)?;
    problem.solve(&mut NoProgress)
}
