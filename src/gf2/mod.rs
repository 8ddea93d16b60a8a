//! Linear algebra over GF(2): elimination, consistency and minimum-weight solutions

pub mod gauss;
pub mod progress;
pub mod stop;

pub use gauss::{GaussSolver, ELIMINATION_MESSAGE};
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
pub use stop::StopCondition;
