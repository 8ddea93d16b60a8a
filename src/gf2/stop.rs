//! Cooperative cancellation for the exhaustive search

use crate::error::SolveError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Conditions under which a running search gives up.
///
/// Polled once per free-variable assignment.
#[derive(Debug, Clone)]
pub struct StopCondition {
    started: Instant,
    deadline: Option<Instant>,
    flag: Option<Arc<AtomicBool>>,
}

impl StopCondition {
    /// Never stops
    pub fn none() -> Self {
        Self {
            started: Instant::now(),
            deadline: None,
            flag: None,
        }
    }

    /// Stops once `timeout` has elapsed from now
    pub fn with_timeout(timeout: Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started.checked_add(timeout),
            flag: None,
        }
    }

    /// Builds a condition from a timeout in seconds, 0 meaning unlimited
    pub fn from_timeout_seconds(seconds: u64) -> Self {
        if seconds == 0 {
            Self::none()
        } else {
            Self::with_timeout(Duration::from_secs(seconds))
        }
    }

    /// Also stops when `flag` becomes true
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns an error if the search should stop
    pub fn check(&self) -> Result<(), SolveError> {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Relaxed) {
                return Err(SolveError::Cancelled);
            }
        }

        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if now >= deadline {
                return Err(SolveError::TimedOut {
                    elapsed: now.duration_since(self.started),
                });
            }
        }

        Ok(())
    }
}

impl Default for StopCondition {
    fn default() -> Self {
        Self::none()
    }
}
