//! Serial cycle driver.
//!
//! Runs one cycle at a time and sleeps a fixed interval after each cycle
//! finishes, so cycles never overlap. A failing cycle is logged and the loop
//! carries on.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::autotagger::CycleOutcome;

/// Repeats a tagging cycle on a fixed cadence.
#[derive(Debug, Clone, Copy)]
pub struct CycleRunner {
    interval: Duration,
}

impl CycleRunner {
    /// Creates a runner that waits `interval` between the end of one cycle
    /// and the start of the next.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Returns the delay between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single cycle, logging and swallowing any error.
    ///
    /// Returns the outcome, or `None` if the cycle failed.
    pub fn run_cycle<F>(&self, cycle: &mut F) -> Option<CycleOutcome>
    where
        F: FnMut() -> Result<CycleOutcome>,
    {
        info!("Starting tag cycle");
        match cycle() {
            Ok(outcome) => {
                info!(?outcome, "Cycle completed");
                Some(outcome)
            }
            Err(e) => {
                error!("Error during tag cycle: {e:#}");
                None
            }
        }
    }

    /// Runs exactly `count` cycles, sleeping between them but not after the last.
    pub fn run_times<F>(&self, count: usize, mut cycle: F) -> Vec<Option<CycleOutcome>>
    where
        F: FnMut() -> Result<CycleOutcome>,
    {
        let mut outcomes = Vec::with_capacity(count);
        for i in 0..count {
            outcomes.push(self.run_cycle(&mut cycle));
            if i + 1 < count {
                self.wait();
            }
        }
        outcomes
    }

    /// Runs cycles until the process is stopped.
    pub fn run_forever<F>(&self, mut cycle: F) -> !
    where
        F: FnMut() -> Result<CycleOutcome>,
    {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting auto-tag loop"
        );
        loop {
            self.run_cycle(&mut cycle);
            self.wait();
        }
    }

    fn wait(&self) {
        info!(
            "Waiting {} seconds before next cycle",
            self.interval.as_secs()
        );
        thread::sleep(self.interval);
    }
}
