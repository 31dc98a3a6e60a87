//! Run statistics tracking.
//!
//! Counts how each input line was handled so the run can end with a summary.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::LineOutcome;

/// Per-outcome line counters for a single run.
///
/// All outcome kinds are initialized to zero on creation. Lines are processed
/// sequentially, so plain counters behind `&mut self` are enough.
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    outcomes: HashMap<LineOutcome, usize>,
}

impl ProcessingStats {
    /// Creates counters with every outcome at zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in LineOutcome::iter() {
            outcomes.insert(outcome, 0);
        }
        ProcessingStats { outcomes }
    }

    /// Records one line with the given outcome.
    pub fn record(&mut self, outcome: LineOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of lines recorded with `outcome`.
    pub fn count(&self, outcome: LineOutcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of lines read, including skipped ones.
    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Number of triples written to the output.
    pub fn written(&self) -> usize {
        self.count(LineOutcome::Ranked) + self.count(LineOutcome::Unranked)
    }

    /// Logs a one-line-per-outcome summary, skipping zero counts.
    pub fn log_summary(&self) {
        log::info!(
            "Processed {} lines, wrote {} results",
            self.total(),
            self.written()
        );
        for outcome in LineOutcome::iter() {
            let count = self.count(outcome);
            if count > 0 {
                log::info!("   {}: {}", outcome, count);
            }
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
