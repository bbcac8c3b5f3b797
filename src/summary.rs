use crate::types::StarOutcome;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: usize,
    pub fail_count: usize,
    pub skip_count: usize,
    pub already_starred_count: usize,
    pub newly_starred_count: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        RunSummary {
            total,
            ..Default::default()
        }
    }

    pub fn record_star(&mut self, outcome: &StarOutcome) {
        match outcome {
            StarOutcome::AlreadyStarred => {
                self.success_count += 1;
                self.already_starred_count += 1;
            }
            StarOutcome::Starred => {
                self.success_count += 1;
                self.newly_starred_count += 1;
            }
            StarOutcome::Failed(_) => self.fail_count += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.fail_count += 1;
    }

    pub fn record_skip(&mut self) {
        self.skip_count += 1;
    }

    /// One star-status check plus one star request per repository.
    pub fn estimated_requests(&self) -> usize {
        self.total * 2
    }

    /// Percentage of repositories handled successfully, rounded to the nearest integer.
    pub fn success_rate(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }

        Some((self.success_count as f64 / self.total as f64 * 100.0).round() as u32)
    }
}
