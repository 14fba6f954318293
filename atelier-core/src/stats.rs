//! Summary figures shown above list views.

use crate::workflow::StatusWorkflow;
use std::collections::HashMap;

/// Items per status, for summary badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts<S: StatusWorkflow> {
    counts: HashMap<S, usize>,
    total: usize,
}

impl<S: StatusWorkflow> Default for StatusCounts<S> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<S: StatusWorkflow> StatusCounts<S> {
    pub fn get(&self, status: S) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// One entry per variant in declaration order, zeros included.
    pub fn entries(&self) -> Vec<(S, usize)> {
        S::variants()
            .iter()
            .map(|status| (*status, self.get(*status)))
            .collect()
    }
}

pub fn tally<S: StatusWorkflow>(
    statuses: impl IntoIterator<Item = S>,
) -> StatusCounts<S> {
    let mut counts = StatusCounts::default();
    for status in statuses {
        *counts.counts.entry(status).or_insert(0) += 1;
        counts.total += 1;
    }
    counts
}

/// Funding progress in whole percent, clamped to `0..=100`. Zero when the
/// goal is not positive.
pub fn progress_percent(current: f64, goal: f64) -> u8 {
    if goal.is_nan() || goal <= 0.0 || !current.is_finite() {
        return 0;
    }
    (current / goal * 100.0).clamp(0.0, 100.0).floor() as u8
}

/// `part / whole` as a percentage with one decimal, 0 for an empty whole.
pub fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::SubmissionStatus;

    #[test]
    fn tally_counts_each_status() {
        let counts = tally([
            SubmissionStatus::Pending,
            SubmissionStatus::Accepted,
            SubmissionStatus::Pending,
        ]);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get(SubmissionStatus::Pending), 2);
        assert_eq!(counts.get(SubmissionStatus::Rejected), 0);
        assert_eq!(counts.entries().len(), SubmissionStatus::all().len());
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(250.0, 1000.0), 25);
        assert_eq!(progress_percent(1500.0, 1000.0), 100);
        assert_eq!(progress_percent(-5.0, 1000.0), 0);
        assert_eq!(progress_percent(10.0, 0.0), 0);
    }

    #[test]
    fn percent_of_rounds_to_one_decimal() {
        assert_eq!(percent_of(1, 3), 33.3);
        assert_eq!(percent_of(5, 0), 0.0);
    }
}
