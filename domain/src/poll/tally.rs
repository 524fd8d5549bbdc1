//! Per-option ballot aggregation
//!
//! A tally preserves option creation order, which is also the documented
//! tie-break: when two options hold the same count, the first-encountered
//! one leads. This keeps evaluation results reproducible across calls.

use super::vote::Vote;
use crate::hangout::entities::PlanOption;
use crate::hangout::value_objects::OptionId;
use serde::{Deserialize, Serialize};

/// Vote count for a single option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option_id: OptionId,
    pub votes: usize,
}

/// Aggregated ballots of one poll, in option creation order
///
/// # Example
///
/// ```
/// use gatherly_domain::{OptionId, VoteTally};
///
/// let tally = VoteTally::from_counts([
///     (OptionId::new("a"), 3),
///     (OptionId::new("b"), 3),
/// ]);
///
/// assert_eq!(tally.total_votes(), 6);
/// // Stable tie-break: the first-encountered maximum leads
/// assert_eq!(tally.leading().unwrap().option_id, OptionId::new("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    counts: Vec<OptionCount>,
    total: usize,
}

impl VoteTally {
    /// Aggregate ballots over a poll's option list
    ///
    /// Options keep their creation order; ballots for unknown options are
    /// not counted (the aggregate rejects them before they are stored).
    pub fn from_votes(options: &[PlanOption], votes: &[Vote]) -> Self {
        let counts: Vec<OptionCount> = options
            .iter()
            .map(|option| OptionCount {
                option_id: option.id.clone(),
                votes: votes.iter().filter(|v| v.option_id == option.id).count(),
            })
            .collect();
        let total = counts.iter().map(|c| c.votes).sum();

        Self { counts, total }
    }

    /// Build a tally directly from (option, count) pairs
    pub fn from_counts(pairs: impl IntoIterator<Item = (OptionId, usize)>) -> Self {
        let counts: Vec<OptionCount> = pairs
            .into_iter()
            .map(|(option_id, votes)| OptionCount { option_id, votes })
            .collect();
        let total = counts.iter().map(|c| c.votes).sum();

        Self { counts, total }
    }

    /// Sum of votes across all options
    pub fn total_votes(&self) -> usize {
        self.total
    }

    /// Per-option counts in option creation order
    pub fn counts(&self) -> &[OptionCount] {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Votes recorded for one option (0 if the option is unknown)
    pub fn count_for(&self, option_id: &OptionId) -> usize {
        self.counts
            .iter()
            .find(|c| c.option_id == *option_id)
            .map(|c| c.votes)
            .unwrap_or(0)
    }

    /// The option with the maximum vote count
    ///
    /// Ties break to the first-encountered option in creation order; a
    /// later option must hold a strictly greater count to take the lead.
    pub fn leading(&self) -> Option<&OptionCount> {
        let mut leading: Option<&OptionCount> = None;
        for count in &self.counts {
            match leading {
                Some(current) if count.votes <= current.votes => {}
                _ => leading = Some(count),
            }
        }
        leading
    }

    /// An option's share of all votes, as a percentage (0 when empty)
    pub fn percentage_for(&self, option_id: &OptionId) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count_for(option_id) as f64 * 100.0 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hangout::value_objects::UserId;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn option(id: &str) -> PlanOption {
        PlanOption::new(OptionId::new(id), format!("Option {}", id)).unwrap()
    }

    #[test]
    fn test_from_votes_preserves_option_order() {
        let options = vec![option("a"), option("b"), option("c")];
        let votes = vec![
            Vote::new(UserId::new("u-1"), OptionId::new("b"), t0()),
            Vote::new(UserId::new("u-2"), OptionId::new("b"), t0()),
            Vote::new(UserId::new("u-3"), OptionId::new("a"), t0()),
        ];

        let tally = VoteTally::from_votes(&options, &votes);
        let ids: Vec<&str> = tally.counts().iter().map(|c| c.option_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(tally.count_for(&OptionId::new("a")), 1);
        assert_eq!(tally.count_for(&OptionId::new("b")), 2);
        assert_eq!(tally.count_for(&OptionId::new("c")), 0);
        assert_eq!(tally.total_votes(), 3);
    }

    #[test]
    fn test_leading_picks_maximum() {
        let tally = VoteTally::from_counts([
            (OptionId::new("a"), 1),
            (OptionId::new("b"), 4),
            (OptionId::new("c"), 2),
        ]);

        assert_eq!(tally.leading().unwrap().option_id, OptionId::new("b"));
    }

    #[test]
    fn test_leading_tie_breaks_to_first_encountered() {
        let tally =
            VoteTally::from_counts([(OptionId::new("a"), 3), (OptionId::new("b"), 3)]);

        // Deterministic on repeated calls with identical input
        for _ in 0..10 {
            assert_eq!(tally.leading().unwrap().option_id, OptionId::new("a"));
        }
    }

    #[test]
    fn test_empty_tally() {
        let tally = VoteTally::from_counts([(OptionId::new("a"), 0)]);
        assert!(tally.is_empty());
        assert_eq!(tally.leading().unwrap().votes, 0);
        assert_eq!(tally.percentage_for(&OptionId::new("a")), 0.0);
    }

    #[test]
    fn test_percentage() {
        let tally =
            VoteTally::from_counts([(OptionId::new("a"), 6), (OptionId::new("b"), 4)]);

        assert_eq!(tally.percentage_for(&OptionId::new("a")), 60.0);
        assert_eq!(tally.percentage_for(&OptionId::new("b")), 40.0);
        assert_eq!(tally.percentage_for(&OptionId::new("zzz")), 0.0);
    }
}
