//! Consensus evaluation
//!
//! Decides, from a tally and per-poll configuration, whether a poll has
//! reached a decision. Evaluation is a pure function: callers supply the
//! tally and config, and it performs no I/O.

use super::tally::VoteTally;
use crate::core::error::DomainError;
use crate::hangout::value_objects::OptionId;
use serde::{Deserialize, Serialize};

/// Per-poll consensus configuration
///
/// Supplied at poll-creation time; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Vote share the leading option must reach, in percent (0-100)
    threshold: f64,
    /// Minimum number of ballots before a decision can stand
    min_participants: usize,
    /// Whether a user may hold votes on several options at once
    allow_multiple: bool,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            min_participants: 1,
            allow_multiple: true,
        }
    }
}

impl ConsensusConfig {
    /// Create a validated configuration
    ///
    /// Returns [`DomainError::InvalidConfig`] if the threshold falls
    /// outside 0-100 or `min_participants` is zero.
    pub fn new(threshold: f64, min_participants: usize) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(DomainError::InvalidConfig(format!(
                "threshold must be between 0 and 100, got {}",
                threshold
            )));
        }
        if min_participants == 0 {
            return Err(DomainError::InvalidConfig(
                "min_participants must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            threshold,
            min_participants,
            allow_multiple: true,
        })
    }

    /// Restrict users to one vote per poll (casting again moves the vote)
    pub fn single_choice(mut self) -> Self {
        self.allow_multiple = false;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_participants(&self) -> usize {
        self.min_participants
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }
}

/// Outcome of a consensus evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEvaluation {
    /// True once the ballot count and the leading share both clear the bar
    pub consensus_reached: bool,
    /// Option currently in the lead (None on an empty tally)
    pub leading_option: Option<OptionId>,
    /// Leading option's share of all votes, in percent (0 when empty)
    pub consensus_level: f64,
    pub total_votes: usize,
}

/// Evaluate a tally against its configuration
///
/// The leading option is the first-encountered maximum in option creation
/// order (see [`VoteTally::leading`]); consensus is reached when
/// `total_votes >= min_participants` and the leading share meets the
/// threshold.
///
/// # Example
///
/// ```
/// use gatherly_domain::{ConsensusConfig, OptionId, VoteTally, evaluate};
///
/// let tally = VoteTally::from_counts([
///     (OptionId::new("a"), 6),
///     (OptionId::new("b"), 4),
/// ]);
/// let config = ConsensusConfig::new(60.0, 5).unwrap();
///
/// let eval = evaluate(&tally, &config);
/// assert!(eval.consensus_reached);
/// assert_eq!(eval.consensus_level, 60.0);
/// assert_eq!(eval.leading_option, Some(OptionId::new("a")));
/// ```
pub fn evaluate(tally: &VoteTally, config: &ConsensusConfig) -> ConsensusEvaluation {
    let total_votes = tally.total_votes();
    let leading = tally.leading();

    let consensus_level = match leading {
        Some(count) if total_votes > 0 => count.votes as f64 * 100.0 / total_votes as f64,
        _ => 0.0,
    };

    let consensus_reached =
        total_votes >= config.min_participants() && consensus_level >= config.threshold();

    ConsensusEvaluation {
        consensus_reached,
        leading_option: leading.map(|c| c.option_id.clone()),
        consensus_level,
        total_votes,
    }
}
