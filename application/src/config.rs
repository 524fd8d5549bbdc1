//! Planning defaults
//!
//! Values applied when a hangout is created without explicit per-poll
//! configuration. Set at initialization (usually from the configuration
//! file) and static afterwards.

use gatherly_domain::{ConsensusConfig, hangout::flow::DEFAULT_VOTING_WINDOW_HOURS};

/// Defaults applied to newly created hangouts and polls
#[derive(Debug, Clone, Default)]
pub struct PlanningDefaults {
    consensus: ConsensusConfig,
    voting_window_hours: Option<i64>,
}

impl PlanningDefaults {
    pub fn new(consensus: ConsensusConfig) -> Self {
        Self {
            consensus,
            voting_window_hours: None,
        }
    }

    pub fn with_voting_window_hours(mut self, hours: i64) -> Self {
        self.voting_window_hours = Some(hours);
        self
    }

    /// Consensus configuration for polls created without one
    pub fn consensus(&self) -> &ConsensusConfig {
        &self.consensus
    }

    /// Hours a poll stays open before its voting deadline
    pub fn voting_window_hours(&self) -> i64 {
        self.voting_window_hours
            .unwrap_or(DEFAULT_VOTING_WINDOW_HOURS)
    }
}
