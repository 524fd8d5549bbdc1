//! Configuration file schema
//!
//! Maps `gatherly.toml` onto validated planning defaults. Every section
//! and field is optional; missing values fall back to the defaults below.

use gatherly_application::PlanningDefaults;
use gatherly_domain::{ConsensusConfig, DomainError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub consensus: ConsensusSection,
    pub voting: VotingSection,
    pub events: EventsSection,
}

/// `[consensus]` section: defaults for polls created without an override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusSection {
    /// Vote share the leading option must reach, in percent
    pub threshold: f64,
    /// Minimum number of ballots before a decision can stand
    pub min_participants: usize,
    /// Whether a user may hold votes on several options at once
    pub allow_multiple: bool,
}

impl Default for ConsensusSection {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            min_participants: 1,
            allow_multiple: true,
        }
    }
}

/// `[voting]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingSection {
    /// Hours a poll stays open after creation
    pub window_hours: i64,
}

impl Default for VotingSection {
    fn default() -> Self {
        Self { window_hours: 48 }
    }
}

/// `[events]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EventsSection {
    /// Where to append the JSONL plan event log; disabled when unset
    pub log_path: Option<PathBuf>,
}

impl FileConfig {
    /// Convert the file values into validated planning defaults
    ///
    /// Returns [`DomainError::InvalidConfig`] for an out-of-range
    /// threshold or a zero minimum, so a bad file fails at startup
    /// instead of at the first poll.
    pub fn planning_defaults(&self) -> Result<PlanningDefaults, DomainError> {
        let mut consensus =
            ConsensusConfig::new(self.consensus.threshold, self.consensus.min_participants)?;
        if !self.consensus.allow_multiple {
            consensus = consensus.single_choice();
        }
        Ok(PlanningDefaults::new(consensus).with_voting_window_hours(self.voting.window_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        let defaults = config.planning_defaults().unwrap();

        assert_eq!(defaults.consensus().threshold(), 50.0);
        assert_eq!(defaults.consensus().min_participants(), 1);
        assert!(defaults.consensus().allow_multiple());
        assert_eq!(defaults.voting_window_hours(), 48);
        assert!(config.events.log_path.is_none());
    }

    #[test]
    fn test_single_choice_mapping() {
        let config = FileConfig {
            consensus: ConsensusSection {
                allow_multiple: false,
                ..Default::default()
            },
            ..Default::default()
        };

        let defaults = config.planning_defaults().unwrap();
        assert!(!defaults.consensus().allow_multiple());
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let config = FileConfig {
            consensus: ConsensusSection {
                threshold: 150.0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.planning_defaults().is_err());
    }
}
