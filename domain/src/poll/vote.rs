//! Ballot types for hangout polls
//!
//! A vote is a (user, option) pair; a user may hold votes on several
//! options of the same poll when multi-select is allowed, but at most one
//! of their votes can be flagged preferred.

use crate::hangout::value_objects::{OptionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single ballot cast against a poll option
///
/// Uniqueness invariant: at most one vote per (user, option) pair.
/// Re-casting for the same option removes the ballot (toggle semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: UserId,
    pub option_id: OptionId,
    /// Marks the user's single favorite among their votes
    pub is_preferred: bool,
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    /// Create a plain ballot
    pub fn new(user_id: UserId, option_id: OptionId, cast_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            option_id,
            is_preferred: false,
            cast_at,
        }
    }

    /// Flag this ballot as the user's preferred choice
    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }

    /// Check whether this ballot belongs to the given (user, option) pair
    pub fn is_for(&self, user_id: &UserId, option_id: &OptionId) -> bool {
        self.user_id == *user_id && self.option_id == *option_id
    }
}

/// Requested ballot mutation
///
/// `Vote` and `Toggle` are synonyms: both flip the ballot for the given
/// option. `Preferred` additionally clears any other preferred flag the
/// user holds on the poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    #[default]
    Vote,
    Toggle,
    Preferred,
}

impl VoteAction {
    pub fn as_str(&self) -> &str {
        match self {
            VoteAction::Vote => "vote",
            VoteAction::Toggle => "toggle",
            VoteAction::Preferred => "preferred",
        }
    }
}

impl std::fmt::Display for VoteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vote" => Ok(VoteAction::Vote),
            "toggle" => Ok(VoteAction::Toggle),
            "preferred" => Ok(VoteAction::Preferred),
            _ => Err(format!(
                "Unknown vote action: {}. Valid: vote, toggle, preferred",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_vote_creation() {
        let vote = Vote::new(UserId::new("u-1"), OptionId::new("opt-1"), t0());
        assert!(!vote.is_preferred);
        assert!(vote.is_for(&UserId::new("u-1"), &OptionId::new("opt-1")));
        assert!(!vote.is_for(&UserId::new("u-1"), &OptionId::new("opt-2")));
    }

    #[test]
    fn test_preferred_builder() {
        let vote = Vote::new(UserId::new("u-1"), OptionId::new("opt-1"), t0()).preferred();
        assert!(vote.is_preferred);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("vote".parse::<VoteAction>().ok(), Some(VoteAction::Vote));
        assert_eq!("TOGGLE".parse::<VoteAction>().ok(), Some(VoteAction::Toggle));
        assert_eq!(
            "preferred".parse::<VoteAction>().ok(),
            Some(VoteAction::Preferred)
        );
        assert!("upvote".parse::<VoteAction>().is_err());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(VoteAction::Vote.to_string(), "vote");
        assert_eq!(VoteAction::Preferred.to_string(), "preferred");
    }
}
