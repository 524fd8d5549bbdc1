//! Poll aggregate
//!
//! The poll owns its ballot ledger. All ballot mutations go through the
//! aggregate so the unique-(user, option) invariant and the activity
//! checks hold no matter which caller performs them; the persistence
//! adapter serializes concurrent mutations around these methods.

use super::consensus::{ConsensusConfig, ConsensusEvaluation, evaluate};
use super::tally::VoteTally;
use super::vote::Vote;
use crate::core::error::DomainError;
use crate::hangout::entities::PlanOption;
use crate::hangout::value_objects::{HangoutId, OptionId, PollId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollStatus {
    /// Accepting ballots
    Active,
    /// Finalized; a plan was locked in
    Completed,
    /// Abandoned by the creator; no plan will be produced
    Cancelled,
}

impl PollStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PollStatus::Active => "ACTIVE",
            PollStatus::Completed => "COMPLETED",
            PollStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The voting round attached to a hangout with more than one option (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub hangout_id: HangoutId,
    pub status: PollStatus,
    /// Candidate options in creation order (also the tie-break order)
    pub options: Vec<PlanOption>,
    pub votes: Vec<Vote>,
    pub config: ConsensusConfig,
    pub expires_at: Option<DateTime<Utc>>,
    /// Bumped by every mutation; finalization is guarded against stale reads
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    /// Open a new poll with an empty ballot ledger
    pub fn new(
        id: PollId,
        hangout_id: HangoutId,
        options: Vec<PlanOption>,
        config: ConsensusConfig,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            hangout_id,
            status: PollStatus::Active,
            options,
            votes: Vec::new(),
            config,
            expires_at: None,
            version: 0,
            created_at,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    // ==================== Queries ====================

    pub fn is_active(&self) -> bool {
        self.status == PollStatus::Active
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    pub fn has_option(&self, option_id: &OptionId) -> bool {
        self.options.iter().any(|o| o.id == *option_id)
    }

    pub fn option(&self, option_id: &OptionId) -> Option<&PlanOption> {
        self.options.iter().find(|o| o.id == *option_id)
    }

    /// Aggregate the current ballot ledger
    pub fn tally(&self) -> VoteTally {
        VoteTally::from_votes(&self.options, &self.votes)
    }

    /// Evaluate the current tally against this poll's configuration
    pub fn evaluate(&self) -> ConsensusEvaluation {
        evaluate(&self.tally(), &self.config)
    }

    /// Check that the poll still accepts ballots
    pub fn ensure_votable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::PollClosed);
        }
        if self.is_expired(now) {
            return Err(DomainError::PollExpired);
        }
        Ok(())
    }

    // ==================== Ballot mutations ====================

    /// Flip the ballot for (user, option)
    ///
    /// Inserts the vote if absent and returns `true`; removes it if
    /// present and returns `false`. With single-choice configuration an
    /// insert first clears the user's other ballots (the vote moves
    /// rather than stacks).
    pub fn toggle_vote(
        &mut self,
        user_id: &UserId,
        option_id: &OptionId,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.ensure_votable(now)?;
        if !self.has_option(option_id) {
            return Err(DomainError::UnknownOption);
        }

        let existing = self.votes.iter().position(|v| v.is_for(user_id, option_id));
        let cast = match existing {
            Some(index) => {
                self.votes.remove(index);
                false
            }
            None => {
                if !self.config.allow_multiple() {
                    self.votes.retain(|v| v.user_id != *user_id);
                }
                self.votes
                    .push(Vote::new(user_id.clone(), option_id.clone(), now));
                true
            }
        };

        self.version += 1;
        Ok(cast)
    }

    /// Mark (user, option) as the user's preferred choice
    ///
    /// Clears any other preferred flag the user holds on this poll, then
    /// upserts the ballot with `is_preferred` set. Returns `true` when a
    /// new ballot row was created, `false` when an existing one was
    /// re-flagged.
    pub fn set_preferred(
        &mut self,
        user_id: &UserId,
        option_id: &OptionId,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.ensure_votable(now)?;
        if !self.has_option(option_id) {
            return Err(DomainError::UnknownOption);
        }

        if !self.config.allow_multiple() {
            self.votes
                .retain(|v| v.user_id != *user_id || v.option_id == *option_id);
        }
        for vote in self.votes.iter_mut().filter(|v| v.user_id == *user_id) {
            vote.is_preferred = false;
        }

        let cast = match self.votes.iter_mut().find(|v| v.is_for(user_id, option_id)) {
            Some(vote) => {
                vote.is_preferred = true;
                false
            }
            None => {
                self.votes
                    .push(Vote::new(user_id.clone(), option_id.clone(), now).preferred());
                true
            }
        };

        self.version += 1;
        Ok(cast)
    }

    // ==================== Lifecycle transitions ====================

    /// Lock the poll after finalization; no further ballots are accepted
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::PollClosed);
        }
        self.status = PollStatus::Completed;
        self.version += 1;
        Ok(())
    }

    /// Abandon the poll; no plan will be produced
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::PollClosed);
        }
        self.status = PollStatus::Cancelled;
        self.version += 1;
        Ok(())
    }
}
