//! Persistence port
//!
//! The store is the only place where concurrent requests meet: ballot
//! mutations and finalization are exposed as serialized primitives so the
//! unique-vote invariant and the all-or-nothing finalization guarantee
//! hold under racing callers. Implementations live in the infrastructure
//! layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatherly_domain::{
    DomainError, FinalPlan, Hangout, HangoutId, OptionId, Poll, PollId, RsvpStatus, UserId,
};
use thiserror::Error;

/// Errors surfaced by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A guarded mutation lost its race: the aggregate changed between
    /// the caller's read and the commit
    #[error("version conflict")]
    VersionConflict,

    /// The aggregate rejected the mutation (re-checked under the store's
    /// serialization, so racing callers cannot bypass the rule)
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Io(String),
}

/// Result of a serialized ballot mutation
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    /// True if a ballot row was created, false if one was removed or
    /// merely re-flagged
    pub vote_cast: bool,
    /// Poll snapshot after the mutation
    pub poll: Poll,
}

/// Persistence contract for hangouts, polls, and final plans
#[async_trait]
pub trait HangoutStore: Send + Sync {
    // ==================== Writes ====================

    async fn insert_hangout(&self, hangout: Hangout) -> Result<(), StoreError>;

    async fn insert_poll(&self, poll: Poll) -> Result<(), StoreError>;

    async fn insert_final_plan(&self, plan: FinalPlan) -> Result<(), StoreError>;

    /// Record a participant's RSVP answer; returns the updated hangout
    async fn update_rsvp(
        &self,
        hangout_id: &HangoutId,
        user_id: &UserId,
        status: RsvpStatus,
    ) -> Result<Hangout, StoreError>;

    // ==================== Reads ====================

    async fn hangout(&self, id: &HangoutId) -> Result<Option<Hangout>, StoreError>;

    async fn poll(&self, id: &PollId) -> Result<Option<Poll>, StoreError>;

    async fn poll_for_hangout(&self, id: &HangoutId) -> Result<Option<Poll>, StoreError>;

    async fn final_plan(&self, hangout_id: &HangoutId) -> Result<Option<FinalPlan>, StoreError>;

    // ==================== Serialized primitives ====================

    /// Flip the ballot for (user, option) under the store's serialization
    ///
    /// Concurrent calls for the same pair must resolve to toggles, never
    /// duplicate rows.
    async fn toggle_vote(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
        option_id: &OptionId,
        at: DateTime<Utc>,
    ) -> Result<VoteOutcome, StoreError>;

    /// Upsert the user's preferred ballot, clearing any other preferred
    /// flag they hold on the poll
    async fn set_preferred_vote(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
        option_id: &OptionId,
        at: DateTime<Utc>,
    ) -> Result<VoteOutcome, StoreError>;

    /// All-or-nothing finalization
    ///
    /// In one atomic commit: verify the poll's version against
    /// `expected_version` (rejecting stale reads with
    /// [`StoreError::VersionConflict`]), mark the poll COMPLETED, record
    /// the final plan, seed a PENDING RSVP for every participant, and
    /// confirm the hangout. On any failure nothing is applied.
    async fn commit_finalization(
        &self,
        poll_id: &PollId,
        expected_version: u64,
        plan: FinalPlan,
    ) -> Result<Poll, StoreError>;

    /// Abandon an active poll; returns the updated poll
    async fn cancel_poll(&self, poll_id: &PollId) -> Result<Poll, StoreError>;
}
