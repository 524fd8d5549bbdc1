//! Poll state query
//!
//! Read-only snapshot of a poll's tally and consensus evaluation, shaped
//! for UI callers. Evaluation happens on every read; no mutation.

use crate::error::CoreError;
use crate::ports::store::HangoutStore;
use chrono::{DateTime, Utc};
use gatherly_domain::{HangoutId, OptionId, Poll, PollId, PollStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-option slice of a poll state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionStateView {
    pub option_id: OptionId,
    pub title: String,
    pub vote_count: usize,
    /// Share of all votes, in percent (0 when the poll is empty)
    pub percentage: f64,
}

/// Snapshot of a poll's tally and consensus evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollStateView {
    pub poll_id: PollId,
    pub hangout_id: HangoutId,
    pub status: PollStatus,
    pub options: Vec<OptionStateView>,
    pub total_votes: usize,
    pub consensus_reached: bool,
    pub consensus_level: f64,
    pub leading_option: Option<OptionId>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Pass this back to finalize to guard against stale reads
    pub version: u64,
}

impl PollStateView {
    pub fn from_poll(poll: &Poll) -> Self {
        let tally = poll.tally();
        let evaluation = poll.evaluate();

        let options = poll
            .options
            .iter()
            .map(|option| OptionStateView {
                option_id: option.id.clone(),
                title: option.title.clone(),
                vote_count: tally.count_for(&option.id),
                percentage: tally.percentage_for(&option.id),
            })
            .collect();

        Self {
            poll_id: poll.id.clone(),
            hangout_id: poll.hangout_id.clone(),
            status: poll.status,
            options,
            total_votes: evaluation.total_votes,
            consensus_reached: evaluation.consensus_reached,
            consensus_level: evaluation.consensus_level,
            leading_option: evaluation.leading_option,
            expires_at: poll.expires_at,
            version: poll.version,
        }
    }
}

/// Use case for reading poll state
pub struct PollStateUseCase<S: HangoutStore> {
    store: Arc<S>,
}

impl<S: HangoutStore> PollStateUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, poll_id: &PollId) -> Result<PollStateView, CoreError> {
        let poll = self
            .store
            .poll(poll_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("poll {} not found", poll_id)))?;

        Ok(PollStateView::from_poll(&poll))
    }
}
