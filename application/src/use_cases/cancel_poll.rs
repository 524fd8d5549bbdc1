//! Cancel Poll use case
//!
//! Creator-only abandonment of an active poll. Cancellation only stops
//! further voting; it never produces a plan and mutates nothing else.

use crate::error::CoreError;
use crate::ports::notifier::{NoNotifier, PlanEvent, PlanNotifier};
use crate::ports::store::HangoutStore;
use gatherly_domain::{Poll, PollId, UserId};
use std::sync::Arc;
use tracing::info;

/// Input for the CancelPoll use case
#[derive(Debug, Clone)]
pub struct CancelPollInput {
    pub poll_id: PollId,
    pub user_id: UserId,
}

impl CancelPollInput {
    pub fn new(poll_id: PollId, user_id: UserId) -> Self {
        Self { poll_id, user_id }
    }
}

/// Use case for abandoning a poll
pub struct CancelPollUseCase<S: HangoutStore> {
    store: Arc<S>,
    notifier: Arc<dyn PlanNotifier>,
}

impl<S: HangoutStore> CancelPollUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            notifier: Arc::new(NoNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn PlanNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub async fn execute(&self, input: CancelPollInput) -> Result<Poll, CoreError> {
        let poll = self
            .store
            .poll(&input.poll_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("poll {} not found", input.poll_id)))?;

        let hangout = self.store.hangout(&poll.hangout_id).await?.ok_or_else(|| {
            CoreError::internal(format!("hangout {} missing for poll", poll.hangout_id))
        })?;

        if hangout.created_by != input.user_id {
            return Err(CoreError::forbidden("only the creator may cancel a poll"));
        }

        let cancelled = self.store.cancel_poll(&input.poll_id).await?;
        info!("Poll {} cancelled by {}", input.poll_id, input.user_id);
        self.notifier.notify(PlanEvent::poll_cancelled(&cancelled));

        Ok(cancelled)
    }
}
