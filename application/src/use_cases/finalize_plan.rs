//! Finalize Plan use case
//!
//! The one-way POLLING→CONFIRMED transition. Preconditions are re-read at
//! call time, and the commit itself is version-guarded inside the store's
//! atomic primitive: a second finalization racing against the first either
//! sees the poll already completed or loses the version check. Either the
//! whole transition applies (poll locked, plan recorded, RSVPs seeded) or
//! none of it does.

use crate::error::CoreError;
use crate::ports::clock::Clock;
use crate::ports::notifier::{NoNotifier, PlanEvent, PlanNotifier};
use crate::ports::store::HangoutStore;
use gatherly_domain::{FinalPlan, PollId, UserId};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the FinalizePlan use case
#[derive(Debug, Clone)]
pub struct FinalizePlanInput {
    pub poll_id: PollId,
    pub user_id: UserId,
}

impl FinalizePlanInput {
    pub fn new(poll_id: PollId, user_id: UserId) -> Self {
        Self { poll_id, user_id }
    }
}

/// Use case for locking in a winning option
pub struct FinalizePlanUseCase<S: HangoutStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn PlanNotifier>,
}

impl<S: HangoutStore> FinalizePlanUseCase<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            notifier: Arc::new(NoNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn PlanNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub async fn execute(&self, input: FinalizePlanInput) -> Result<FinalPlan, CoreError> {
        let poll = self
            .store
            .poll(&input.poll_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("poll {} not found", input.poll_id)))?;

        let hangout = self.store.hangout(&poll.hangout_id).await?.ok_or_else(|| {
            CoreError::internal(format!("hangout {} missing for poll", poll.hangout_id))
        })?;

        if !hangout.is_member(&input.user_id) {
            return Err(CoreError::forbidden(
                "only participants may finalize this hangout",
            ));
        }
        if !poll.is_active() {
            return Err(CoreError::bad_request("poll is not active"));
        }

        let evaluation = poll.evaluate();
        if !evaluation.consensus_reached {
            return Err(CoreError::bad_request(format!(
                "consensus not reached: {:.1}% of {} votes (need {:.0}% of at least {})",
                evaluation.consensus_level,
                evaluation.total_votes,
                poll.config.threshold(),
                poll.config.min_participants(),
            )));
        }
        let winning = evaluation
            .leading_option
            .clone()
            .ok_or_else(|| CoreError::internal("consensus reached with no leading option"))?;

        let plan = FinalPlan::from_evaluation(
            poll.hangout_id.clone(),
            poll.id.clone(),
            winning,
            &evaluation,
            input.user_id.clone(),
            self.clock.now(),
        );

        // Version guard: reject if the tally moved since the read above
        let committed = self
            .store
            .commit_finalization(&input.poll_id, poll.version, plan.clone())
            .await;
        if let Err(err) = &committed {
            warn!("Finalization of poll {} failed: {}", input.poll_id, err);
        }
        committed?;

        info!(
            "Poll {} finalized on option {} at {:.1}% ({} votes)",
            input.poll_id, plan.option_id, plan.consensus_level, plan.total_votes
        );

        let confirmed = self.store.hangout(&poll.hangout_id).await?;
        self.notifier.notify(PlanEvent::plan_finalized(&plan));
        if let Some(hangout) = &confirmed {
            self.notifier.notify(PlanEvent::rsvp_requested(hangout));
        }

        Ok(plan)
    }
}
