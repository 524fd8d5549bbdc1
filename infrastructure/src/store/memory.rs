//! In-memory store adapter
//!
//! A single mutex serializes every mutation, which is what upholds the
//! unique-vote invariant under concurrent callers. Multi-aggregate
//! commits (finalization) run on a working copy of the state that is
//! swapped in only after every step succeeds, so a failure at any point
//! leaves the store untouched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatherly_application::{HangoutStore, StoreError, VoteOutcome};
use gatherly_domain::{
    DomainError, FinalPlan, Hangout, HangoutId, OptionId, Poll, PollId, RsvpStatus, UserId,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default, Clone)]
struct StoreState {
    hangouts: HashMap<String, Hangout>,
    polls: HashMap<String, Poll>,
    /// Final plans keyed by hangout id (one-to-one)
    plans: HashMap<String, FinalPlan>,
}

/// In-memory [`HangoutStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    #[cfg(test)]
    rsvp_seed_fault: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Io("store lock poisoned".to_string()))
    }

    /// Make the next finalization fail between recording the plan and
    /// seeding RSVPs, to exercise the rollback path.
    #[cfg(test)]
    pub(crate) fn inject_rsvp_seed_failure(&self, fail: bool) {
        self.rsvp_seed_fault
            .store(fail, std::sync::atomic::Ordering::Relaxed);
    }

    #[cfg(test)]
    fn maybe_fail_rsvp_seed(&self) -> Result<(), StoreError> {
        if self
            .rsvp_seed_fault
            .load(std::sync::atomic::Ordering::Relaxed)
        {
            return Err(StoreError::Io(
                "injected failure while seeding RSVPs".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn maybe_fail_rsvp_seed(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl HangoutStore for MemoryStore {
    async fn insert_hangout(&self, hangout: Hangout) -> Result<(), StoreError> {
        let mut state = self.locked()?;
        debug!("Inserting hangout {}", hangout.id);
        state.hangouts.insert(hangout.id.to_string(), hangout);
        Ok(())
    }

    async fn insert_poll(&self, poll: Poll) -> Result<(), StoreError> {
        let mut state = self.locked()?;
        debug!("Inserting poll {} for hangout {}", poll.id, poll.hangout_id);
        state.polls.insert(poll.id.to_string(), poll);
        Ok(())
    }

    async fn insert_final_plan(&self, plan: FinalPlan) -> Result<(), StoreError> {
        let mut state = self.locked()?;
        if state.plans.contains_key(plan.hangout_id.as_str()) {
            return Err(StoreError::Domain(DomainError::AlreadyFinalized));
        }
        state.plans.insert(plan.hangout_id.to_string(), plan);
        Ok(())
    }

    async fn update_rsvp(
        &self,
        hangout_id: &HangoutId,
        user_id: &UserId,
        status: RsvpStatus,
    ) -> Result<Hangout, StoreError> {
        let mut state = self.locked()?;
        let hangout = state
            .hangouts
            .get_mut(hangout_id.as_str())
            .ok_or(StoreError::NotFound)?;
        hangout.respond_rsvp(user_id, status)?;
        Ok(hangout.clone())
    }

    async fn hangout(&self, id: &HangoutId) -> Result<Option<Hangout>, StoreError> {
        Ok(self.locked()?.hangouts.get(id.as_str()).cloned())
    }

    async fn poll(&self, id: &PollId) -> Result<Option<Poll>, StoreError> {
        Ok(self.locked()?.polls.get(id.as_str()).cloned())
    }

    async fn poll_for_hangout(&self, id: &HangoutId) -> Result<Option<Poll>, StoreError> {
        Ok(self
            .locked()?
            .polls
            .values()
            .find(|p| p.hangout_id == *id)
            .cloned())
    }

    async fn final_plan(&self, hangout_id: &HangoutId) -> Result<Option<FinalPlan>, StoreError> {
        Ok(self.locked()?.plans.get(hangout_id.as_str()).cloned())
    }

    async fn toggle_vote(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
        option_id: &OptionId,
        at: DateTime<Utc>,
    ) -> Result<VoteOutcome, StoreError> {
        let mut state = self.locked()?;
        let poll = state
            .polls
            .get_mut(poll_id.as_str())
            .ok_or(StoreError::NotFound)?;
        let vote_cast = poll.toggle_vote(user_id, option_id, at)?;
        Ok(VoteOutcome {
            vote_cast,
            poll: poll.clone(),
        })
    }

    async fn set_preferred_vote(
        &self,
        poll_id: &PollId,
        user_id: &UserId,
        option_id: &OptionId,
        at: DateTime<Utc>,
    ) -> Result<VoteOutcome, StoreError> {
        let mut state = self.locked()?;
        let poll = state
            .polls
            .get_mut(poll_id.as_str())
            .ok_or(StoreError::NotFound)?;
        let vote_cast = poll.set_preferred(user_id, option_id, at)?;
        Ok(VoteOutcome {
            vote_cast,
            poll: poll.clone(),
        })
    }

    async fn commit_finalization(
        &self,
        poll_id: &PollId,
        expected_version: u64,
        plan: FinalPlan,
    ) -> Result<Poll, StoreError> {
        let mut guard = self.locked()?;

        // All-or-nothing: apply every step to a working copy and swap it
        // in only once the whole transition has succeeded.
        let mut work = guard.clone();

        {
            let poll = work
                .polls
                .get_mut(poll_id.as_str())
                .ok_or(StoreError::NotFound)?;
            if poll.version != expected_version {
                return Err(StoreError::VersionConflict);
            }
            poll.complete()?;
        }

        if work.plans.contains_key(plan.hangout_id.as_str()) {
            return Err(StoreError::Domain(DomainError::AlreadyFinalized));
        }
        let hangout_key = plan.hangout_id.to_string();
        work.plans.insert(hangout_key.clone(), plan);

        self.maybe_fail_rsvp_seed()?;

        let hangout = work
            .hangouts
            .get_mut(&hangout_key)
            .ok_or(StoreError::NotFound)?;
        hangout.seed_rsvps();
        hangout.confirm()?;

        let committed = work
            .polls
            .get(poll_id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::Io("poll disappeared during finalization".to_string()))?;

        *guard = work;
        debug!("Finalization committed for poll {}", poll_id);
        Ok(committed)
    }

    async fn cancel_poll(&self, poll_id: &PollId) -> Result<Poll, StoreError> {
        let mut state = self.locked()?;
        let poll = state
            .polls
            .get_mut(poll_id.as_str())
            .ok_or(StoreError::NotFound)?;
        poll.cancel()?;
        Ok(poll.clone())
    }
}
