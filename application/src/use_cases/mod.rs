//! Use cases exposed to API-route and CLI callers

pub mod cancel_poll;
pub mod cast_vote;
pub mod create_hangout;
pub mod finalize_plan;
pub mod poll_state;
pub mod rsvp;

#[cfg(test)]
pub(crate) mod support {
    //! Shared store double for use case tests

    use crate::ports::store::{HangoutStore, StoreError, VoteOutcome};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use gatherly_domain::{
        DomainError, FinalPlan, Hangout, HangoutId, OptionId, Poll, PollId, RsvpStatus, UserId,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct State {
        hangouts: HashMap<String, Hangout>,
        polls: HashMap<String, Poll>,
        plans: HashMap<String, FinalPlan>,
    }

    /// Plain in-memory double; serialization comes from one mutex
    #[derive(Default)]
    pub struct TestStore {
        state: Mutex<State>,
        /// When set, `commit_finalization` fails before applying anything
        pub fail_finalization: AtomicBool,
    }

    impl TestStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn poll_snapshot(&self, id: &PollId) -> Option<Poll> {
            self.state.lock().unwrap().polls.get(id.as_str()).cloned()
        }

        pub fn hangout_snapshot(&self, id: &HangoutId) -> Option<Hangout> {
            self.state.lock().unwrap().hangouts.get(id.as_str()).cloned()
        }

        pub fn plan_snapshot(&self, hangout_id: &HangoutId) -> Option<FinalPlan> {
            self.state
                .lock()
                .unwrap()
                .plans
                .get(hangout_id.as_str())
                .cloned()
        }
    }

    #[async_trait]
    impl HangoutStore for TestStore {
        async fn insert_hangout(&self, hangout: Hangout) -> Result<(), StoreError> {
            self.state
                .lock()
                .unwrap()
                .hangouts
                .insert(hangout.id.to_string(), hangout);
            Ok(())
        }

        async fn insert_poll(&self, poll: Poll) -> Result<(), StoreError> {
            self.state
                .lock()
                .unwrap()
                .polls
                .insert(poll.id.to_string(), poll);
            Ok(())
        }

        async fn insert_final_plan(&self, plan: FinalPlan) -> Result<(), StoreError> {
            let mut state = self.state.lock().unwrap();
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
            let mut state = self.state.lock().unwrap();
            let hangout = state
                .hangouts
                .get_mut(hangout_id.as_str())
                .ok_or(StoreError::NotFound)?;
            hangout.respond_rsvp(user_id, status)?;
            Ok(hangout.clone())
        }

        async fn hangout(&self, id: &HangoutId) -> Result<Option<Hangout>, StoreError> {
            Ok(self.hangout_snapshot(id))
        }

        async fn poll(&self, id: &PollId) -> Result<Option<Poll>, StoreError> {
            Ok(self.poll_snapshot(id))
        }

        async fn poll_for_hangout(&self, id: &HangoutId) -> Result<Option<Poll>, StoreError> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .polls
                .values()
                .find(|p| p.hangout_id == *id)
                .cloned())
        }

        async fn final_plan(
            &self,
            hangout_id: &HangoutId,
        ) -> Result<Option<FinalPlan>, StoreError> {
            Ok(self.plan_snapshot(hangout_id))
        }

        async fn toggle_vote(
            &self,
            poll_id: &PollId,
            user_id: &UserId,
            option_id: &OptionId,
            at: DateTime<Utc>,
        ) -> Result<VoteOutcome, StoreError> {
            let mut state = self.state.lock().unwrap();
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
            let mut state = self.state.lock().unwrap();
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
            if self.fail_finalization.load(Ordering::Relaxed) {
                return Err(StoreError::Io("injected finalization failure".to_string()));
            }

            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;
            if state.plans.contains_key(plan.hangout_id.as_str()) {
                return Err(StoreError::Domain(DomainError::AlreadyFinalized));
            }
            let poll = state
                .polls
                .get_mut(poll_id.as_str())
                .ok_or(StoreError::NotFound)?;
            if poll.version != expected_version {
                return Err(StoreError::VersionConflict);
            }
            poll.complete()?;
            let snapshot = poll.clone();

            let hangout = state
                .hangouts
                .get_mut(plan.hangout_id.as_str())
                .ok_or(StoreError::NotFound)?;
            hangout.seed_rsvps();
            hangout.confirm()?;
            state.plans.insert(plan.hangout_id.to_string(), plan);

            Ok(snapshot)
        }

        async fn cancel_poll(&self, poll_id: &PollId) -> Result<Poll, StoreError> {
            let mut state = self.state.lock().unwrap();
            let poll = state
                .polls
                .get_mut(poll_id.as_str())
                .ok_or(StoreError::NotFound)?;
            poll.cancel()?;
            Ok(poll.clone())
        }
    }
}
