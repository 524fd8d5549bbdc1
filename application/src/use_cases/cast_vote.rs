//! Cast Vote use case
//!
//! Ballot mutations with toggle semantics: casting for an option the user
//! already voted for removes the ballot. Access control follows the parent
//! hangout's privacy level; the activity and option checks run inside the
//! store's serialization so racing callers resolve to clean toggles.

use crate::error::CoreError;
use crate::ports::clock::Clock;
use crate::ports::notifier::{NoNotifier, PlanEvent, PlanNotifier};
use crate::ports::store::HangoutStore;
use crate::use_cases::poll_state::PollStateView;
use gatherly_domain::{OptionId, PollId, UserId, VoteAction};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the CastVote use case
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub poll_id: PollId,
    pub user_id: UserId,
    pub option_id: OptionId,
    pub action: VoteAction,
}

impl CastVoteInput {
    pub fn new(poll_id: PollId, user_id: UserId, option_id: OptionId) -> Self {
        Self {
            poll_id,
            user_id,
            option_id,
            action: VoteAction::default(),
        }
    }

    pub fn with_action(mut self, action: VoteAction) -> Self {
        self.action = action;
        self
    }
}

/// Outcome of a ballot mutation
#[derive(Debug, Clone)]
pub struct VoteReceipt {
    /// True if a ballot row was created, false if one was removed or
    /// merely re-flagged
    pub vote_cast: bool,
    /// Poll state re-evaluated after the mutation
    pub state: PollStateView,
}

/// Use case for casting, toggling, and preferring votes
pub struct CastVoteUseCase<S: HangoutStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn PlanNotifier>,
}

impl<S: HangoutStore> CastVoteUseCase<S> {
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

    pub async fn execute(&self, input: CastVoteInput) -> Result<VoteReceipt, CoreError> {
        let poll = self
            .store
            .poll(&input.poll_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("poll {} not found", input.poll_id)))?;

        let hangout = self.store.hangout(&poll.hangout_id).await?.ok_or_else(|| {
            CoreError::internal(format!("hangout {} missing for poll", poll.hangout_id))
        })?;

        if hangout.privacy.is_private() && !hangout.is_member(&input.user_id) {
            return Err(CoreError::forbidden(
                "only participants may vote on a private hangout",
            ));
        }

        let now = self.clock.now();
        let outcome = match input.action {
            VoteAction::Vote | VoteAction::Toggle => {
                self.store
                    .toggle_vote(&input.poll_id, &input.user_id, &input.option_id, now)
                    .await?
            }
            VoteAction::Preferred => {
                self.store
                    .set_preferred_vote(&input.poll_id, &input.user_id, &input.option_id, now)
                    .await?
            }
        };

        let state = PollStateView::from_poll(&outcome.poll);
        info!(
            "Vote {} on poll {} by {} (cast={}, consensus {:.1}%)",
            input.action, input.poll_id, input.user_id, outcome.vote_cast, state.consensus_level
        );
        if state.consensus_reached {
            debug!("Poll {} has reached consensus", input.poll_id);
        }

        self.notifier.notify(PlanEvent::vote_cast(
            &outcome.poll,
            input.user_id.as_str(),
            input.action,
            outcome.vote_cast,
        ));

        Ok(VoteReceipt {
            vote_cast: outcome.vote_cast,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::use_cases::support::TestStore;
    use chrono::{DateTime, Duration, Utc};
    use gatherly_domain::{
        ConsensusConfig, Hangout, HangoutId, HangoutState, Participant, PlanOption, Poll,
        PrivacyLevel,
    };

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn options() -> Vec<PlanOption> {
        vec![
            PlanOption::new(OptionId::new("a"), "Bowling").unwrap(),
            PlanOption::new(OptionId::new("b"), "Karaoke").unwrap(),
        ]
    }

    async fn seed(store: &TestStore, privacy: PrivacyLevel) -> PollId {
        let hangout = Hangout::new(
            HangoutId::new("hng-1"),
            "Friday night",
            HangoutState::Polling,
            UserId::new("u-1"),
            options(),
            t0(),
        )
        .with_privacy(privacy)
        .with_participants(vec![
            Participant::creator(UserId::new("u-1"), "Alex"),
            Participant::member(UserId::new("u-2"), "Blair"),
        ])
        .with_flow_flags(true, false);

        let poll = Poll::new(
            PollId::new("poll-1"),
            hangout.id.clone(),
            options(),
            ConsensusConfig::new(50.0, 2).unwrap(),
            t0(),
        )
        .with_expiry(t0() + Duration::hours(48));

        store.insert_hangout(hangout).await.unwrap();
        store.insert_poll(poll.clone()).await.unwrap();
        poll.id
    }

    fn use_case(store: Arc<TestStore>) -> CastVoteUseCase<TestStore> {
        CastVoteUseCase::new(store, Arc::new(FixedClock::at(t0())))
    }

    #[tokio::test]
    async fn test_toggle_is_idempotent() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;
        let use_case = use_case(Arc::clone(&store));

        let input = CastVoteInput::new(poll_id.clone(), UserId::new("u-2"), OptionId::new("a"));

        let first = use_case.execute(input.clone()).await.unwrap();
        assert!(first.vote_cast);
        assert_eq!(first.state.total_votes, 1);

        let second = use_case.execute(input).await.unwrap();
        assert!(!second.vote_cast);
        assert_eq!(second.state.total_votes, 0);
    }

    #[tokio::test]
    async fn test_preferred_is_exclusive() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;
        let use_case = use_case(Arc::clone(&store));
        let user = UserId::new("u-2");

        use_case
            .execute(
                CastVoteInput::new(poll_id.clone(), user.clone(), OptionId::new("a"))
                    .with_action(VoteAction::Preferred),
            )
            .await
            .unwrap();
        use_case
            .execute(
                CastVoteInput::new(poll_id.clone(), user.clone(), OptionId::new("b"))
                    .with_action(VoteAction::Preferred),
            )
            .await
            .unwrap();

        let poll = store.poll_snapshot(&poll_id).unwrap();
        let preferred: Vec<_> = poll.votes.iter().filter(|v| v.is_preferred).collect();
        assert_eq!(preferred.len(), 1);
        assert_eq!(preferred[0].option_id, OptionId::new("b"));
    }

    #[tokio::test]
    async fn test_private_hangout_rejects_non_members() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Private).await;

        let err = use_case(store)
            .execute(CastVoteInput::new(
                poll_id,
                UserId::new("u-99"),
                OptionId::new("a"),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_public_hangout_allows_any_authenticated_user() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;

        let receipt = use_case(store)
            .execute(CastVoteInput::new(
                poll_id,
                UserId::new("u-99"),
                OptionId::new("a"),
            ))
            .await
            .unwrap();
        assert!(receipt.vote_cast);
    }

    #[tokio::test]
    async fn test_expired_poll_is_rejected() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;

        let late = CastVoteUseCase::new(
            Arc::clone(&store),
            Arc::new(FixedClock::at(t0() + Duration::hours(49))),
        );
        let err = late
            .execute(CastVoteInput::new(
                poll_id,
                UserId::new("u-2"),
                OptionId::new("a"),
            ))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_unknown_poll_and_option() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;
        let use_case = use_case(store);

        let err = use_case
            .execute(CastVoteInput::new(
                PollId::new("missing"),
                UserId::new("u-2"),
                OptionId::new("a"),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = use_case
            .execute(CastVoteInput::new(
                poll_id,
                UserId::new("u-2"),
                OptionId::new("zzz"),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_receipt_reports_consensus() {
        let store = Arc::new(TestStore::new());
        let poll_id = seed(&store, PrivacyLevel::Public).await;
        let use_case = use_case(store);

        use_case
            .execute(CastVoteInput::new(
                poll_id.clone(),
                UserId::new("u-1"),
                OptionId::new("a"),
            ))
            .await
            .unwrap();
        let receipt = use_case
            .execute(CastVoteInput::new(
                poll_id,
                UserId::new("u-2"),
                OptionId::new("a"),
            ))
            .await
            .unwrap();

        // 2 ballots, both on "a": 100% over the 50% threshold, min 2 met
        assert!(receipt.state.consensus_reached);
        assert_eq!(receipt.state.consensus_level, 100.0);
    }
}
