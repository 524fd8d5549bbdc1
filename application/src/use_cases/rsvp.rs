//! RSVP use cases
//!
//! Responding to an RSVP request and checking the mandatory-attendee
//! gate. The gate is purely derived from participant state; a hangout is
//! "locked in" only once every mandatory participant has answered YES.

use crate::error::CoreError;
use crate::ports::store::HangoutStore;
use gatherly_domain::{HangoutId, RsvpGate, RsvpStatus, UserId};
use std::sync::Arc;
use tracing::info;

/// Input for the RespondRsvp use case
#[derive(Debug, Clone)]
pub struct RespondRsvpInput {
    pub hangout_id: HangoutId,
    pub user_id: UserId,
    pub status: RsvpStatus,
}

impl RespondRsvpInput {
    pub fn new(hangout_id: HangoutId, user_id: UserId, status: RsvpStatus) -> Self {
        Self {
            hangout_id,
            user_id,
            status,
        }
    }
}

/// Outcome of an RSVP answer
#[derive(Debug, Clone)]
pub struct RsvpReceipt {
    pub status: RsvpStatus,
    /// Gate state after this answer was recorded
    pub gate: RsvpGate,
}

/// Use case for recording a participant's RSVP answer
pub struct RespondRsvpUseCase<S: HangoutStore> {
    store: Arc<S>,
}

impl<S: HangoutStore> RespondRsvpUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: RespondRsvpInput) -> Result<RsvpReceipt, CoreError> {
        let hangout = self
            .store
            .update_rsvp(&input.hangout_id, &input.user_id, input.status)
            .await
            .map_err(|err| match err {
                crate::ports::store::StoreError::NotFound => CoreError::not_found(format!(
                    "hangout {} not found",
                    input.hangout_id
                )),
                other => other.into(),
            })?;

        info!(
            "RSVP {} recorded for {} on hangout {}",
            input.status, input.user_id, input.hangout_id
        );

        Ok(RsvpReceipt {
            status: input.status,
            gate: RsvpGate::for_hangout(&hangout),
        })
    }
}

/// Use case for the mandatory-attendee gate query
pub struct MandatoryRsvpUseCase<S: HangoutStore> {
    store: Arc<S>,
}

impl<S: HangoutStore> MandatoryRsvpUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, hangout_id: &HangoutId) -> Result<RsvpGate, CoreError> {
        let hangout = self
            .store
            .hangout(hangout_id)
            .await?
            .ok_or_else(|| CoreError::not_found(format!("hangout {} not found", hangout_id)))?;

        Ok(RsvpGate::for_hangout(&hangout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::support::TestStore;
    use chrono::{DateTime, Utc};
    use gatherly_domain::{Hangout, HangoutState, Participant};

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    async fn seed(store: &TestStore) -> HangoutId {
        let hangout = Hangout::new(
            HangoutId::new("hng-1"),
            "Friday night",
            HangoutState::Confirmed,
            UserId::new("u-1"),
            vec![],
            t0(),
        )
        .with_participants(vec![
            Participant::creator(UserId::new("u-1"), "Alex"),
            Participant::member(UserId::new("u-2"), "Blair").mandatory(),
            Participant::member(UserId::new("u-3"), "Casey"),
        ])
        .with_flow_flags(false, true);

        store.insert_hangout(hangout.clone()).await.unwrap();
        hangout.id
    }

    #[tokio::test]
    async fn test_gate_waits_for_mandatory_participant() {
        let store = Arc::new(TestStore::new());
        let hangout_id = seed(&store).await;

        let gate = MandatoryRsvpUseCase::new(store)
            .execute(&hangout_id)
            .await
            .unwrap();

        assert!(!gate.can_proceed);
        assert_eq!(gate.waiting_for, vec!["Blair".to_string()]);
    }

    #[tokio::test]
    async fn test_gate_opens_after_mandatory_yes() {
        let store = Arc::new(TestStore::new());
        let hangout_id = seed(&store).await;

        let receipt = RespondRsvpUseCase::new(Arc::clone(&store))
            .execute(RespondRsvpInput::new(
                hangout_id.clone(),
                UserId::new("u-2"),
                RsvpStatus::Yes,
            ))
            .await
            .unwrap();

        assert!(receipt.gate.can_proceed);
        assert!(receipt.gate.waiting_for.is_empty());

        let gate = MandatoryRsvpUseCase::new(store)
            .execute(&hangout_id)
            .await
            .unwrap();
        assert!(gate.can_proceed);
    }

    #[tokio::test]
    async fn test_unknown_participant_is_not_found() {
        let store = Arc::new(TestStore::new());
        let hangout_id = seed(&store).await;

        let err = RespondRsvpUseCase::new(store)
            .execute(RespondRsvpInput::new(
                hangout_id,
                UserId::new("u-99"),
                RsvpStatus::Yes,
            ))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_unknown_hangout_is_not_found() {
        let store = Arc::new(TestStore::new());

        let err = MandatoryRsvpUseCase::new(Arc::clone(&store))
            .execute(&HangoutId::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = RespondRsvpUseCase::new(store)
            .execute(RespondRsvpInput::new(
                HangoutId::new("missing"),
                UserId::new("u-1"),
                RsvpStatus::Yes,
            ))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
