//! Port for plan event emission.
//!
//! Defines the [`PlanNotifier`] trait for signaling lifecycle events
//! (hangout created, vote cast, plan finalized, RSVPs requested) to an
//! external notifier. Emission is fire-and-forget: delivery and retry are
//! the notifier's concern, and `notify` is intentionally synchronous and
//! non-fallible so a failing notifier never disrupts the main flow.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port carries machine-readable
//! events for downstream consumers.

use gatherly_domain::{FinalPlan, Hangout, Poll, VoteAction};
use serde_json::{Value, json};

/// A structured plan lifecycle event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; adapters add their own timestamps on write.
pub struct PlanEvent {
    /// Event type identifier (e.g., "plan_finalized", "rsvp_requested").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl PlanEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// A hangout entered the system (either route).
    pub fn hangout_created(hangout: &Hangout) -> Self {
        Self::new(
            "hangout_created",
            json!({
                "hangout_id": hangout.id,
                "title": hangout.title,
                "state": hangout.state,
                "requires_voting": hangout.requires_voting,
                "requires_rsvp": hangout.requires_rsvp,
                "participants": hangout.participants.len(),
            }),
        )
    }

    /// A ballot was toggled or re-flagged.
    pub fn vote_cast(poll: &Poll, user: &str, action: VoteAction, vote_cast: bool) -> Self {
        Self::new(
            "vote_cast",
            json!({
                "poll_id": poll.id,
                "user_id": user,
                "action": action.as_str(),
                "vote_cast": vote_cast,
                "total_votes": poll.tally().total_votes(),
            }),
        )
    }

    /// A winning option was locked in.
    pub fn plan_finalized(plan: &FinalPlan) -> Self {
        Self::new(
            "plan_finalized",
            json!({
                "hangout_id": plan.hangout_id,
                "poll_id": plan.poll_id,
                "option_id": plan.option_id,
                "consensus_level": plan.consensus_level,
                "total_votes": plan.total_votes,
                "finalized_by": plan.finalized_by,
            }),
        )
    }

    /// Participants were asked to confirm attendance.
    pub fn rsvp_requested(hangout: &Hangout) -> Self {
        let pending: Vec<&str> = hangout
            .participants
            .iter()
            .map(|p| p.display_name.as_str())
            .collect();
        Self::new(
            "rsvp_requested",
            json!({
                "hangout_id": hangout.id,
                "participants": pending,
            }),
        )
    }

    /// A poll was abandoned by its creator.
    pub fn poll_cancelled(poll: &Poll) -> Self {
        Self::new(
            "poll_cancelled",
            json!({
                "poll_id": poll.id,
                "hangout_id": poll.hangout_id,
            }),
        )
    }
}

/// Port for emitting plan lifecycle events.
pub trait PlanNotifier: Send + Sync {
    /// Emit one event. Failures are the adapter's concern.
    fn notify(&self, event: PlanEvent);
}

/// No-op implementation for tests and when notification is disabled.
pub struct NoNotifier;

impl PlanNotifier for NoNotifier {
    fn notify(&self, _event: PlanEvent) {}
}
