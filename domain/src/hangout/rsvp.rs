//! Mandatory-RSVP gating
//!
//! A hangout is "locked in" only once every mandatory participant has
//! confirmed attendance. The gate is purely derived from current
//! participant state; it mutates nothing.

use super::entities::{Hangout, Participant};
use serde::{Deserialize, Serialize};

/// Result of the mandatory-attendee check
///
/// # Example
///
/// ```
/// use gatherly_domain::{Participant, RsvpGate, UserId};
///
/// let participants = vec![
///     Participant::member(UserId::new("u-1"), "Alex").mandatory(),
///     Participant::member(UserId::new("u-2"), "Blair"),
/// ];
///
/// let gate = RsvpGate::check(&participants);
/// assert!(!gate.can_proceed);
/// assert_eq!(gate.waiting_for, vec!["Alex".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpGate {
    /// True once every mandatory participant has RSVP'd YES
    pub can_proceed: bool,
    /// Display names of mandatory participants not yet confirmed
    pub waiting_for: Vec<String>,
}

impl RsvpGate {
    /// Evaluate the gate over a participant set
    pub fn check(participants: &[Participant]) -> Self {
        let waiting_for: Vec<String> = participants
            .iter()
            .filter(|p| p.is_mandatory && !p.rsvp_status.is_confirmed())
            .map(|p| p.display_name.clone())
            .collect();

        Self {
            can_proceed: waiting_for.is_empty(),
            waiting_for,
        }
    }

    /// Evaluate the gate for a hangout
    pub fn for_hangout(hangout: &Hangout) -> Self {
        Self::check(&hangout.participants)
    }
}
