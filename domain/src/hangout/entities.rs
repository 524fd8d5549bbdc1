//! Hangout domain entities

use super::value_objects::{
    HangoutId, HangoutState, OptionId, ParticipantRole, PollId, PrivacyLevel, RsvpStatus, UserId,
};
use crate::core::error::DomainError;
use crate::poll::consensus::ConsensusEvaluation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate option for a hangout (Value Object)
///
/// Options are strongly typed and validated at the system boundary; they
/// are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOption {
    pub id: OptionId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Proposed date/time of the activity
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Estimated price per person
    pub price: Option<f64>,
}

impl PlanOption {
    /// Create a new option
    ///
    /// Returns [`DomainError::InvalidOption`] if the title is empty or
    /// only whitespace.
    pub fn new(id: OptionId, title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::InvalidOption(
                "option title cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            title,
            description: None,
            location: None,
            scheduled_at: None,
            price: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_schedule(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Membership record linking a user to a hangout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub display_name: String,
    pub role: ParticipantRole,
    /// Whether this person must confirm before the plan is locked in
    pub is_mandatory: bool,
    pub rsvp_status: RsvpStatus,
}

impl Participant {
    /// Create the creator's membership record
    pub fn creator(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role: ParticipantRole::Creator,
            is_mandatory: false,
            rsvp_status: RsvpStatus::Pending,
        }
    }

    /// Create an invited member's record
    pub fn member(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            role: ParticipantRole::Member,
            is_mandatory: false,
            rsvp_status: RsvpStatus::Pending,
        }
    }

    /// Flag this participant as required for the plan to proceed
    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }

    pub fn with_rsvp(mut self, status: RsvpStatus) -> Self {
        self.rsvp_status = status;
        self
    }
}

/// A user-organized social plan with one or more candidate options (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hangout {
    pub id: HangoutId,
    pub title: String,
    pub state: HangoutState,
    pub privacy: PrivacyLevel,
    pub created_by: UserId,
    pub participants: Vec<Participant>,
    /// Candidate options in creation order
    pub options: Vec<PlanOption>,
    pub requires_voting: bool,
    pub requires_rsvp: bool,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Hangout {
    /// Create a hangout in the given initial state
    ///
    /// The initial state and the `requires_*` flags come from flow routing;
    /// this constructor does not re-derive them.
    pub fn new(
        id: HangoutId,
        title: impl Into<String>,
        state: HangoutState,
        created_by: UserId,
        options: Vec<PlanOption>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            state,
            privacy: PrivacyLevel::default(),
            created_by,
            participants: Vec::new(),
            options,
            requires_voting: false,
            requires_rsvp: false,
            voting_deadline: None,
            created_at,
        }
    }

    pub fn with_privacy(mut self, privacy: PrivacyLevel) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_flow_flags(mut self, requires_voting: bool, requires_rsvp: bool) -> Self {
        self.requires_voting = requires_voting;
        self.requires_rsvp = requires_rsvp;
        self
    }

    pub fn with_voting_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.voting_deadline = Some(deadline);
        self
    }

    /// Find a participant by user id
    pub fn participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == *user_id)
    }

    /// Check if a user is the creator or an existing participant
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.created_by == *user_id || self.participant(user_id).is_some()
    }

    /// Record a participant's RSVP answer
    pub fn respond_rsvp(&mut self, user_id: &UserId, status: RsvpStatus) -> Result<(), DomainError> {
        match self.participants.iter_mut().find(|p| p.user_id == *user_id) {
            Some(participant) => {
                participant.rsvp_status = status;
                Ok(())
            }
            None => Err(DomainError::UnknownParticipant(user_id.to_string())),
        }
    }

    /// Reset every participant's RSVP to a PENDING placeholder
    ///
    /// RSVP is a separate, subsequent user action; finalization never
    /// answers on a participant's behalf.
    pub fn seed_rsvps(&mut self) {
        for participant in &mut self.participants {
            participant.rsvp_status = RsvpStatus::Pending;
        }
    }

    /// One-way POLLING→CONFIRMED transition, performed by finalization
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        if self.state != HangoutState::Polling {
            return Err(DomainError::InvalidTransition(format!(
                "cannot confirm a hangout in state {}",
                self.state
            )));
        }
        self.state = HangoutState::Confirmed;
        self.requires_voting = false;
        self.requires_rsvp = true;
        Ok(())
    }
}

/// The locked-in outcome of a hangout (Entity)
///
/// Produced once, on successful finalization (or directly at creation for
/// single-option hangouts). Immutable; one-to-one with its hangout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalPlan {
    pub hangout_id: HangoutId,
    /// Absent for plans that skipped voting entirely
    pub poll_id: Option<PollId>,
    pub option_id: OptionId,
    /// Winning option's vote share at finalization time (0-100)
    pub consensus_level: f64,
    pub total_votes: usize,
    pub finalized_by: UserId,
    pub finalized_at: DateTime<Utc>,
}

impl FinalPlan {
    /// Create a plan from a consensus evaluation of a poll
    pub fn from_evaluation(
        hangout_id: HangoutId,
        poll_id: PollId,
        option_id: OptionId,
        evaluation: &ConsensusEvaluation,
        finalized_by: UserId,
        finalized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            hangout_id,
            poll_id: Some(poll_id),
            option_id,
            consensus_level: evaluation.consensus_level,
            total_votes: evaluation.total_votes,
            finalized_by,
            finalized_at,
        }
    }

    /// Create an unopposed plan for a hangout that skipped voting
    ///
    /// The single option wins with no vote record.
    pub fn unopposed(
        hangout_id: HangoutId,
        option_id: OptionId,
        finalized_by: UserId,
        finalized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            hangout_id,
            poll_id: None,
            option_id,
            consensus_level: 100.0,
            total_votes: 0,
            finalized_by,
            finalized_at,
        }
    }
}
