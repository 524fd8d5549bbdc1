//! Domain layer for gatherly
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Hangout
//!
//! A hangout is a user-organized social plan with one or more candidate
//! options. Depending on its shape it either goes straight to RSVP
//! collection or opens a poll:
//!
//! - **Flow routing**: quick plans and single-option hangouts skip voting
//! - **Polling**: multi-option hangouts collect ballots until consensus
//!
//! ## Consensus
//!
//! A poll reaches consensus once a single option's vote share meets the
//! configured threshold among a minimum number of ballots. Finalizing a
//! poll is a one-way transition that locks in the winning option and seeds
//! RSVP placeholders for every participant.

pub mod core;
pub mod hangout;
pub mod poll;

// Re-export commonly used types
pub use core::error::DomainError;
pub use hangout::{
    entities::{FinalPlan, Hangout, Participant, PlanOption},
    flow::{FlowRoute, HangoutKind, route_flow, voting_deadline},
    rsvp::RsvpGate,
    value_objects::{
        HangoutId, HangoutState, OptionId, ParticipantRole, PollId, PrivacyLevel, RsvpStatus,
        UserId,
    },
};
pub use poll::{
    consensus::{ConsensusConfig, ConsensusEvaluation, evaluate},
    entities::{Poll, PollStatus},
    tally::{OptionCount, VoteTally},
    vote::{Vote, VoteAction},
};
