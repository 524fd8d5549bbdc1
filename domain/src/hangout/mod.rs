//! Hangout aggregate: entities, flow routing, and RSVP gating

pub mod entities;
pub mod flow;
pub mod rsvp;
pub mod value_objects;

pub use entities::{FinalPlan, Hangout, Participant, PlanOption};
pub use flow::{FlowRoute, HangoutKind, route_flow, voting_deadline};
pub use rsvp::RsvpGate;
pub use value_objects::{
    HangoutId, HangoutState, OptionId, ParticipantRole, PollId, PrivacyLevel, RsvpStatus, UserId,
};
