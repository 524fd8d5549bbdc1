//! Application layer for gatherly
//!
//! This crate contains use cases, port definitions, the error taxonomy,
//! and planning defaults. It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PlanningDefaults;
pub use error::CoreError;
pub use ports::{
    clock::{Clock, FixedClock},
    id_generator::{IdGenerator, SequentialIds},
    notifier::{NoNotifier, PlanEvent, PlanNotifier},
    store::{HangoutStore, StoreError, VoteOutcome},
};
pub use use_cases::cancel_poll::{CancelPollInput, CancelPollUseCase};
pub use use_cases::cast_vote::{CastVoteInput, CastVoteUseCase, VoteReceipt};
pub use use_cases::create_hangout::{
    CreateHangoutInput, CreateHangoutOutput, CreateHangoutUseCase, InviteeDraft, OptionDraft,
};
pub use use_cases::finalize_plan::{FinalizePlanInput, FinalizePlanUseCase};
pub use use_cases::poll_state::{OptionStateView, PollStateUseCase, PollStateView};
pub use use_cases::rsvp::{
    MandatoryRsvpUseCase, RespondRsvpInput, RespondRsvpUseCase, RsvpReceipt,
};
