//! Output formatter trait

use gatherly_application::PollStateView;
use gatherly_domain::{FinalPlan, Hangout, RsvpGate};

/// Trait for rendering engine results for a caller-facing surface
pub trait OutputFormatter {
    /// Render a hangout header (title, state, participants)
    fn format_hangout(&self, hangout: &Hangout) -> String;

    /// Render a poll state snapshot with per-option counts
    fn format_poll_state(&self, state: &PollStateView) -> String;

    /// Render a locked-in final plan
    fn format_final_plan(&self, plan: &FinalPlan, hangout: &Hangout) -> String;

    /// Render the mandatory-RSVP gate
    fn format_gate(&self, gate: &RsvpGate) -> String;

    /// Render a poll state as JSON
    fn format_json(&self, state: &PollStateView) -> String;
}
