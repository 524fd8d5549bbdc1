//! Flow routing for newly created hangouts
//!
//! Decides whether a hangout needs a poll at all: quick plans and
//! single-option hangouts go straight to RSVP collection, everything else
//! opens a voting round.

use super::entities::PlanOption;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Hours a poll stays open when no explicit window is configured
pub const DEFAULT_VOTING_WINDOW_HOURS: i64 = 48;

/// Declared shape of a hangout at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HangoutKind {
    /// One activity, no voting round
    QuickPlan,
    /// Multiple candidate options to vote on
    #[default]
    MultiOption,
}

impl std::str::FromStr for HangoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick_plan" | "quick" => Ok(HangoutKind::QuickPlan),
            "multi_option" | "multi" => Ok(HangoutKind::MultiOption),
            _ => Err(format!(
                "Unknown hangout kind: {}. Valid: quick_plan, multi_option",
                s
            )),
        }
    }
}

/// Route chosen for a newly created hangout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowRoute {
    /// Created directly in CONFIRMED state; the single option becomes the
    /// final plan with no vote record
    SkipToRsvp,
    /// Created in POLLING state with an empty vote ledger and a deadline
    StartPolling,
}

impl FlowRoute {
    pub fn requires_voting(&self) -> bool {
        matches!(self, FlowRoute::StartPolling)
    }

    pub fn requires_rsvp(&self) -> bool {
        matches!(self, FlowRoute::SkipToRsvp)
    }
}

impl std::fmt::Display for FlowRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowRoute::SkipToRsvp => write!(f, "SKIP_TO_RSVP"),
            FlowRoute::StartPolling => write!(f, "START_POLLING"),
        }
    }
}

/// Classify a new hangout from its declared kind and option set
///
/// A single option always skips voting, regardless of declared kind.
/// Pure classification of input shape; no side effects.
///
/// # Example
///
/// ```
/// use gatherly_domain::{HangoutKind, FlowRoute, OptionId, PlanOption, route_flow};
///
/// let one = vec![PlanOption::new(OptionId::new("opt-1"), "Bowling").unwrap()];
/// assert_eq!(route_flow(HangoutKind::MultiOption, &one), FlowRoute::SkipToRsvp);
///
/// let two = vec![
///     PlanOption::new(OptionId::new("opt-1"), "Bowling").unwrap(),
///     PlanOption::new(OptionId::new("opt-2"), "Karaoke").unwrap(),
/// ];
/// assert_eq!(route_flow(HangoutKind::MultiOption, &two), FlowRoute::StartPolling);
/// assert_eq!(route_flow(HangoutKind::QuickPlan, &two), FlowRoute::SkipToRsvp);
/// ```
pub fn route_flow(kind: HangoutKind, options: &[PlanOption]) -> FlowRoute {
    if kind == HangoutKind::QuickPlan || options.len() == 1 {
        FlowRoute::SkipToRsvp
    } else {
        FlowRoute::StartPolling
    }
}

/// Compute the voting deadline for a polling hangout
pub fn voting_deadline(created_at: DateTime<Utc>, window_hours: i64) -> DateTime<Utc> {
    created_at + Duration::hours(window_hours)
}
