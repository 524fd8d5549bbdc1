//! Hangout domain value objects - immutable identifiers and states.
//!
//! # Identifiers
//! - [`HangoutId`] - Unique identifier for a hangout
//! - [`PollId`] - Unique identifier for a poll
//! - [`OptionId`] - Unique identifier for a candidate option
//! - [`UserId`] - Identity resolved by the surrounding auth layer
//!
//! # States
//! - [`HangoutState`] - Lifecycle of a hangout (polling, confirmed, completed)
//! - [`RsvpStatus`] - A participant's attendance answer
//! - [`PrivacyLevel`] - Who may vote on the hangout's poll
//! - [`ParticipantRole`] - Creator vs. invited member

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a hangout.
    HangoutId
);
string_id!(
    /// Unique identifier for a poll attached to a hangout.
    PollId
);
string_id!(
    /// Unique identifier for a candidate option within a hangout.
    OptionId
);
string_id!(
    /// Identifier of an authenticated user, supplied by the identity layer.
    UserId
);

/// Lifecycle state of a hangout
///
/// A hangout is in exactly one state at any time. The POLLING→CONFIRMED
/// transition is one-directional and performed only by plan finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HangoutState {
    /// Collecting votes on candidate options
    Polling,
    /// A plan is locked in; collecting RSVPs
    Confirmed,
    /// The hangout happened (or was archived)
    Completed,
}

impl HangoutState {
    pub fn as_str(&self) -> &str {
        match self {
            HangoutState::Polling => "POLLING",
            HangoutState::Confirmed => "CONFIRMED",
            HangoutState::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for HangoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant's answer to the RSVP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    /// Seeded placeholder; the participant has not answered yet
    #[default]
    Pending,
    Yes,
    No,
    Maybe,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RsvpStatus::Pending => "PENDING",
            RsvpStatus::Yes => "YES",
            RsvpStatus::No => "NO",
            RsvpStatus::Maybe => "MAYBE",
        }
    }

    /// Check if the participant has confirmed attendance
    pub fn is_confirmed(&self) -> bool {
        matches!(self, RsvpStatus::Yes)
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RsvpStatus::Pending),
            "yes" => Ok(RsvpStatus::Yes),
            "no" => Ok(RsvpStatus::No),
            "maybe" => Ok(RsvpStatus::Maybe),
            _ => Err(format!(
                "Unknown RSVP status: {}. Valid: pending, yes, no, maybe",
                s
            )),
        }
    }
}

/// Visibility of a hangout's poll
///
/// Private hangouts restrict voting to the creator and existing
/// participants; public ones allow any authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyLevel {
    #[default]
    Public,
    Private,
}

impl PrivacyLevel {
    pub fn is_private(&self) -> bool {
        matches!(self, PrivacyLevel::Private)
    }
}

/// Membership role within a hangout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Creator,
    Member,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = HangoutId::new("hng-42");
        assert_eq!(id.as_str(), "hng-42");
        assert_eq!(id.to_string(), "hng-42");

        let from_str: OptionId = "opt-1".into();
        assert_eq!(from_str, OptionId::new("opt-1"));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(HangoutState::Polling.to_string(), "POLLING");
        assert_eq!(HangoutState::Confirmed.to_string(), "CONFIRMED");
    }

    #[test]
    fn test_rsvp_default_is_pending() {
        assert_eq!(RsvpStatus::default(), RsvpStatus::Pending);
        assert!(!RsvpStatus::Pending.is_confirmed());
        assert!(RsvpStatus::Yes.is_confirmed());
    }

    #[test]
    fn test_rsvp_parse() {
        assert_eq!("yes".parse::<RsvpStatus>().ok(), Some(RsvpStatus::Yes));
        assert_eq!("MAYBE".parse::<RsvpStatus>().ok(), Some(RsvpStatus::Maybe));
        assert!("attending".parse::<RsvpStatus>().is_err());
    }

    #[test]
    fn test_privacy_default() {
        assert_eq!(PrivacyLevel::default(), PrivacyLevel::Public);
        assert!(!PrivacyLevel::Public.is_private());
        assert!(PrivacyLevel::Private.is_private());
    }
}
