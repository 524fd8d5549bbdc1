//! Create Hangout use case
//!
//! Validates boundary input, routes the flow, and persists the hangout —
//! either straight to CONFIRMED with an unopposed plan (quick plans and
//! single-option hangouts) or to POLLING with a fresh vote ledger and a
//! voting deadline.

use crate::config::PlanningDefaults;
use crate::error::CoreError;
use crate::ports::clock::Clock;
use crate::ports::id_generator::IdGenerator;
use crate::ports::notifier::{NoNotifier, PlanEvent, PlanNotifier};
use crate::ports::store::HangoutStore;
use chrono::{DateTime, Utc};
use gatherly_domain::{
    ConsensusConfig, FinalPlan, FlowRoute, Hangout, HangoutId, HangoutKind, HangoutState,
    OptionId, Participant, PlanOption, Poll, PollId, PrivacyLevel, UserId, route_flow,
    voting_deadline,
};
use std::sync::Arc;
use tracing::info;

/// A candidate option as submitted by the caller, before validation
#[derive(Debug, Clone)]
pub struct OptionDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub price: Option<f64>,
}

impl OptionDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            scheduled_at: None,
            price: None,
        }
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

/// An invited user as submitted by the caller
#[derive(Debug, Clone)]
pub struct InviteeDraft {
    pub user_id: UserId,
    pub display_name: String,
    pub is_mandatory: bool,
}

impl InviteeDraft {
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            is_mandatory: false,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self
    }
}

/// Input for the CreateHangout use case
#[derive(Debug, Clone)]
pub struct CreateHangoutInput {
    pub title: String,
    pub kind: HangoutKind,
    pub privacy: PrivacyLevel,
    pub created_by: UserId,
    pub creator_name: String,
    pub invitees: Vec<InviteeDraft>,
    pub options: Vec<OptionDraft>,
    /// Per-poll override; planning defaults apply when absent
    pub consensus: Option<ConsensusConfig>,
}

impl CreateHangoutInput {
    pub fn new(
        title: impl Into<String>,
        created_by: UserId,
        creator_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: HangoutKind::default(),
            privacy: PrivacyLevel::default(),
            created_by,
            creator_name: creator_name.into(),
            invitees: Vec::new(),
            options: Vec::new(),
            consensus: None,
        }
    }

    pub fn with_kind(mut self, kind: HangoutKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_privacy(mut self, privacy: PrivacyLevel) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn with_invitee(mut self, invitee: InviteeDraft) -> Self {
        self.invitees.push(invitee);
        self
    }

    pub fn with_option(mut self, option: OptionDraft) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_consensus(mut self, config: ConsensusConfig) -> Self {
        self.consensus = Some(config);
        self
    }
}

/// Result of hangout creation
#[derive(Debug, Clone)]
pub struct CreateHangoutOutput {
    pub hangout: Hangout,
    /// Present on the polling route
    pub poll: Option<Poll>,
    /// Present on the skip route (unopposed single option)
    pub final_plan: Option<FinalPlan>,
    pub route: FlowRoute,
}

/// Use case for creating a hangout
pub struct CreateHangoutUseCase<S: HangoutStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn PlanNotifier>,
    defaults: PlanningDefaults,
}

impl<S: HangoutStore> CreateHangoutUseCase<S> {
    pub fn new(store: Arc<S>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ids,
            clock,
            notifier: Arc::new(NoNotifier),
            defaults: PlanningDefaults::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn PlanNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_defaults(mut self, defaults: PlanningDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn execute(
        &self,
        input: CreateHangoutInput,
    ) -> Result<CreateHangoutOutput, CoreError> {
        if input.title.trim().is_empty() {
            return Err(CoreError::bad_request("hangout title cannot be empty"));
        }
        if input.options.is_empty() {
            return Err(CoreError::bad_request("at least one option is required"));
        }

        let options = self.build_options(&input.options)?;
        let route = route_flow(input.kind, &options);
        let now = self.clock.now();

        let mut participants =
            vec![Participant::creator(input.created_by.clone(), &input.creator_name)];
        for invitee in &input.invitees {
            let mut member = Participant::member(invitee.user_id.clone(), &invitee.display_name);
            if invitee.is_mandatory {
                member = member.mandatory();
            }
            participants.push(member);
        }

        let hangout_id = HangoutId::new(self.ids.next_id());
        info!(
            "Creating hangout {} ({} options, route {})",
            hangout_id,
            options.len(),
            route
        );

        match route {
            FlowRoute::SkipToRsvp => {
                // The first option wins unopposed, with no vote record
                let winning = options[0].id.clone();
                let hangout = Hangout::new(
                    hangout_id.clone(),
                    input.title,
                    HangoutState::Confirmed,
                    input.created_by.clone(),
                    options,
                    now,
                )
                .with_privacy(input.privacy)
                .with_participants(participants)
                .with_flow_flags(route.requires_voting(), route.requires_rsvp());

                let plan =
                    FinalPlan::unopposed(hangout_id, winning, input.created_by, now);

                self.store.insert_hangout(hangout.clone()).await?;
                self.store.insert_final_plan(plan.clone()).await?;

                self.notifier.notify(PlanEvent::hangout_created(&hangout));
                self.notifier.notify(PlanEvent::rsvp_requested(&hangout));

                Ok(CreateHangoutOutput {
                    hangout,
                    poll: None,
                    final_plan: Some(plan),
                    route,
                })
            }
            FlowRoute::StartPolling => {
                let deadline = voting_deadline(now, self.defaults.voting_window_hours());
                let hangout = Hangout::new(
                    hangout_id.clone(),
                    input.title,
                    HangoutState::Polling,
                    input.created_by,
                    options.clone(),
                    now,
                )
                .with_privacy(input.privacy)
                .with_participants(participants)
                .with_flow_flags(route.requires_voting(), route.requires_rsvp())
                .with_voting_deadline(deadline);

                let config = input
                    .consensus
                    .unwrap_or_else(|| self.defaults.consensus().clone());
                let poll = Poll::new(
                    PollId::new(self.ids.next_id()),
                    hangout_id,
                    options,
                    config,
                    now,
                )
                .with_expiry(deadline);

                self.store.insert_hangout(hangout.clone()).await?;
                self.store.insert_poll(poll.clone()).await?;

                self.notifier.notify(PlanEvent::hangout_created(&hangout));

                Ok(CreateHangoutOutput {
                    hangout,
                    poll: Some(poll),
                    final_plan: None,
                    route,
                })
            }
        }
    }

    fn build_options(&self, drafts: &[OptionDraft]) -> Result<Vec<PlanOption>, CoreError> {
        drafts
            .iter()
            .map(|draft| {
                let mut option =
                    PlanOption::new(OptionId::new(self.ids.next_id()), &draft.title)?;
                if let Some(description) = &draft.description {
                    option = option.with_description(description);
                }
                if let Some(location) = &draft.location {
                    option = option.with_location(location);
                }
                if let Some(at) = draft.scheduled_at {
                    option = option.with_schedule(at);
                }
                if let Some(price) = draft.price {
                    option = option.with_price(price);
                }
                Ok(option)
            })
            .collect()
    }
}
