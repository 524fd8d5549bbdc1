//! Console output formatter

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use gatherly_application::PollStateView;
use gatherly_domain::{FinalPlan, Hangout, RsvpGate};

/// Formats engine results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "─".repeat(title.len()))
    }

    /// Visual ballot bar, one dot per vote (e.g. "●●●○")
    fn vote_bar(count: usize, leader: usize) -> String {
        let filled = "●".repeat(count);
        let padding = "○".repeat(leader.saturating_sub(count));
        format!("{}{}", filled, padding)
    }
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_hangout(&self, hangout: &Hangout) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Hangout: {}",
            hangout.title
        )));
        output.push_str(&format!(
            "{} {}\n",
            "State:".cyan().bold(),
            hangout.state
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            hangout
                .participants
                .iter()
                .map(|p| {
                    if p.is_mandatory {
                        format!("{}*", p.display_name)
                    } else {
                        p.display_name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        ));
        if let Some(deadline) = hangout.voting_deadline {
            output.push_str(&format!(
                "{} {}\n",
                "Voting until:".cyan().bold(),
                deadline.format("%Y-%m-%d %H:%M UTC")
            ));
        }

        output
    }

    fn format_poll_state(&self, state: &PollStateView) -> String {
        let mut output = String::new();

        let leader = state
            .options
            .iter()
            .map(|o| o.vote_count)
            .max()
            .unwrap_or(0);

        for option in &state.options {
            let is_leading = state.leading_option.as_ref() == Some(&option.option_id);
            let marker = if is_leading { "▸" } else { " " };
            let title = if is_leading {
                option.title.yellow().bold().to_string()
            } else {
                option.title.normal().to_string()
            };
            output.push_str(&format!(
                "{} {:<24} {} {} ({:.1}%)\n",
                marker,
                title,
                Self::vote_bar(option.vote_count, leader),
                option.vote_count,
                option.percentage
            ));
        }

        let consensus = if state.consensus_reached {
            format!("consensus reached at {:.1}%", state.consensus_level)
                .green()
                .bold()
                .to_string()
        } else {
            format!("no consensus yet ({:.1}%)", state.consensus_level)
                .yellow()
                .to_string()
        };
        output.push_str(&format!(
            "{} ballots | {}\n",
            state.total_votes, consensus
        ));

        output
    }

    fn format_final_plan(&self, plan: &FinalPlan, hangout: &Hangout) -> String {
        let winning_title = hangout
            .options
            .iter()
            .find(|o| o.id == plan.option_id)
            .map(|o| o.title.as_str())
            .unwrap_or("(unknown option)");

        let mut output = String::new();
        output.push_str(&Self::section_header("Final Plan"));
        output.push_str(&format!(
            "{} {}\n",
            "Winner:".cyan().bold(),
            winning_title.green().bold()
        ));
        output.push_str(&format!(
            "{} {:.1}% of {} ballots\n",
            "Consensus:".cyan().bold(),
            plan.consensus_level,
            plan.total_votes
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Finalized:".cyan().bold(),
            plan.finalized_at.format("%Y-%m-%d %H:%M UTC")
        ));

        output
    }

    fn format_gate(&self, gate: &RsvpGate) -> String {
        if gate.can_proceed {
            format!("{}\n", "All mandatory participants are in.".green().bold())
        } else {
            format!(
                "{} {}\n",
                "Waiting on:".yellow().bold(),
                gate.waiting_for.join(", ")
            )
        }
    }

    fn format_json(&self, state: &PollStateView) -> String {
        serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use gatherly_domain::{
        ConsensusConfig, HangoutId, OptionId, PlanOption, Poll, PollId, UserId,
    };

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-08-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn state() -> PollStateView {
        let options = vec![
            PlanOption::new(OptionId::new("a"), "Bowling").unwrap(),
            PlanOption::new(OptionId::new("b"), "Karaoke").unwrap(),
        ];
        let mut poll = Poll::new(
            PollId::new("poll-1"),
            HangoutId::new("hng-1"),
            options,
            ConsensusConfig::new(60.0, 2).unwrap(),
            t0(),
        );
        poll.toggle_vote(&UserId::new("u-1"), &OptionId::new("a"), t0())
            .unwrap();
        poll.toggle_vote(&UserId::new("u-2"), &OptionId::new("a"), t0())
            .unwrap();
        poll.toggle_vote(&UserId::new("u-3"), &OptionId::new("b"), t0())
            .unwrap();
        PollStateView::from_poll(&poll)
    }

    #[test]
    fn test_poll_state_rendering() {
        colored::control::set_override(false);
        let rendered = ConsoleFormatter::new().format_poll_state(&state());

        assert!(rendered.contains("Bowling"));
        assert!(rendered.contains("Karaoke"));
        assert!(rendered.contains("●●"));
        assert!(rendered.contains("3 ballots"));
        assert!(rendered.contains("consensus reached at 66.7%"));
    }

    #[test]
    fn test_gate_rendering() {
        colored::control::set_override(false);
        let formatter = ConsoleFormatter::new();

        let open = RsvpGate {
            can_proceed: true,
            waiting_for: vec![],
        };
        assert!(formatter.format_gate(&open).contains("All mandatory"));

        let waiting = RsvpGate {
            can_proceed: false,
            waiting_for: vec!["Blair".to_string(), "Casey".to_string()],
        };
        assert!(formatter.format_gate(&waiting).contains("Blair, Casey"));
    }

    #[test]
    fn test_json_rendering_roundtrips() {
        let rendered = ConsoleFormatter::new().format_json(&state());
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["total_votes"], 3);
        assert_eq!(value["consensus_reached"], true);
    }
}
