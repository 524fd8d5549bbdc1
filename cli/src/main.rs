//! CLI entrypoint for gatherly
//!
//! This is the main binary that wires together all layers using
//! dependency injection. The simulate subcommand drives the full engine
//! against the in-memory store: flow routing, voting, consensus
//! evaluation, finalization, and RSVP gating.

use anyhow::{Result, bail};
use clap::Parser;
use gatherly_application::{
    CastVoteInput, CastVoteUseCase, CreateHangoutInput, CreateHangoutUseCase, FinalizePlanInput,
    Clock, FinalizePlanUseCase, InviteeDraft, MandatoryRsvpUseCase, NoNotifier, OptionDraft,
    PlanNotifier, PlanningDefaults, PollStateUseCase, RespondRsvpInput, RespondRsvpUseCase,
    SequentialIds,
};
use gatherly_domain::{
    ConsensusConfig, FlowRoute, HangoutKind, OptionId, RsvpStatus, UserId, VoteTally, evaluate,
};
use gatherly_infrastructure::{ConfigLoader, JsonlEventLog, MemoryStore, SystemClock};
use gatherly_presentation::{Cli, Command, ConsoleFormatter, OutputFormatter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const NAMES: [&str; 8] = [
    "Alex", "Blair", "Casey", "Devon", "Emery", "Frankie", "Gale", "Harper",
];
const ACTIVITIES: [&str; 6] = [
    "Bowling",
    "Karaoke",
    "Trivia night",
    "Picnic in the park",
    "Escape room",
    "Board games",
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting gatherly");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    let defaults = config.planning_defaults()?;

    // Event log adapter, if configured
    let notifier: Arc<dyn PlanNotifier> = match &config.events.log_path {
        Some(path) => match JsonlEventLog::new(path) {
            Some(log) => Arc::new(log),
            None => Arc::new(NoNotifier),
        },
        None => Arc::new(NoNotifier),
    };

    match cli.command {
        Command::Simulate {
            participants,
            options,
            quick,
            single_choice,
            threshold,
            min_votes,
        } => {
            run_simulate(SimulateArgs {
                participants,
                options,
                quick,
                single_choice,
                threshold,
                min_votes,
                defaults,
                notifier,
                quiet: cli.quiet,
            })
            .await
        }
        Command::Evaluate {
            counts,
            threshold,
            min_votes,
        } => run_evaluate(&counts, threshold, min_votes),
    }
}

struct SimulateArgs {
    participants: usize,
    options: usize,
    quick: bool,
    single_choice: bool,
    threshold: Option<f64>,
    min_votes: Option<usize>,
    defaults: PlanningDefaults,
    notifier: Arc<dyn PlanNotifier>,
    quiet: bool,
}

fn person(i: usize) -> String {
    let name = NAMES[i % NAMES.len()];
    if i < NAMES.len() {
        name.to_string()
    } else {
        format!("{} {}", name, i / NAMES.len() + 1)
    }
}

fn user(i: usize) -> UserId {
    UserId::new(format!("user-{}", i + 1))
}

async fn run_simulate(args: SimulateArgs) -> Result<()> {
    if args.participants == 0 {
        bail!("at least one participant is required");
    }
    if args.options == 0 {
        bail!("at least one option is required");
    }

    let store = Arc::new(MemoryStore::new());
    // Sequential ids keep the transcript readable
    let ids = Arc::new(SequentialIds::new("id"));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let formatter = ConsoleFormatter::new();

    // Per-poll override when any consensus flag is given
    let consensus = if args.threshold.is_some() || args.min_votes.is_some() || args.single_choice
    {
        let threshold = args
            .threshold
            .unwrap_or_else(|| args.defaults.consensus().threshold());
        let min_votes = args
            .min_votes
            .unwrap_or_else(|| args.defaults.consensus().min_participants());
        let mut config = ConsensusConfig::new(threshold, min_votes)?;
        if args.single_choice {
            config = config.single_choice();
        }
        Some(config)
    } else {
        None
    };

    let mut input = CreateHangoutInput::new("Friday night hangout", user(0), person(0)).with_kind(
        if args.quick {
            HangoutKind::QuickPlan
        } else {
            HangoutKind::MultiOption
        },
    );
    for i in 1..args.participants {
        let mut invitee = InviteeDraft::new(user(i), person(i));
        if i == 1 {
            // One mandatory attendee, to exercise the gate
            invitee = invitee.mandatory();
        }
        input = input.with_invitee(invitee);
    }
    for i in 0..args.options {
        input = input.with_option(OptionDraft::new(ACTIVITIES[i % ACTIVITIES.len()]));
    }
    if let Some(config) = consensus {
        input = input.with_consensus(config);
    }

    let create = CreateHangoutUseCase::new(Arc::clone(&store), ids, Arc::clone(&clock))
        .with_defaults(args.defaults)
        .with_notifier(Arc::clone(&args.notifier));
    let created = create.execute(input).await?;

    if !args.quiet {
        print!("{}", formatter.format_hangout(&created.hangout));
    }

    let plan = match created.route {
        FlowRoute::SkipToRsvp => {
            let Some(plan) = created.final_plan else {
                bail!("skip route produced no final plan");
            };
            if !args.quiet {
                println!("Single-option plan, voting skipped.");
            }
            plan
        }
        FlowRoute::StartPolling => {
            let Some(poll) = created.poll else {
                bail!("polling route produced no poll");
            };

            let cast = CastVoteUseCase::new(Arc::clone(&store), Arc::clone(&clock))
                .with_notifier(Arc::clone(&args.notifier));

            // Roughly 70% of voters back the first option, the rest
            // spread across the others, so consensus usually lands
            for i in 0..args.participants {
                let option = if i * 10 < args.participants * 7 {
                    poll.options[0].id.clone()
                } else {
                    poll.options[1 + (i % (args.options - 1))].id.clone()
                };
                let receipt = cast
                    .execute(CastVoteInput::new(poll.id.clone(), user(i), option))
                    .await?;
                if !args.quiet {
                    println!(
                        "{} voted ({} ballots, {:.1}%)",
                        person(i),
                        receipt.state.total_votes,
                        receipt.state.consensus_level
                    );
                }
            }

            let state = PollStateUseCase::new(Arc::clone(&store))
                .execute(&poll.id)
                .await?;
            if !args.quiet {
                print!("{}", formatter.format_poll_state(&state));
            }

            let finalize = FinalizePlanUseCase::new(Arc::clone(&store), Arc::clone(&clock))
                .with_notifier(Arc::clone(&args.notifier));
            match finalize
                .execute(FinalizePlanInput::new(poll.id.clone(), user(0)))
                .await
            {
                Ok(plan) => plan,
                Err(err) => {
                    println!("Finalization rejected: {}", err);
                    return Ok(());
                }
            }
        }
    };

    if !args.quiet {
        print!("{}", formatter.format_final_plan(&plan, &created.hangout));
    }

    // RSVP round: the mandatory attendee says yes, every third answer is
    // a maybe, and the gate is shown before and after
    let gate_query = MandatoryRsvpUseCase::new(Arc::clone(&store));
    let gate = gate_query.execute(&created.hangout.id).await?;
    if !args.quiet {
        print!("{}", formatter.format_gate(&gate));
    }

    let respond = RespondRsvpUseCase::new(Arc::clone(&store));
    for i in 0..args.participants {
        let status = if i % 3 == 2 {
            RsvpStatus::Maybe
        } else {
            RsvpStatus::Yes
        };
        respond
            .execute(RespondRsvpInput::new(
                created.hangout.id.clone(),
                user(i),
                status,
            ))
            .await?;
    }

    let gate = gate_query.execute(&created.hangout.id).await?;
    if !args.quiet {
        print!("{}", formatter.format_gate(&gate));
    }

    Ok(())
}

fn run_evaluate(counts: &str, threshold: f64, min_votes: usize) -> Result<()> {
    let mut pairs = Vec::new();
    for entry in counts.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((name, value)) = entry.split_once('=') else {
            bail!("invalid count entry (expected name=votes): {}", entry);
        };
        let votes: usize = value.trim().parse()?;
        pairs.push((OptionId::new(name.trim()), votes));
    }
    if pairs.is_empty() {
        bail!("no counts given");
    }

    let tally = VoteTally::from_counts(pairs);
    let config = ConsensusConfig::new(threshold, min_votes)?;
    let evaluation = evaluate(&tally, &config);

    for count in tally.counts() {
        println!(
            "{:<12} {:>3} ({:.1}%)",
            count.option_id,
            count.votes,
            tally.percentage_for(&count.option_id)
        );
    }
    println!(
        "{} ballots | leading: {} | consensus {}: {:.1}% (need {:.0}% of at least {})",
        evaluation.total_votes,
        evaluation
            .leading_option
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string()),
        if evaluation.consensus_reached {
            "reached"
        } else {
            "not reached"
        },
        evaluation.consensus_level,
        config.threshold(),
        config.min_participants(),
    );

    Ok(())
}
