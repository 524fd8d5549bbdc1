//! Poll aggregate: ballots, tallies, and consensus evaluation

pub mod consensus;
pub mod entities;
pub mod tally;
pub mod vote;

pub use consensus::{ConsensusConfig, ConsensusEvaluation, evaluate};
pub use entities::{Poll, PollStatus};
pub use tally::{OptionCount, VoteTally};
pub use vote::{Vote, VoteAction};
