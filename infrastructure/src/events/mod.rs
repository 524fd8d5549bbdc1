//! Event emission adapters

pub mod jsonl;

pub use jsonl::JsonlEventLog;
