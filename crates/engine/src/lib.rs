// cadence-engine: configuration, git plumbing and the activity pipeline.

pub mod activity_log;
pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod git;
pub mod random;
pub mod simulator;
