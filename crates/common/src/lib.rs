// cadence-common: domain types shared by the engine and the CLI

pub mod calendar;
pub mod notes;
pub mod path;
pub mod record;
