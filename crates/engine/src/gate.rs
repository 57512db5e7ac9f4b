// Calendar and probability gates, as a pure function of time and draw.

use cadence_common::calendar::rest_day_of;
use chrono::{NaiveDateTime, Weekday};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    RestDay { weekday: Weekday },
    Skip { roll: f64, probability: f64 },
    Proceed { roll: f64 },
}

/// Proceed only if `roll < probability`.
pub fn passes_probability(roll: f64, probability: f64) -> bool {
    roll < probability
}

/// Rest days win over the roll.
pub fn decide(now: NaiveDateTime, roll: f64, probability: f64) -> GateDecision {
    if let Some(weekday) = rest_day_of(now) {
        return GateDecision::RestDay { weekday };
    }
    if passes_probability(roll, probability) {
        GateDecision::Proceed { roll }
    } else {
        GateDecision::Skip { roll, probability }
    }
}
