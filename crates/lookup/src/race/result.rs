use std::time::Duration;

use crate::models::ProviderOutcome;

/// Terminal result of one race.
#[derive(Clone, Debug)]
pub enum RaceResult {
    /// The outcome selected by the race policy. May be a failure under
    /// [`RacePolicy::FirstArrival`](super::RacePolicy::FirstArrival).
    Winner(ProviderOutcome),

    /// Nothing decisive arrived before the shared deadline.
    DeadlineExceeded { timeout: Duration },

    /// Every provider failed before the deadline, in arrival order.
    AllFailed(Vec<ProviderOutcome>),
}

impl RaceResult {
    /// The winning outcome, if any.
    pub fn winner(&self) -> Option<&ProviderOutcome> {
        match self {
            Self::Winner(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// True only when a provider won with an address.
    pub fn is_success(&self) -> bool {
        self.winner().is_some_and(ProviderOutcome::is_success)
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}
