use std::time::Duration;

use super::address::NormalizedAddress;
use super::types::ProviderId;
use crate::errors::LookupError;

/// Result of one provider lookup, tagged with the provider and its timing.
///
/// Created once when the call completes and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct ProviderOutcome {
    pub provider: ProviderId,

    /// Wall-clock time from issuing the lookup to its completion
    pub elapsed: Duration,

    pub result: Result<NormalizedAddress, LookupError>,
}

impl ProviderOutcome {
    pub fn success(provider: ProviderId, address: NormalizedAddress, elapsed: Duration) -> Self {
        Self {
            provider,
            elapsed,
            result: Ok(address),
        }
    }

    pub fn failure(provider: ProviderId, error: LookupError, elapsed: Duration) -> Self {
        Self {
            provider,
            elapsed,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn address(&self) -> Option<&NormalizedAddress> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.result.as_ref().err()
    }
}
