//! Race coordinator for postal-code providers.
//!
//! The coordinator:
//! - Derives one deadline shared by every provider
//! - Runs each provider on its own task, reporting through its own oneshot
//! - Resolves on the first outcome the [`RacePolicy`] accepts, or the deadline
//! - Aborts every worker once the race is resolved

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::{RacePolicy, RaceResult};
use crate::errors::LookupError;
use crate::models::{PostalCode, ProviderOutcome};
use crate::provider::{timed_lookup, PostalCodeProvider};

/// Races postal-code providers against each other and a deadline.
pub struct RaceCoordinator {
    providers: Vec<Arc<dyn PostalCodeProvider>>,
    policy: RacePolicy,
}

impl RaceCoordinator {
    /// Create a coordinator with the default [`RacePolicy::FirstArrival`].
    ///
    /// Provider order confers no priority; only arrival order matters.
    pub fn new(providers: Vec<Arc<dyn PostalCodeProvider>>) -> Self {
        Self::with_policy(providers, RacePolicy::default())
    }

    pub fn with_policy(providers: Vec<Arc<dyn PostalCodeProvider>>, policy: RacePolicy) -> Self {
        Self { providers, policy }
    }

    pub fn policy(&self) -> RacePolicy {
        self.policy
    }

    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Look up `code` with every provider concurrently.
    ///
    /// All providers share the deadline `now + timeout`. Returns exactly one
    /// [`RaceResult`]; outcomes arriving after that are discarded and the
    /// workers still running are aborted.
    pub async fn race(&self, code: &PostalCode, timeout: Duration) -> RaceResult {
        let started = Instant::now();
        let deadline = started + timeout;

        if self.providers.is_empty() {
            warn!("No providers configured, nothing to race for '{}'", code);
            return RaceResult::AllFailed(Vec::new());
        }

        debug!(
            "Racing {} providers for '{}' (timeout {:?}, policy {})",
            self.providers.len(),
            code,
            timeout,
            self.policy
        );

        let mut workers = Workers::with_capacity(self.providers.len());
        let mut pending = FuturesUnordered::new();

        for provider in &self.providers {
            let (tx, rx) = oneshot::channel();
            workers.spawn(Arc::clone(provider), code.clone(), deadline, tx);

            let provider_id = provider.id();
            pending.push(async move { (provider_id, rx.await) });
        }

        let mut failures: Vec<ProviderOutcome> = Vec::new();

        loop {
            let next = match tokio::time::timeout_at(deadline, pending.next()).await {
                Ok(next) => next,
                Err(_) => {
                    info!("Deadline of {:?} exceeded for '{}'", timeout, code);
                    return RaceResult::DeadlineExceeded { timeout };
                }
            };

            let outcome = match next {
                Some((_, Ok(outcome))) => outcome,
                Some((provider_id, Err(_))) => {
                    warn!("Provider '{}' exited without an outcome", provider_id);
                    failures.push(ProviderOutcome::failure(
                        Cow::Borrowed(provider_id),
                        LookupError::Abandoned {
                            provider: provider_id.to_string(),
                        },
                        started.elapsed(),
                    ));
                    continue;
                }
                None => {
                    warn!("All {} providers failed for '{}'", failures.len(), code);
                    return RaceResult::AllFailed(failures);
                }
            };

            match &outcome.result {
                // A provider may give up on its own before the shared deadline;
                // only the real deadline ends the race without a winner.
                Err(error) if error.is_deadline() && Instant::now() >= deadline => {
                    info!("Deadline of {:?} exceeded for '{}'", timeout, code);
                    return RaceResult::DeadlineExceeded { timeout };
                }
                Err(error) if self.policy == RacePolicy::FirstSuccess => {
                    warn!(
                        "Provider '{}' failed after {:?}: {}, waiting for others",
                        outcome.provider, outcome.elapsed, error
                    );
                    failures.push(outcome);
                }
                _ => {
                    info!(
                        "Provider '{}' won the race for '{}' in {:?} (success: {})",
                        outcome.provider,
                        code,
                        outcome.elapsed,
                        outcome.is_success()
                    );
                    return RaceResult::Winner(outcome);
                }
            }
        }
    }
}

/// Provider tasks of one race. Aborts whatever is still running on drop.
struct Workers(Vec<JoinHandle<()>>);

impl Workers {
    fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    fn spawn(
        &mut self,
        provider: Arc<dyn PostalCodeProvider>,
        code: PostalCode,
        deadline: Instant,
        tx: oneshot::Sender<ProviderOutcome>,
    ) {
        self.0.push(tokio::spawn(async move {
            let outcome = timed_lookup(provider.as_ref(), &code, deadline).await;
            if tx.send(outcome).is_err() {
                debug!(
                    "Race already resolved, discarding outcome from '{}'",
                    provider.id()
                );
            }
        }));
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}
