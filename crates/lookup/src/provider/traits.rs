//! Postal-code provider trait definitions.
//!
//! This module defines the core `PostalCodeProvider` trait that all
//! lookup providers implement, and [`timed_lookup`], the single entry point
//! the race uses to call them.

use std::borrow::Cow;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::errors::LookupError;
use crate::models::{NormalizedAddress, PostalCode, ProviderOutcome};

/// Trait for postal-code lookup providers.
///
/// Implement this trait to race a new lookup source. Most providers are
/// plain JSON-over-HTTP services and only need an
/// [`HttpProvider`](super::HttpProvider) with their own
/// [`FieldMapping`](super::FieldMapping).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use postrace_lookup::{LookupError, NormalizedAddress, PostalCode, PostalCodeProvider};
/// use tokio::time::Instant;
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl PostalCodeProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn lookup(
///         &self,
///         code: &PostalCode,
///         _deadline: Instant,
///     ) -> Result<NormalizedAddress, LookupError> {
///         Ok(NormalizedAddress {
///             postal_code: code.to_string(),
///             ..Default::default()
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait PostalCodeProvider: Send + Sync {
    /// Unique name for this provider.
    ///
    /// Used for logging and for attributing the outcome in reports.
    fn id(&self) -> &'static str;

    /// Look up a postal code.
    ///
    /// # Arguments
    ///
    /// * `code` - The postal code to look up
    /// * `deadline` - Shared race deadline; the call must not outlive it
    ///
    /// # Returns
    ///
    /// The normalized address on success, or a `LookupError` on failure.
    async fn lookup(
        &self,
        code: &PostalCode,
        deadline: Instant,
    ) -> Result<NormalizedAddress, LookupError>;
}

/// Run one provider lookup bounded by `deadline` and time it.
///
/// The whole call is cut off at the deadline even if the provider ignores
/// it, in which case the outcome is a `LookupError::Timeout`. Elapsed time
/// is attached to the outcome whether the lookup succeeded or not.
pub async fn timed_lookup(
    provider: &dyn PostalCodeProvider,
    code: &PostalCode,
    deadline: Instant,
) -> ProviderOutcome {
    let started = Instant::now();

    let result = match tokio::time::timeout_at(deadline, provider.lookup(code, deadline)).await {
        Ok(result) => result,
        Err(_) => Err(LookupError::Timeout {
            provider: provider.id().to_string(),
        }),
    };

    ProviderOutcome {
        provider: Cow::Borrowed(provider.id()),
        elapsed: started.elapsed(),
        result,
    }
}
