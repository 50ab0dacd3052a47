//! Error types and failure classification for the lookup crate.
//!
//! This module provides:
//! - [`LookupError`]: Why a single provider lookup failed
//! - [`SetupError`]: Contract violations caught while building keys and providers
//! - [`FailureKind`]: Classification of a [`LookupError`]

mod kind;

pub use kind::FailureKind;

use thiserror::Error;

/// Errors that can occur during one provider lookup.
///
/// These never escape the race as process errors: they are captured into a
/// [`ProviderOutcome`](crate::ProviderOutcome) and surfaced by the reporter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The substituted endpoint did not form a valid URL.
    #[error("Invalid request: {provider} - {message}")]
    InvalidRequest { provider: String, message: String },

    /// Connecting, sending or reading the body failed.
    #[error("Transport error: {provider} - {message}")]
    Transport { provider: String, message: String },

    /// The shared race deadline elapsed before the provider answered.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// The provider answered with a non-success HTTP status.
    #[error("Bad status: {provider} - HTTP {status}")]
    BadStatus { provider: String, status: u16 },

    /// The body could not be decoded into an address.
    #[error("Decode error: {provider} - {message}")]
    Decode { provider: String, message: String },

    /// The provider answered successfully but flagged the code as unknown.
    #[error("Postal code not found: {provider} - {code}")]
    NotFound { provider: String, code: String },

    /// The provider's task ended (e.g. panicked) without producing an outcome.
    #[error("Worker exited without an outcome: {provider}")]
    Abandoned { provider: String },
}

impl LookupError {
    /// Returns the classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use postrace_lookup::errors::{FailureKind, LookupError};
    ///
    /// let error = LookupError::Timeout { provider: "ViaCEP".to_string() };
    /// assert_eq!(error.kind(), FailureKind::Deadline);
    ///
    /// let error = LookupError::BadStatus { provider: "BrasilAPI".to_string(), status: 404 };
    /// assert_eq!(error.kind(), FailureKind::Status);
    /// ```
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidRequest { .. } => FailureKind::Request,
            Self::Transport { .. } => FailureKind::Transport,
            Self::Timeout { .. } => FailureKind::Deadline,
            Self::BadStatus { .. } => FailureKind::Status,
            Self::Decode { .. } => FailureKind::Decode,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Abandoned { .. } => FailureKind::Abandoned,
        }
    }

    /// True when the failure only means the shared deadline elapsed.
    pub fn is_deadline(&self) -> bool {
        self.kind() == FailureKind::Deadline
    }
}

/// Contract violations detected before any race starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Postal code must not be empty")]
    EmptyPostalCode,

    /// Endpoint templates must contain the `{cep}` placeholder exactly once.
    #[error("Invalid endpoint template for {provider}: {template}")]
    InvalidTemplate { provider: String, template: String },
}
