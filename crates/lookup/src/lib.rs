//! Postrace Lookup Crate
//!
//! Races postal-code (CEP) lookups against several independent providers
//! under one shared deadline and reports whichever result the race selects.
//!
//! # Architecture
//!
//! ```text
//!                          +------------------+
//!                          |   PostalCode     |  (lookup key)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | RaceCoordinator  |  (shared deadline, RacePolicy)
//!                          +------------------+
//!                            /             \
//!                           v               v
//!                  +--------------+   +--------------+
//!                  |  Provider A  |   |  Provider B  |  (one task + oneshot each)
//!                  +--------------+   +--------------+
//!                           \               /
//!                            v             v
//!                          +------------------+
//!                          |   RaceResult     |  (Winner / DeadlineExceeded / AllFailed)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Reporter      |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`PostalCode`] - Non-empty lookup key
//! - [`NormalizedAddress`] - Provider-agnostic address record
//! - [`ProviderOutcome`] - One provider's result plus elapsed time
//! - [`RaceResult`] - The single result a race resolves to
//! - [`RacePolicy`] - Whether a failure may win the race

pub mod errors;
pub mod models;
pub mod provider;
pub mod race;
pub mod report;

pub use errors::{FailureKind, LookupError, SetupError};
pub use models::{NormalizedAddress, PostalCode, ProviderId, ProviderOutcome};
pub use provider::{brasil_api, via_cep};
pub use provider::{timed_lookup, FieldMapping, HttpProvider, PostalCodeProvider};
pub use race::{RaceCoordinator, RacePolicy, RaceResult};
pub use report::{render, report, ReportFormat};
