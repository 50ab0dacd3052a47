//! Lookup models
//!
//! This module contains the core data types for a postal-code race:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `postal_code` - The lookup key (PostalCode)
//! - `address` - Provider-agnostic address record (NormalizedAddress)
//! - `outcome` - One provider's timed result (ProviderOutcome)

mod address;
mod outcome;
mod postal_code;
mod types;

pub use address::NormalizedAddress;
pub use outcome::ProviderOutcome;
pub use postal_code::PostalCode;
pub use types::ProviderId;
