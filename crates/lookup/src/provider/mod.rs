//! Postal-code provider abstractions and implementations.
//!
//! This module contains:
//! - The `PostalCodeProvider` trait that all providers implement
//! - [`timed_lookup`], which bounds a call by the race deadline and times it
//! - The generic [`HttpProvider`] and its declarative [`FieldMapping`]
//! - Concrete provider configurations (BrasilAPI, ViaCEP)
//!
//! # Adding a provider
//!
//! A JSON-over-HTTP service needs no new code paths: declare its endpoint
//! template and a `FieldMapping` from its keys to [`NormalizedAddress`]
//! fields, as the `brasil_api` and `via_cep` modules do.
//!
//! [`NormalizedAddress`]: crate::models::NormalizedAddress

mod http;
mod mapping;
mod traits;

pub mod brasil_api;
pub mod via_cep;

// Re-exports
pub use http::{HttpProvider, PLACEHOLDER};
pub use mapping::FieldMapping;
pub use traits::{timed_lookup, PostalCodeProvider};
