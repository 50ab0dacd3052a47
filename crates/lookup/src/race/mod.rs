//! Race coordination for postal-code providers.
//!
//! This module provides:
//! - [`RaceCoordinator`]: launches every provider under one shared deadline
//! - [`RacePolicy`]: whether a failure that arrives first may win
//! - [`RaceResult`]: the single result a race resolves to

mod coordinator;
mod policy;
mod result;

pub use coordinator::RaceCoordinator;
pub use policy::RacePolicy;
pub use result::RaceResult;
