use serde::{Deserialize, Serialize};

/// Provider-agnostic address.
///
/// Providers populate different subsets of these fields; anything a provider
/// does not return is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAddress {
    pub postal_code: String,

    /// State / federative unit code (e.g. "SC")
    pub region_code: String,

    /// City or locality
    pub city: String,

    /// District or neighborhood
    pub district: String,

    pub street: String,
}
