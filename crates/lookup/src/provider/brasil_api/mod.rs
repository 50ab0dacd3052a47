//! BrasilAPI postal-code provider.
//!
//! # API Endpoint
//!
//! - CEP v2: `https://brasilapi.com.br/api/cep/v2/{cep}`
//!
//! # Response Format
//!
//! Flat JSON object with English keys (`cep`, `state`, `city`,
//! `neighborhood`, `street`) plus `service` and `location`, which are not
//! mapped. Unknown codes are answered with HTTP 404.

use crate::errors::SetupError;
use crate::provider::{FieldMapping, HttpProvider};

pub const PROVIDER_ID: &str = "BrasilAPI";

/// Default endpoint template
pub const ENDPOINT: &str = "https://brasilapi.com.br/api/cep/v2/{cep}";

pub static MAPPING: FieldMapping = FieldMapping {
    postal_code: Some("cep"),
    region_code: Some("state"),
    city: Some("city"),
    district: Some("neighborhood"),
    street: Some("street"),
    error_flag: None,
};

/// BrasilAPI provider against the public endpoint.
pub fn provider() -> HttpProvider {
    HttpProvider::from_parts(PROVIDER_ID, ENDPOINT, &MAPPING)
}

/// BrasilAPI provider against a custom endpoint template.
pub fn with_endpoint(template: impl Into<String>) -> Result<HttpProvider, SetupError> {
    HttpProvider::new(PROVIDER_ID, template, &MAPPING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostalCode;
    use crate::provider::PostalCodeProvider;

    #[test]
    fn test_default_endpoint_is_valid_template() {
        assert!(with_endpoint(ENDPOINT).is_ok());
        assert_eq!(provider().id(), "BrasilAPI");
    }

    #[test]
    fn test_request_url() {
        let code = PostalCode::new("89160222").unwrap();
        let url = provider().request_url(&code).unwrap();
        assert_eq!(url.as_str(), "https://brasilapi.com.br/api/cep/v2/89160222");
    }

    #[test]
    fn test_decode_v2_response() {
        let body = br#"{
            "cep": "89160222",
            "state": "SC",
            "city": "Rio do Sul",
            "neighborhood": "Centro",
            "street": "Rua X",
            "service": "open-cep",
            "location": { "type": "Point", "coordinates": {} }
        }"#;
        let code = PostalCode::new("89160222").unwrap();

        let address = MAPPING.decode(PROVIDER_ID, &code, body).unwrap();

        assert_eq!(address.postal_code, "89160222");
        assert_eq!(address.region_code, "SC");
        assert_eq!(address.city, "Rio do Sul");
        assert_eq!(address.district, "Centro");
        assert_eq!(address.street, "Rua X");
    }
}
