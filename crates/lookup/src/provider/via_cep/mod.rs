//! ViaCEP postal-code provider.
//!
//! # API Endpoint
//!
//! - JSON lookup: `http://viacep.com.br/ws/{cep}/json/`
//!
//! # Response Format
//!
//! Flat JSON object with Portuguese keys (`cep`, `logradouro`, `bairro`,
//! `localidade`, `uf`, `ibge`, ...). The code comes back hyphenated
//! (`89160-222`). Unknown codes are answered with HTTP 200 and
//! `{"erro": true}`, so the mapping declares `erro` as its error flag.

use crate::errors::SetupError;
use crate::provider::{FieldMapping, HttpProvider};

pub const PROVIDER_ID: &str = "ViaCEP";

/// Default endpoint template
pub const ENDPOINT: &str = "http://viacep.com.br/ws/{cep}/json/";

pub static MAPPING: FieldMapping = FieldMapping {
    postal_code: Some("cep"),
    region_code: Some("uf"),
    city: Some("localidade"),
    district: Some("bairro"),
    street: Some("logradouro"),
    error_flag: Some("erro"),
};

/// ViaCEP provider against the public endpoint.
pub fn provider() -> HttpProvider {
    HttpProvider::from_parts(PROVIDER_ID, ENDPOINT, &MAPPING)
}

/// ViaCEP provider against a custom endpoint template.
pub fn with_endpoint(template: impl Into<String>) -> Result<HttpProvider, SetupError> {
    HttpProvider::new(PROVIDER_ID, template, &MAPPING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LookupError;
    use crate::models::PostalCode;
    use serde_json::json;
    use tokio::time::{Duration, Instant};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::provider::PostalCodeProvider;

    #[test]
    fn test_default_endpoint_is_valid_template() {
        assert!(with_endpoint(ENDPOINT).is_ok());
        let code = PostalCode::new("89160222").unwrap();
        let url = provider().request_url(&code).unwrap();
        assert_eq!(url.as_str(), "http://viacep.com.br/ws/89160222/json/");
    }

    #[test]
    fn test_decode_response_ignores_ibge() {
        let body = br#"{
            "cep": "89160-222",
            "logradouro": "Rua X",
            "complemento": "",
            "bairro": "Centro",
            "localidade": "Rio do Sul",
            "uf": "SC",
            "ibge": "4214805",
            "gia": "",
            "ddd": "47",
            "siafi": "8311"
        }"#;
        let code = PostalCode::new("89160222").unwrap();

        let address = MAPPING.decode(PROVIDER_ID, &code, body).unwrap();

        assert_eq!(address.postal_code, "89160-222");
        assert_eq!(address.street, "Rua X");
        assert_eq!(address.district, "Centro");
        assert_eq!(address.city, "Rio do Sul");
        assert_eq!(address.region_code, "SC");
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ws/99999999/json/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
            .mount(&server)
            .await;

        let provider = with_endpoint(format!("{}/ws/{{cep}}/json/", server.uri())).unwrap();
        let code = PostalCode::new("99999999").unwrap();

        let error = provider
            .lookup(&code, Instant::now() + Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            LookupError::NotFound {
                provider: "ViaCEP".to_string(),
                code: "99999999".to_string(),
            }
        );
    }
}
