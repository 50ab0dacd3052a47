//! Generic JSON-over-HTTP provider.
//!
//! A provider is an endpoint template plus a [`FieldMapping`]. Request
//! construction is template substitution only: the percent-encoded postal
//! code replaces the `{cep}` placeholder.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::mapping::FieldMapping;
use super::traits::PostalCodeProvider;
use crate::errors::{LookupError, SetupError};
use crate::models::{NormalizedAddress, PostalCode};

/// Placeholder substituted with the postal code in endpoint templates.
pub const PLACEHOLDER: &str = "{cep}";

/// HTTP lookup provider driven by a declarative field mapping.
///
/// # Example
///
/// ```ignore
/// let provider = HttpProvider::new("MY_CEP", "https://cep.example/{cep}.json", &MAPPING)?
///     .with_simulated_latency(Duration::from_millis(400));
/// ```
pub struct HttpProvider {
    id: &'static str,
    client: Client,
    endpoint: String,
    mapping: &'static FieldMapping,
    simulated_latency: Option<Duration>,
}

impl HttpProvider {
    /// Create a provider, checking that `endpoint` holds exactly one `{cep}`.
    pub fn new(
        id: &'static str,
        endpoint: impl Into<String>,
        mapping: &'static FieldMapping,
    ) -> Result<Self, SetupError> {
        let endpoint = endpoint.into();
        if endpoint.matches(PLACEHOLDER).count() != 1 {
            return Err(SetupError::InvalidTemplate {
                provider: id.to_string(),
                template: endpoint,
            });
        }
        Ok(Self::from_parts(id, endpoint, mapping))
    }

    /// Build without checking the template. Only for known-good constants.
    pub(crate) fn from_parts(
        id: &'static str,
        endpoint: impl Into<String>,
        mapping: &'static FieldMapping,
    ) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());

        Self {
            id,
            client,
            endpoint: endpoint.into(),
            mapping,
            simulated_latency: None,
        }
    }

    /// Use a shared client instead of the provider's own.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sleep this long before issuing the request.
    ///
    /// The sleep is bounded by the deadline like the request itself.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = (!latency.is_zero()).then_some(latency);
        self
    }

    /// Substitute the postal code into the endpoint template.
    pub fn request_url(&self, code: &PostalCode) -> Result<Url, LookupError> {
        let raw = self
            .endpoint
            .replace(PLACEHOLDER, &urlencoding::encode(code.as_str()));

        Url::parse(&raw).map_err(|e| LookupError::InvalidRequest {
            provider: self.id.to_string(),
            message: format!("{}: {}", raw, e),
        })
    }

    fn timeout(&self) -> LookupError {
        LookupError::Timeout {
            provider: self.id.to_string(),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> LookupError {
        if error.is_timeout() {
            self.timeout()
        } else if error.is_builder() {
            LookupError::InvalidRequest {
                provider: self.id.to_string(),
                message: error.to_string(),
            }
        } else {
            LookupError::Transport {
                provider: self.id.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// GET the url, honouring the time left until `deadline`.
    async fn fetch(&self, url: Url, deadline: Instant) -> Result<Vec<u8>, LookupError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(self.timeout());
        }

        debug!(provider = self.id, %url, ?remaining, "Sending lookup request");

        let response = self
            .client
            .get(url)
            .timeout(remaining)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(provider = self.id, %status, "Lookup returned non-success status");
            return Err(LookupError::BadStatus {
                provider: self.id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl PostalCodeProvider for HttpProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn lookup(
        &self,
        code: &PostalCode,
        deadline: Instant,
    ) -> Result<NormalizedAddress, LookupError> {
        let url = self.request_url(code)?;

        if let Some(latency) = self.simulated_latency {
            let wake = Instant::now() + latency;
            if wake >= deadline {
                tokio::time::sleep_until(deadline).await;
                return Err(self.timeout());
            }
            tokio::time::sleep_until(wake).await;
        }

        let body = self.fetch(url, deadline).await?;
        let address = self.mapping.decode(self.id, code, &body)?;

        debug!(provider = self.id, ?address, "Lookup response decoded");
        Ok(address)
    }
}
