use std::sync::Arc;

use crate::config::Config;
use postrace_lookup::{brasil_api, via_cep, PostalCodeProvider, RaceCoordinator};
use reqwest::Client;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing() {
    let log_format = std::env::var("POSTRACE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout carries only the report.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Build the BrasilAPI and ViaCEP providers sharing one HTTP client.
pub fn build_coordinator(config: &Config) -> anyhow::Result<RaceCoordinator> {
    let client = Client::builder()
        .user_agent(concat!("postrace/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let brasil = brasil_api::with_endpoint(config.brasil_api_url.clone())?
        .with_client(client.clone())
        .with_simulated_latency(config.simulated_delay);
    let via = via_cep::with_endpoint(config.via_cep_url.clone())?
        .with_client(client)
        .with_simulated_latency(config.simulated_delay);

    let providers: Vec<Arc<dyn PostalCodeProvider>> = vec![Arc::new(brasil), Arc::new(via)];
    Ok(RaceCoordinator::with_policy(providers, config.policy))
}
