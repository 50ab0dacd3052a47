mod config;
mod main_lib;

use std::process::ExitCode;

use config::Config;
use main_lib::{build_coordinator, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?;
    init_tracing();
    let coordinator = build_coordinator(&config)?;

    tracing::info!(
        cep = %config.postal_code,
        timeout = ?config.timeout,
        policy = %config.policy,
        providers = ?coordinator.provider_ids(),
        "Starting lookup race"
    );
    let result = coordinator.race(&config.postal_code, config.timeout).await;

    let mut stdout = std::io::stdout().lock();
    postrace_lookup::report(&mut stdout, &result, config.output)?;

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
