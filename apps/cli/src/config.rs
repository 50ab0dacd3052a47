use std::time::Duration;

use anyhow::{anyhow, Context};
use postrace_lookup::{brasil_api, via_cep, PostalCode, RacePolicy, ReportFormat};

const DEFAULT_CEP: &str = "89160222";
const DEFAULT_TIMEOUT_MS: u64 = 1000;

pub struct Config {
    pub postal_code: PostalCode,
    pub timeout: Duration,
    pub policy: RacePolicy,
    pub simulated_delay: Duration,
    pub brasil_api_url: String,
    pub via_cep_url: String,
    pub output: ReportFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let postal_code = PostalCode::new(var("POSTRACE_CEP").unwrap_or_else(|| DEFAULT_CEP.into()))
            .context("Invalid POSTRACE_CEP")?;
        let timeout_ms = parse_millis(&var, "POSTRACE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let delay_ms = parse_millis(&var, "POSTRACE_SIMULATED_DELAY_MS", 0)?;
        let policy = var("POSTRACE_POLICY")
            .map(|s| s.parse::<RacePolicy>())
            .transpose()
            .map_err(|e| anyhow!("Invalid POSTRACE_POLICY: {}", e))?
            .unwrap_or_default();
        let output = var("POSTRACE_OUTPUT")
            .map(|s| s.parse::<ReportFormat>())
            .transpose()
            .map_err(|e| anyhow!("Invalid POSTRACE_OUTPUT: {}", e))?
            .unwrap_or_default();
        let brasil_api_url =
            var("POSTRACE_BRASILAPI_URL").unwrap_or_else(|| brasil_api::ENDPOINT.into());
        let via_cep_url = var("POSTRACE_VIACEP_URL").unwrap_or_else(|| via_cep::ENDPOINT.into());

        Ok(Self {
            postal_code,
            timeout: Duration::from_millis(timeout_ms),
            policy,
            simulated_delay: Duration::from_millis(delay_ms),
            brasil_api_url,
            via_cep_url,
            output,
        })
    }
}

fn parse_millis(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> anyhow::Result<u64> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.postal_code.as_str(), "89160222");
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.policy, RacePolicy::FirstArrival);
        assert_eq!(config.simulated_delay, Duration::ZERO);
        assert_eq!(config.brasil_api_url, brasil_api::ENDPOINT);
        assert_eq!(config.via_cep_url, via_cep::ENDPOINT);
        assert_eq!(config.output, ReportFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("POSTRACE_CEP", "01001000"),
            ("POSTRACE_TIMEOUT_MS", "1"),
            ("POSTRACE_POLICY", "first-success"),
            ("POSTRACE_SIMULATED_DELAY_MS", "400"),
            ("POSTRACE_OUTPUT", "json"),
        ])
        .unwrap();
        assert_eq!(config.postal_code.as_str(), "01001000");
        assert_eq!(config.timeout, Duration::from_millis(1));
        assert_eq!(config.policy, RacePolicy::FirstSuccess);
        assert_eq!(config.simulated_delay, Duration::from_millis(400));
        assert_eq!(config.output, ReportFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config(&[("POSTRACE_CEP", " ")]).is_err());
        assert!(config(&[("POSTRACE_TIMEOUT_MS", "soon")]).is_err());
        assert!(config(&[("POSTRACE_POLICY", "fastest")]).is_err());
        assert!(config(&[("POSTRACE_OUTPUT", "yaml")]).is_err());
    }
}
