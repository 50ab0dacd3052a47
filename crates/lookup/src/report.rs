//! Result reporting.
//!
//! Turns a [`RaceResult`] into console text or a JSON document. Failures and
//! deadline misses are also logged at `warn`.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::errors::LookupError;
use crate::models::{NormalizedAddress, ProviderOutcome};
use crate::race::RaceResult;

/// Output format for [`report`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            Ok(Self::Text)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(format!("unknown report format '{}', expected 'text' or 'json'", s))
        }
    }
}

/// Write the race result to `out`.
pub fn report<W: Write>(out: &mut W, result: &RaceResult, format: ReportFormat) -> io::Result<()> {
    match result {
        RaceResult::Winner(outcome) => {
            if let Err(error) = &outcome.result {
                warn!(
                    provider = %outcome.provider,
                    kind = %error.kind(),
                    "Winning provider failed: {}",
                    error
                );
            }
        }
        RaceResult::DeadlineExceeded { timeout } => {
            warn!(?timeout, "Deadline exceeded before any provider answered");
        }
        RaceResult::AllFailed(failures) => {
            warn!(count = failures.len(), "All providers failed");
        }
    }

    out.write_all(render(result, format).as_bytes())?;
    out.flush()
}

/// Render the race result without writing it anywhere.
pub fn render(result: &RaceResult, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(result),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&ReportView::from(result))
                .unwrap_or_else(|e| format!("{{\"status\":\"error\",\"error\":\"{}\"}}", e));
            json.push('\n');
            json
        }
    }
}

fn render_text(result: &RaceResult) -> String {
    let mut text = String::new();

    match result {
        RaceResult::Winner(outcome) => match &outcome.result {
            Ok(address) => {
                let _ = writeln!(text, "Fastest response from {}:", outcome.provider);
                let _ = writeln!(text, "Response time: {}", millis(outcome.elapsed));
                let _ = writeln!(text, "CEP: {}", address.postal_code);
                let _ = writeln!(text, "Street: {}", address.street);
                let _ = writeln!(text, "District: {}", address.district);
                let _ = writeln!(text, "State: {}", address.region_code);
            }
            Err(error) => {
                let _ = writeln!(
                    text,
                    "Error fetching data from {} after {}: {}",
                    outcome.provider,
                    millis(outcome.elapsed),
                    error
                );
            }
        },
        RaceResult::DeadlineExceeded { timeout } => {
            let _ = writeln!(
                text,
                "Deadline of {} exceeded, no provider answered in time.",
                millis(*timeout)
            );
        }
        RaceResult::AllFailed(failures) if failures.is_empty() => {
            text.push_str("No providers configured.\n");
        }
        RaceResult::AllFailed(failures) => {
            text.push_str("All providers failed:\n");
            for outcome in failures {
                if let Err(error) = &outcome.result {
                    let _ = writeln!(
                        text,
                        "  {} ({}, {}): {}",
                        outcome.provider,
                        error.kind(),
                        millis(outcome.elapsed),
                        error
                    );
                }
            }
        }
    }

    text
}

fn millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

fn elapsed_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ReportView<'a> {
    Success {
        provider: &'a str,
        elapsed_ms: u64,
        address: &'a NormalizedAddress,
    },
    Failure(FailureView<'a>),
    DeadlineExceeded {
        timeout_ms: u64,
    },
    AllFailed {
        failures: Vec<FailureView<'a>>,
    },
}

#[derive(Serialize)]
struct FailureView<'a> {
    provider: &'a str,
    elapsed_ms: u64,
    kind: &'static str,
    error: String,
}

impl<'a> FailureView<'a> {
    fn new(outcome: &'a ProviderOutcome, error: &LookupError) -> Self {
        Self {
            provider: &outcome.provider,
            elapsed_ms: elapsed_ms(outcome.elapsed),
            kind: error.kind().as_str(),
            error: error.to_string(),
        }
    }
}

impl<'a> From<&'a RaceResult> for ReportView<'a> {
    fn from(result: &'a RaceResult) -> Self {
        match result {
            RaceResult::Winner(outcome) => match &outcome.result {
                Ok(address) => Self::Success {
                    provider: &outcome.provider,
                    elapsed_ms: elapsed_ms(outcome.elapsed),
                    address,
                },
                Err(error) => Self::Failure(FailureView::new(outcome, error)),
            },
            RaceResult::DeadlineExceeded { timeout } => Self::DeadlineExceeded {
                timeout_ms: elapsed_ms(*timeout),
            },
            RaceResult::AllFailed(failures) => Self::AllFailed {
                failures: failures
                    .iter()
                    .filter_map(|o| o.error().map(|e| FailureView::new(o, e)))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn winner() -> RaceResult {
        RaceResult::Winner(ProviderOutcome::success(
            Cow::Borrowed("BrasilAPI"),
            NormalizedAddress {
                postal_code: "89160222".to_string(),
                region_code: "SC".to_string(),
                city: "Rio do Sul".to_string(),
                district: "Centro".to_string(),
                street: "Rua X".to_string(),
            },
            Duration::from_millis(52),
        ))
    }

    fn transport_failure(provider: &'static str, ms: u64) -> ProviderOutcome {
        ProviderOutcome::failure(
            Cow::Borrowed(provider),
            LookupError::Transport {
                provider: provider.to_string(),
                message: "connection reset".to_string(),
            },
            Duration::from_millis(ms),
        )
    }

    #[test]
    fn test_text_success() {
        assert_eq!(
            render(&winner(), ReportFormat::Text),
            "Fastest response from BrasilAPI:\n\
             Response time: 52ms\n\
             CEP: 89160222\n\
             Street: Rua X\n\
             District: Centro\n\
             State: SC\n"
        );
    }

    #[test]
    fn test_text_winning_failure_is_reported() {
        let result = RaceResult::Winner(transport_failure("ViaCEP", 10));
        assert_eq!(
            render(&result, ReportFormat::Text),
            "Error fetching data from ViaCEP after 10ms: Transport error: ViaCEP - connection reset\n"
        );
    }

    #[test]
    fn test_text_deadline_distinct_from_failure() {
        let result = RaceResult::DeadlineExceeded {
            timeout: Duration::from_secs(1),
        };
        let text = render(&result, ReportFormat::Text);
        assert_eq!(text, "Deadline of 1000ms exceeded, no provider answered in time.\n");
        assert!(!text.contains("Error fetching"));
    }

    #[test]
    fn test_text_all_failed_lists_each_provider() {
        let result = RaceResult::AllFailed(vec![
            transport_failure("ViaCEP", 10),
            transport_failure("BrasilAPI", 30),
        ]);
        let text = render(&result, ReportFormat::Text);
        assert!(text.starts_with("All providers failed:\n"));
        assert!(text.contains("  ViaCEP (transport, 10ms):"));
        assert!(text.contains("  BrasilAPI (transport, 30ms):"));

        let empty = RaceResult::AllFailed(Vec::new());
        assert_eq!(render(&empty, ReportFormat::Text), "No providers configured.\n");
    }

    #[test]
    fn test_text_crashed_worker_is_not_reported_as_empty_race() {
        let result = RaceResult::AllFailed(vec![ProviderOutcome::failure(
            Cow::Borrowed("ViaCEP"),
            LookupError::Abandoned {
                provider: "ViaCEP".to_string(),
            },
            Duration::from_millis(7),
        )]);
        let text = render(&result, ReportFormat::Text);
        assert_eq!(
            text,
            "All providers failed:\n  \
             ViaCEP (abandoned, 7ms): Worker exited without an outcome: ViaCEP\n"
        );
        assert!(!text.contains("No providers configured"));
    }

    #[test]
    fn test_json_success() {
        let json: serde_json::Value =
            serde_json::from_str(&render(&winner(), ReportFormat::Json)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["provider"], "BrasilAPI");
        assert_eq!(json["elapsed_ms"], 52);
        assert_eq!(json["address"]["district"], "Centro");
        assert_eq!(json["address"]["region_code"], "SC");
    }

    #[test]
    fn test_json_failure_and_deadline() {
        let result = RaceResult::Winner(transport_failure("ViaCEP", 10));
        let json: serde_json::Value =
            serde_json::from_str(&render(&result, ReportFormat::Json)).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "transport");

        let result = RaceResult::DeadlineExceeded {
            timeout: Duration::from_millis(1),
        };
        let json: serde_json::Value =
            serde_json::from_str(&render(&result, ReportFormat::Json)).unwrap();
        assert_eq!(json["status"], "deadline_exceeded");
        assert_eq!(json["timeout_ms"], 1);
    }

    #[test]
    fn test_report_writes_rendered_text() {
        let mut out = Vec::new();
        report(&mut out, &winner(), ReportFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            render(&winner(), ReportFormat::Text)
        );
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse(), Ok(ReportFormat::Json));
        assert_eq!("text".parse(), Ok(ReportFormat::Text));
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
