use std::fmt;
use std::str::FromStr;

/// How the coordinator picks a winner among arriving outcomes.
///
/// | Policy | A failure arrives first | All providers fail |
/// |--------|-------------------------|--------------------|
/// | `FirstArrival` | The failure wins and is reported | First failure wins |
/// | `FirstSuccess` | Recorded, keep waiting | `AllFailed` |
///
/// Both policies return `DeadlineExceeded` if nothing decisive arrives
/// before the deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RacePolicy {
    /// Whatever arrives first is the result, success or failure.
    #[default]
    FirstArrival,

    /// Only a success wins; failures are collected until every provider
    /// has failed.
    FirstSuccess,
}

impl RacePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstArrival => "first-arrival",
            Self::FirstSuccess => "first-success",
        }
    }
}

impl fmt::Display for RacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-arrival" => Ok(Self::FirstArrival),
            "first-success" => Ok(Self::FirstSuccess),
            other => Err(format!(
                "unknown race policy '{}', expected 'first-arrival' or 'first-success'",
                other
            )),
        }
    }
}
