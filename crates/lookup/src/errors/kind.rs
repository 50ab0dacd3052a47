use std::fmt;

/// Classification of a failed provider lookup.
///
/// The race coordinator only distinguishes success, failure and deadline;
/// the finer kind is used for log fields and report labels.
///
/// # Behavior Summary
///
/// | Kind | Produced when | Ends the race as deadline? |
/// |------|---------------|----------------------------|
/// | `Request` | The substituted URL cannot be built | No |
/// | `Transport` | Connection, TLS or body read failed | No |
/// | `Deadline` | The shared deadline elapsed mid-call | Yes |
/// | `Status` | Provider answered with a non-2xx status | No |
/// | `Decode` | Body was not the expected JSON object | No |
/// | `NotFound` | Provider flagged the code as unknown | No |
/// | `Abandoned` | The provider's task ended without an outcome | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    Request,
    Transport,
    Deadline,
    Status,
    Decode,
    NotFound,
    Abandoned,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Transport => "transport",
            Self::Deadline => "deadline",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::NotFound => "not_found",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
