use crate::{project::ProjectNameError, slack::SlackError};
use std::{fmt, process::ExitCode};

/// Sum type representing every way an invocation can fail. All of them are
/// terminal; nothing is retried.
#[derive(Debug)]
pub enum Failure {
    /// Missing or malformed command-line arguments.
    Usage(String),
    /// The project name broke a naming rule.
    Validation(ProjectNameError),
    /// A required credential or secret is absent or unusable.
    Configuration { var: &'static str, reason: String },
    /// Slack answered, and said no.
    RemoteRejection(String),
    /// Slack couldn't be reached, or answered with something unreadable.
    Transport(String),
}

impl From<SlackError> for Failure {
    fn from(e: SlackError) -> Self {
        match e {
            SlackError::APIRequestFailed(e) => Failure::Transport(e.to_string()),
            SlackError::APIResponseError(e) => Failure::RemoteRejection(e),
        }
    }
}

impl From<ProjectNameError> for Failure {
    fn from(e: ProjectNameError) -> Self {
        Failure::Validation(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::Usage(e) => e.to_owned(),
            Failure::Validation(e) => format!("Invalid project name format: {}", e),
            Failure::Configuration { var, reason } => format!("{} {}", var, reason),
            Failure::RemoteRejection(e) => format!("Slack API returned error: {}", e),
            Failure::Transport(e) => format!("Slack API request failed: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for Failure {}

/// What the process tells its caller. Automation only ever sees these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failed,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failed => 1,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(x: Exit) -> Self {
        ExitCode::from(x.code())
    }
}
