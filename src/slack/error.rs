use std::fmt;

/// Sum type representing every possible unexceptional fail state when talking
/// to Slack.
#[derive(Debug)]
pub enum SlackError {
    /// The request never produced a usable response: DNS, connection,
    /// timeout, or a body we couldn't decode.
    APIRequestFailed(reqwest::Error),
    /// Slack answered with `"ok": false`, carrying its error code, for example
    /// `name_taken`.
    APIResponseError(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::APIRequestFailed(e) => format!("Slack API request failed: {}", e),
            SlackError::APIResponseError(e) => format!("Slack API returned error: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for SlackError {}
