//! Post plain messages through a Slack incoming webhook.
//!
//! Webhooks are created in the Slack app settings and are a credential in
//! their own right: whoever holds the URL can post. Unlike the Web API they
//! don't answer with the `ok` envelope, just a status code and a short
//! plaintext body such as `ok` or `channel_not_found`.
//!
//! <https://api.slack.com/messaging/webhooks>

use super::error::SlackError;
use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

/// The display name messages are posted under.
pub const USERNAME: &str = "Ora Agent System";

/// The emoji used as the poster's avatar.
pub const ICON_EMOJI: &str = ":robot_face:";

/// A newtype wrapper around an incoming webhook URL, which is a secret.
#[derive(Clone)]
pub struct WebhookUrl(pub Url);

impl fmt::Debug for WebhookUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WebhookUrl({}://{}/..)", self.0.scheme(), self.0.host_str().unwrap_or(""))
    }
}

/// The JSON body accepted by incoming webhooks.
///
/// `channel`, `username`, and `icon_emoji` are only honoured by legacy
/// webhooks; newer ones post to the channel they were created for and ignore
/// them.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub text: String,
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
}

impl WebhookPayload {
    /// A payload posted under the Ora agent identity.
    pub fn new(channel: &str, text: &str) -> Self {
        WebhookPayload {
            text: text.to_owned(),
            channel: channel.to_owned(),
            username: USERNAME.to_owned(),
            icon_emoji: ICON_EMOJI.to_owned(),
        }
    }
}

/// How Slack answered a webhook request that did reach it.
#[derive(Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    Delivered,
    Rejected { status: StatusCode, body: String },
}

/// Send a single payload. No retries: a failure is reported, not repeated.
///
/// Any status other than `200 OK` is a rejection. Failing to reach Slack at
/// all is an [SlackError::APIRequestFailed].
pub async fn post_webhook(
    url: &WebhookUrl,
    payload: &WebhookPayload,
) -> Result<WebhookOutcome, SlackError> {
    debug!(channel = %payload.channel, "Posting to webhook");

    // `json` sets `Content-Type: application/json` for us.
    let res = reqwest::Client::new()
        .post(url.0.clone())
        .json(payload)
        .send()
        .await?;

    let status = res.status();
    if status == StatusCode::OK {
        return Ok(WebhookOutcome::Delivered);
    }

    let body = res.text().await?;
    Ok(WebhookOutcome::Rejected { status, body })
}
