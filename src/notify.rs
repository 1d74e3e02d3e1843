//! Post a message to a channel through the configured incoming webhook.
//!
//! One attempt per invocation. Success is a `200 OK` from Slack, anything else
//! is reported along with Slack's response body.

use crate::{
    cli::NotifyArgs,
    config::NotifierConfig,
    console::Console,
    error::{Exit, Failure},
    slack::webhook::{post_webhook, WebhookOutcome, WebhookPayload},
};
use std::io::Write;
use tracing::info;

/// Where messages go when no channel is given.
pub const DEFAULT_DESTINATION: &str = "#ora-agents";

const USAGE: &str = "Usage: notify \"#channel-name\" \"Message content\"";

/// Apply argument defaults and insist on a message.
pub fn check_args(args: &NotifyArgs) -> Result<(String, String), Failure> {
    let destination = args
        .channel
        .clone()
        .filter(|x| !x.is_empty())
        .unwrap_or_else(|| DEFAULT_DESTINATION.into());

    let message = args
        .message
        .clone()
        .filter(|x| !x.is_empty())
        .ok_or_else(|| Failure::Usage(USAGE.into()))?;

    Ok((destination, message))
}

/// The whole invocation: arguments, then configuration, then one POST.
///
/// Configuration is resolved through `load_config` only once the arguments
/// are known to be usable.
pub async fn run<O, E, F>(args: &NotifyArgs, load_config: F, console: &mut Console<O, E>) -> Exit
where
    O: Write,
    E: Write,
    F: FnOnce() -> Result<NotifierConfig, Failure>,
{
    let (destination, message) = match check_args(args) {
        Ok(x) => x,
        Err(e) => {
            console.failure(&e);
            return Exit::Failed;
        }
    };

    let config = match load_config() {
        Ok(x) => x,
        Err(e) => {
            console.failure(&e);
            return Exit::Failed;
        }
    };

    post(&config, &destination, &message, console).await
}

/// Post `message` to `destination` and report how it went.
pub async fn post<O: Write, E: Write>(
    config: &NotifierConfig,
    destination: &str,
    message: &str,
    console: &mut Console<O, E>,
) -> Exit {
    let payload = WebhookPayload::new(destination, message);

    match post_webhook(&config.webhook, &payload).await {
        Ok(WebhookOutcome::Delivered) => {
            info!(destination, "Message delivered");
            console.success("Message posted to Slack");
            Exit::Success
        }
        Ok(WebhookOutcome::Rejected { status, body }) => {
            console.error(format!("Slack returned {}: {}", status.as_u16(), body));
            Exit::Failed
        }
        Err(e) => {
            console.failure_in("Error posting to Slack", &Failure::from(e));
            Exit::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{console::Captured, slack::webhook::WebhookUrl};
    use url::Url;

    fn args(channel: Option<&str>, message: Option<&str>) -> NotifyArgs {
        NotifyArgs {
            channel: channel.map(Into::into),
            message: message.map(Into::into),
            verbose: 0,
        }
    }

    fn config(srv: &mockito::ServerGuard) -> NotifierConfig {
        NotifierConfig {
            webhook: WebhookUrl(Url::parse(&format!("{}/services/T/B/X", srv.url())).unwrap()),
        }
    }

    #[test]
    fn test_check_args() {
        assert_eq!(
            check_args(&args(None, Some("hi"))).unwrap(),
            ("#ora-agents".to_string(), "hi".to_string())
        );
        assert_eq!(
            check_args(&args(Some(""), Some("hi"))).unwrap().0,
            "#ora-agents"
        );
        assert!(matches!(
            check_args(&args(Some("#ops"), Some(""))),
            Err(Failure::Usage(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_message_makes_no_calls() {
        let mut srv = mockito::Server::new_async().await;
        let mock = srv
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut console = Captured::captured();
        let cfg = config(&srv);
        let exit = run(&args(Some("#ops"), None), || Ok(cfg), &mut console).await;

        mock.assert_async().await;
        assert_eq!(exit, Exit::Failed);

        let (_, err) = console.output();
        assert!(err.contains("Usage: notify"));
    }

    #[tokio::test]
    async fn test_usage_checked_before_configuration() {
        let mut console = Captured::captured();
        let exit = run(
            &args(None, None),
            || panic!("configuration shouldn't be loaded"),
            &mut console,
        )
        .await;

        assert_eq!(exit, Exit::Failed);
    }

    #[tokio::test]
    async fn test_missing_webhook() {
        let mut console = Captured::captured();
        let exit = run(
            &args(None, Some("hi")),
            || NotifierConfig::from_lookup(|_| None),
            &mut console,
        )
        .await;

        assert_eq!(exit, Exit::Failed);

        let (_, err) = console.output();
        assert!(err.contains("SLACK_WEBHOOK_URL environment variable not set"));
        assert!(err.contains("export SLACK_WEBHOOK_URL="));
    }

    #[tokio::test]
    async fn test_ok() {
        let mut srv = mockito::Server::new_async().await;
        let mock = srv
            .mock("POST", "/services/T/B/X")
            .with_body("ok")
            .create_async()
            .await;

        let mut console = Captured::captured();
        let cfg = config(&srv);
        let exit = run(&args(Some("#ops"), Some("hi")), || Ok(cfg), &mut console).await;

        mock.assert_async().await;
        assert_eq!(exit, Exit::Success);

        let (out, _) = console.output();
        assert!(out.contains("Message posted to Slack"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut srv = mockito::Server::new_async().await;
        let _mock = srv
            .mock("POST", "/services/T/B/X")
            .with_status(404)
            .with_body("channel_not_found")
            .create_async()
            .await;

        let mut console = Captured::captured();
        let exit = post(&config(&srv), "#nope", "hi", &mut console).await;

        assert_eq!(exit, Exit::Failed);

        let (_, err) = console.output();
        assert!(err.contains("Slack returned 404: channel_not_found"));
    }

    #[tokio::test]
    async fn test_unreachable() {
        let cfg = NotifierConfig {
            webhook: WebhookUrl(Url::parse("http://127.0.0.1:1/hook").unwrap()),
        };

        let mut console = Captured::captured();
        let exit = post(&cfg, "#ops", "hi", &mut console).await;

        assert_eq!(exit, Exit::Failed);

        let (_, err) = console.output();
        assert!(err.contains("Error posting to Slack: Slack API request failed"));
    }
}
