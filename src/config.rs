//! Configuration read from the environment once, at startup, and handed to
//! the workflows from there.
//!
//! A `.env` file in the working directory is honoured, see [load_dotenv].

use crate::{
    error::Failure,
    project::DEFAULT_CHANNEL_PREFIX,
    slack::{api::API_BASE, auth::SlackAccessToken, webhook::WebhookUrl},
};
use dotenvy::dotenv;
use std::env;
use tracing::debug;
use url::Url;

pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
pub const BOT_TOKEN_VAR: &str = "SLACK_BOT_TOKEN";
pub const CHANNEL_PREFIX_VAR: &str = "SLACK_CHANNEL_PREFIX";
pub const API_BASE_VAR: &str = "SLACK_API_BASE";

/// Load `.env` into the process environment if there is one. Variables that
/// are already set win.
pub fn load_dotenv() {
    if dotenv().is_err() {
        debug!("No .env found");
    }
}

/// Remediation advice for a missing or unusable variable.
pub fn hint(var: &str) -> &'static [&'static str] {
    match var {
        WEBHOOK_URL_VAR => &[
            "Set it with: export SLACK_WEBHOOK_URL=\"https://hooks.slack.com/services/YOUR/WEBHOOK/URL\"",
        ],
        BOT_TOKEN_VAR => &[
            "Get a bot token from: https://api.slack.com/apps",
            "Required scopes: channels:read, groups:read, channels:manage, groups:write",
        ],
        _ => &[],
    }
}

/// Treat empty values as though they weren't set at all.
fn non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|x| !x.is_empty())
}

fn process_env(var: &str) -> Option<String> {
    env::var(var).ok()
}

/// Everything `notify` needs.
#[derive(Debug)]
pub struct NotifierConfig {
    pub webhook: WebhookUrl,
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self, Failure> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Failure>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = non_empty(&lookup, WEBHOOK_URL_VAR).ok_or(Failure::Configuration {
            var: WEBHOOK_URL_VAR,
            reason: "environment variable not set".into(),
        })?;

        let url = Url::parse(&raw).map_err(|e| Failure::Configuration {
            var: WEBHOOK_URL_VAR,
            reason: format!("is not a valid URL: {}", e),
        })?;

        Ok(NotifierConfig {
            webhook: WebhookUrl(url),
        })
    }
}

/// Everything `provision` needs.
#[derive(Debug)]
pub struct ProvisionerConfig {
    pub token: SlackAccessToken,
    pub channel_prefix: String,
    pub api_base: String,
}

impl ProvisionerConfig {
    pub fn from_env() -> Result<Self, Failure> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Failure>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = non_empty(&lookup, BOT_TOKEN_VAR).ok_or(Failure::Configuration {
            var: BOT_TOKEN_VAR,
            reason: "environment variable not set".into(),
        })?;

        Ok(ProvisionerConfig {
            token: SlackAccessToken(token),
            channel_prefix: non_empty(&lookup, CHANNEL_PREFIX_VAR)
                .unwrap_or_else(|| DEFAULT_CHANNEL_PREFIX.into()),
            api_base: non_empty(&lookup, API_BASE_VAR).unwrap_or_else(|| API_BASE.into()),
        })
    }
}
