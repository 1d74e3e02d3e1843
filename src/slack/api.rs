//! Type definitions and helpers for the Slack Web API.

use super::{auth::*, error::SlackError};
use serde::Deserialize;

/// The base URL of the Slack Web API.
pub const API_BASE: &str = "https://slack.com/api";

/// A client for Slack's Web API, holding a connection pool internally as per
/// [reqwest::Client].
///
/// The base URL is configurable so that tests can point it at a mock server.
pub struct SlackClient {
    base: String,
    http: reqwest::Client,
}

impl SlackClient {
    pub fn new(base: String) -> Self {
        SlackClient {
            base: base.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a GET request to any Slack API endpoint, handling authentication.
    pub fn get<T: ToString>(&self, path: T, token: &SlackAccessToken) -> reqwest::RequestBuilder {
        self.http
            .get(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub fn post<T: ToString>(&self, path: T, token: &SlackAccessToken) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": {}
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "name_taken"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

impl<T> APIResult<T> {
    /// Collapse into a [Result], keeping Slack's error code on failure.
    pub fn into_result(self) -> Result<T, SlackError> {
        match self {
            APIResult::Ok(x) => Ok(x),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

/// A successful response with no payload we care about.
#[derive(Deserialize)]
pub struct EmptyResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}
