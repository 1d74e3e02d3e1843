//! Interact with Slack channels: find them by name, create them, and describe
//! them.

use super::{api::*, auth::SlackAccessToken, error::SlackError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::fmt;
use tracing::debug;
use url::Url;

/// Where Slack redirects a browser into the right client and channel.
const APP_REDIRECT: &str = "https://slack.com/app_redirect";

/// Channel names as are visible in the Slack UI, without the leading hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelName(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// use iris::slack::channel::ChannelName;
///
/// let x = ChannelName("fp".into());
/// assert_eq!(format!("{}", x), "fp");
/// ```
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Because channel names can change, channels are generally referred to by
/// their underlying ID, for example `C0123456789`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// The metadata we care about per-channel. Owned by Slack; we only ever read
/// or create it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelRecord {
    pub id: ChannelId,
    pub name: ChannelName,
    #[serde(default)]
    is_private: bool,
}

impl ChannelRecord {
    pub fn new(id: ChannelId, name: ChannelName, visibility: Visibility) -> Self {
        ChannelRecord {
            id,
            name,
            is_private: visibility == Visibility::Private,
        }
    }

    pub fn visibility(&self) -> Visibility {
        if self.is_private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

/// A link that opens the channel directly in whichever Slack client the
/// browser hands off to.
///
/// ```
/// use iris::slack::channel::{deep_link, ChannelId};
///
/// assert_eq!(
///     deep_link(&ChannelId("C024BE91L".into())).as_str(),
///     "https://slack.com/app_redirect?channel=C024BE91L"
/// );
/// ```
pub fn deep_link(id: &ChannelId) -> Url {
    // This unwrap is tested below.
    Url::parse_with_params(APP_REDIRECT, &[("channel", &id.0)]).unwrap()
}

/// <https://api.slack.com/methods/conversations.list#args>
#[derive(Serialize)]
struct ListRequest<'a> {
    /// Maximum supported is 1000, but a limit of 200 is "recommended".
    limit: u16,
    types: &'static str,
    /// Doesn't affect `limit`.
    exclude_archived: bool,
    cursor: Option<&'a str>,
}

/// <https://api.slack.com/methods/conversations.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channels: Vec<ChannelRecord>,
    #[serde(default)]
    response_metadata: PaginationMeta,
}

/// The metadata attached to a [ListResponse], enabling pagination.
#[serde_as]
#[derive(Default, Deserialize)]
struct PaginationMeta {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    next_cursor: Option<String>,
}

/// <https://api.slack.com/methods/conversations.create#args>
#[derive(Serialize)]
struct CreateRequest<'a> {
    name: &'a ChannelName,
    is_private: bool,
}

/// <https://api.slack.com/methods/conversations.create#examples>
#[derive(Deserialize)]
struct CreateResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channel: ChannelRecord,
}

/// <https://api.slack.com/methods/conversations.setTopic#args>
#[derive(Serialize)]
struct TopicRequest<'a> {
    channel: &'a ChannelId,
    topic: &'a str,
}

/// <https://api.slack.com/methods/conversations.setPurpose#args>
#[derive(Serialize)]
struct PurposeRequest<'a> {
    channel: &'a ChannelId,
    purpose: &'a str,
}

impl SlackClient {
    /// List every non-archived public and private channel visible to the
    /// token, following pagination to the end. A cursor that doesn't move is
    /// treated as the end.
    pub async fn list_channels(
        &self,
        token: &SlackAccessToken,
    ) -> Result<Vec<ChannelRecord>, SlackError> {
        let mut channels: Vec<ChannelRecord> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            debug!(?cursor, "Listing channels");

            let mut res = self
                .get("/conversations.list", token)
                .query(&ListRequest {
                    limit: 200,
                    types: "public_channel,private_channel",
                    exclude_archived: true,
                    cursor: cursor.as_deref(),
                })
                .send()
                .await?
                .json::<APIResult<ListResponse>>()
                .await?
                .into_result()?;

            channels.append(&mut res.channels);

            let next = res.response_metadata.next_cursor;
            if next.is_none() || next == cursor {
                break Ok(channels);
            }

            cursor = next;
        }
    }

    /// Look for a channel by its exact name.
    pub async fn find_channel(
        &self,
        name: &ChannelName,
        token: &SlackAccessToken,
    ) -> Result<Option<ChannelRecord>, SlackError> {
        let channels = self.list_channels(token).await?;

        Ok(channels.into_iter().find(|c| &c.name == name))
    }

    /// Create a channel. Slack rejects names already in use with `name_taken`.
    pub async fn create_channel(
        &self,
        name: &ChannelName,
        visibility: Visibility,
        token: &SlackAccessToken,
    ) -> Result<ChannelRecord, SlackError> {
        debug!(channel = %name, "Creating channel");

        let res = self
            .post("/conversations.create", token)
            .json(&CreateRequest {
                name,
                is_private: visibility == Visibility::Private,
            })
            .send()
            .await?
            .json::<APIResult<CreateResponse>>()
            .await?
            .into_result()?;

        Ok(res.channel)
    }

    pub async fn set_topic(
        &self,
        channel: &ChannelId,
        topic: &str,
        token: &SlackAccessToken,
    ) -> Result<(), SlackError> {
        debug!(channel = %channel, "Setting topic");

        self.post("/conversations.setTopic", token)
            .json(&TopicRequest { channel, topic })
            .send()
            .await?
            .json::<APIResult<EmptyResponse>>()
            .await?
            .into_result()
            .map(|_| ())
    }

    pub async fn set_purpose(
        &self,
        channel: &ChannelId,
        purpose: &str,
        token: &SlackAccessToken,
    ) -> Result<(), SlackError> {
        debug!(channel = %channel, "Setting purpose");

        self.post("/conversations.setPurpose", token)
            .json(&PurposeRequest { channel, purpose })
            .send()
            .await?
            .json::<APIResult<EmptyResponse>>()
            .await?
            .into_result()
            .map(|_| ())
    }
}
