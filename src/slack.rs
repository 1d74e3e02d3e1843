//! The slice of Slack that Iris talks to.
//!
//! Two surfaces are supported, and they don't share credentials:
//!
//! - The Web API, authenticated with a bot token, for channel management. See
//!   [api::SlackClient] and [channel].
//! - Incoming webhooks, which are their own credential. See [webhook].

pub mod api;
pub mod auth;
pub mod channel;
pub mod error;
pub mod webhook;

pub use self::error::SlackError;
