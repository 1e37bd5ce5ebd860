//! Chat server API surface used by the exporter.
//!
//! The `ChatApi` trait is the seam between the export pipeline and the
//! network. `ZulipClient` implements it over the Zulip REST API; tests
//! implement it with scripted in-memory pages.
//!
//! # Contract
//!
//! - `fetch_messages` returns messages **newest-first**, together with the
//!   server's `found_oldest` flag.
//! - Every method fails with an [`ExportError`](crate::error::ExportError)
//!   of kind `RemoteService` and never retries.

mod zulip;

pub use zulip::ZulipClient;

use serde::Deserialize;
use std::fmt;

use crate::error::ExportResult;
use crate::narrow::Narrow;

/// A channel ("stream") as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    #[serde(rename = "stream_id")]
    pub id: u64,
    pub name: String,
}

/// An emoji reaction attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reaction {
    pub emoji_name: String,
    #[serde(rename = "user_id")]
    pub reactor_user_id: u64,
}

/// A message from the history endpoint, reduced to the fields we export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub id: u64,
    /// Absent for direct messages.
    #[serde(rename = "stream_id", default)]
    pub channel_id: Option<u64>,
    #[serde(rename = "sender_full_name")]
    pub sender_name: String,
    /// Unix time in seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// Reference point of a history fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The most recent message matching the narrow.
    Newest,
    /// A concrete message id.
    Message(u64),
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Newest => write!(f, "newest"),
            Anchor::Message(id) => write!(f, "{}", id),
        }
    }
}

/// Parameters of one history fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery<'a> {
    pub anchor: Anchor,
    pub include_anchor: bool,
    pub num_before: u32,
    pub num_after: u32,
    pub narrow: &'a Narrow,
}

/// One page of history as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePage {
    /// Newest-first.
    pub messages: Vec<Message>,
    pub found_oldest: bool,
}

/// Remote operations the exporter needs.
pub trait ChatApi {
    /// List channels visible to the API user.
    fn fetch_channels(
        &self,
        include_public: bool,
        include_subscribed: bool,
    ) -> ExportResult<Vec<Channel>>;

    /// Fetch one page of message history.
    fn fetch_messages(&self, query: &MessageQuery<'_>) -> ExportResult<MessagePage>;

    /// Look up a user's full name.
    fn fetch_user(&self, user_id: u64) -> ExportResult<String>;
}
