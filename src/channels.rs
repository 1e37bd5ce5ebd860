//! Channel id to name snapshot, loaded once per run.

use std::collections::HashMap;
use tracing::info;

use crate::api::{Channel, ChatApi};
use crate::error::ExportResult;

/// Immutable mapping from channel id to channel name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelDirectory {
    names: HashMap<u64, String>,
}

impl ChannelDirectory {
    /// Fetch all public channels, plus subscribed ones when asked.
    pub fn load<A: ChatApi + ?Sized>(api: &A, include_subscribed: bool) -> ExportResult<Self> {
        let channels = api.fetch_channels(true, include_subscribed)?;
        let directory = Self::from_channels(channels);
        info!(channels = directory.len(), include_subscribed, "loaded channel directory");
        Ok(directory)
    }

    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            names: channels.into_iter().map(|c| (c.id, c.name)).collect(),
        }
    }

    pub fn name(&self, channel_id: u64) -> Option<&str> {
        self.names.get(&channel_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
