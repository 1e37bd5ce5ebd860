//! Message to reaction-record flattening.

use crate::api::{ChatApi, Message};
use crate::channels::ChannelDirectory;
use crate::error::{ExportError, ExportResult};
use crate::identity::IdentityResolver;

/// One reaction on one message, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    pub channel_name: String,
    pub sender_name: String,
    pub reactor_name: String,
    pub emoji_name: String,
    /// Unix time of the message, in seconds.
    pub timestamp: i64,
}

/// Produce one record per reaction on `message`, in reaction order.
///
/// The message's channel must be in `channels` even when it carries no
/// reactions; a miss means the server's data is inconsistent.
pub fn flatten<A: ChatApi + ?Sized>(
    message: &Message,
    channels: &ChannelDirectory,
    identities: &mut IdentityResolver<'_, A>,
) -> ExportResult<Vec<FlatRecord>> {
    let channel_id = message.channel_id.ok_or(ExportError::MissingChannel {
        message_id: message.id,
    })?;
    let channel_name = channels
        .name(channel_id)
        .ok_or(ExportError::UnknownChannel {
            message_id: message.id,
            channel_id,
        })?;

    message
        .reactions
        .iter()
        .map(|reaction| -> ExportResult<FlatRecord> {
            Ok(FlatRecord {
                channel_name: channel_name.to_string(),
                sender_name: message.sender_name.clone(),
                reactor_name: identities.resolve(reaction.reactor_user_id)?.to_string(),
                emoji_name: reaction.emoji_name.clone(),
                timestamp: message.timestamp,
            })
        })
        .collect()
}
