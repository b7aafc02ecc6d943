use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{chat::Chat, user::User};

/// A [change of a reaction][1] on a message performed by a user.
///
/// [1]: https://core.telegram.org/bots/api#messagereactionupdated
#[derive(Debug, Deserialize)]
#[must_use]
pub struct MessageReactionUpdated {
    pub chat: Arc<Chat>,

    pub message_id: u64,

    #[serde(default)]
    pub user: Option<Arc<User>>,

    #[serde(default)]
    pub actor_chat: Option<Arc<Chat>>,

    pub date: i64,

    pub old_reaction: Vec<ReactionType>,

    pub new_reaction: Vec<ReactionType>,
}

/// [Anonymous reaction changes][1] on a message.
///
/// [1]: https://core.telegram.org/bots/api#messagereactioncountupdated
#[derive(Debug, Deserialize)]
#[must_use]
pub struct MessageReactionCountUpdated {
    pub chat: Arc<Chat>,

    pub message_id: u64,

    pub date: i64,

    pub reactions: Vec<ReactionCount>,
}

/// <https://core.telegram.org/bots/api#reactioncount>
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ReactionCount {
    #[serde(rename = "type")]
    pub kind: ReactionType,

    pub total_count: u32,
}

/// The [type of a reaction][1].
///
/// [1]: https://core.telegram.org/bots/api#reactiontype
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[must_use]
pub enum ReactionType {
    Emoji { emoji: String },
    CustomEmoji { custom_emoji_id: String },
    Paid,
}
