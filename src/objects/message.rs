use std::sync::Arc;

use serde::Deserialize;

use crate::{
    cache::EntityRef,
    objects::{chat::Chat, user::User},
};

/// This object represents a [message][1].
///
/// Service-message fields (`new_chat_members`, `left_chat_member`, the
/// `*_chat_created` flags) drive the dispatcher's event overrides.
///
/// [1]: https://core.telegram.org/bots/api#message
#[derive(Debug, Deserialize)]
#[must_use]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: u64,

    #[serde(default)]
    pub from: Option<Arc<User>>,

    pub date: i64,

    pub chat: Arc<Chat>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub caption: Option<String>,

    #[serde(default)]
    pub entities: Vec<MessageEntity>,

    #[serde(default)]
    pub edit_date: Option<i64>,

    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,

    #[serde(default)]
    pub via_bot: Option<Arc<User>>,

    #[serde(default)]
    pub new_chat_members: Vec<Arc<User>>,

    #[serde(default)]
    pub left_chat_member: Option<Arc<User>>,

    #[serde(default)]
    pub group_chat_created: bool,

    #[serde(default)]
    pub supergroup_chat_created: bool,

    #[serde(default)]
    pub channel_chat_created: bool,

    #[serde(default)]
    pub migrate_to_chat_id: Option<i64>,

    #[serde(default)]
    pub pinned_message: Option<Box<Message>>,
}

impl Message {
    /// Whether this is the service message that opens a fresh group, supergroup, or channel.
    pub const fn is_chat_creation(&self) -> bool {
        self.group_chat_created || self.supergroup_chat_created || self.channel_chat_created
    }
}

/// A message resolves to its sender's ID.
impl EntityRef<i64> for Message {
    fn entity_id(&self) -> Option<i64> {
        self.from.as_ref().map(|from| from.id)
    }
}

/// This object represents one [special entity][1] in a text message.
///
/// [1]: https://core.telegram.org/bots/api#messageentity
#[derive(Debug, Deserialize)]
#[must_use]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,

    pub offset: u32,

    pub length: u32,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub user: Option<Arc<User>>,

    #[serde(default)]
    pub custom_emoji_id: Option<String>,
}
