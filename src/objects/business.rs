use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{chat::Chat, user::User};

/// The [connection of the bot with a business account][1].
///
/// [1]: https://core.telegram.org/bots/api#businessconnection
#[derive(Debug, Deserialize)]
#[must_use]
pub struct BusinessConnection {
    pub id: String,

    pub user: Arc<User>,

    pub user_chat_id: i64,

    pub date: i64,

    pub is_enabled: bool,
}

/// [Messages deleted][1] from a connected business account.
///
/// [1]: https://core.telegram.org/bots/api#businessmessagesdeleted
#[derive(Debug, Deserialize)]
#[must_use]
pub struct BusinessMessagesDeleted {
    pub business_connection_id: String,

    pub chat: Arc<Chat>,

    pub message_ids: Vec<u64>,
}
