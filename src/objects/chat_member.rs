use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{chat::Chat, user::User};

/// Changes in the [status of a chat member][1].
///
/// [1]: https://core.telegram.org/bots/api#chatmemberupdated
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatMemberUpdated {
    pub chat: Arc<Chat>,

    pub from: Arc<User>,

    pub date: i64,

    pub old_chat_member: ChatMember,

    pub new_chat_member: ChatMember,

    #[serde(default)]
    pub invite_link: Option<ChatInviteLink>,
}

/// One [member of a chat][1], flattened to the status and the user.
///
/// [1]: https://core.telegram.org/bots/api#chatmember
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatMember {
    pub status: ChatMemberStatus,

    pub user: Arc<User>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

/// A [request to join][1] a chat.
///
/// [1]: https://core.telegram.org/bots/api#chatjoinrequest
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatJoinRequest {
    pub chat: Arc<Chat>,

    pub from: Arc<User>,

    /// Identifier of a private chat with the user who sent the join request.
    pub user_chat_id: i64,

    pub date: i64,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub invite_link: Option<ChatInviteLink>,
}

/// <https://core.telegram.org/bots/api#chatinvitelink>
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatInviteLink {
    pub invite_link: String,

    pub creator: Arc<User>,

    pub creates_join_request: bool,

    pub is_primary: bool,

    pub is_revoked: bool,
}
