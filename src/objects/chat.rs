use serde::{Deserialize, Serialize};

use crate::cache::EntityRef;

/// This object represents a [chat][1].
///
/// [1]: https://core.telegram.org/bots/api#chat
#[derive(Debug, Deserialize)]
#[must_use]
pub struct Chat {
    pub id: i64,

    #[serde(rename = "type")]
    pub kind: ChatKind,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl EntityRef<i64> for Chat {
    fn entity_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

/// Chat reference accepted by the Bot API methods: an integer ID or a `@username`.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
#[must_use]
pub enum ChatId {
    Integer(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<&Chat> for ChatId {
    fn from(chat: &Chat) -> Self {
        Self::Integer(chat.id)
    }
}
