use serde::Deserialize;

use crate::cache::EntityRef;

/// This object represents a Telegram user or bot.
///
/// See also: <https://core.telegram.org/bots/api#user>.
#[derive(Debug, Deserialize)]
#[must_use]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub is_bot: bool,

    pub first_name: String,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub language_code: Option<String>,
}

impl EntityRef<i64> for User {
    fn entity_id(&self) -> Option<i64> {
        Some(self.id)
    }
}
