use std::sync::Arc;

use serde::Deserialize;

use crate::objects::user::User;

/// An incoming [inline query][1].
///
/// [1]: https://core.telegram.org/bots/api#inlinequery
#[derive(Debug, Deserialize)]
#[must_use]
pub struct InlineQuery {
    pub id: String,

    pub from: Arc<User>,

    pub query: String,

    pub offset: String,

    #[serde(default)]
    pub chat_type: Option<String>,
}

/// A [result][1] of an inline query that was chosen by the user.
///
/// [1]: https://core.telegram.org/bots/api#choseninlineresult
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChosenInlineResult {
    pub result_id: String,

    pub from: Arc<User>,

    #[serde(default)]
    pub inline_message_id: Option<String>,

    pub query: String,
}
