use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{message::Message, user::User};

/// An incoming [callback query][1] from an inline keyboard button.
///
/// [1]: https://core.telegram.org/bots/api#callbackquery
#[derive(Debug, Deserialize)]
#[must_use]
pub struct CallbackQuery {
    pub id: String,

    pub from: Arc<User>,

    #[serde(default)]
    pub message: Option<Box<Message>>,

    #[serde(default)]
    pub inline_message_id: Option<String>,

    pub chat_instance: String,

    #[serde(default)]
    pub data: Option<String>,
}
