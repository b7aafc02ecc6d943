//! Typed [Bot API methods][1].
//!
//! Each method is a serializable request paired with its response type. The
//! full remote surface counts hundreds of methods; this module carries the
//! ones the update loops and basic bot ergonomics need.
//!
//! [1]: https://core.telegram.org/bots/api#available-methods

use std::{future::Future, time::Duration};

use bon::Builder;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    bot::Bot,
    client::DEFAULT_TIMEOUT,
    objects::{
        ChatId,
        LinkPreviewOptions,
        Message,
        ParseMode,
        ReplyMarkup,
        ReplyParameters,
        Update,
        User,
    },
    prelude::*,
};

/// Telegram Bot API method.
pub trait Method: Serialize + Sync {
    /// Method name.
    const NAME: &'static str;

    type Response: DeserializeOwned;

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// Call the method on the given connection.
    fn call_on(&self, bot: &Bot) -> impl Future<Output = Result<Self::Response>> + Send
    where
        Self: Sized,
        Self::Response: Send,
    {
        bot.call(self)
    }

    /// Call the method and discard the response.
    fn call_and_discard_on(&self, bot: &Bot) -> impl Future<Output = Result> + Send
    where
        Self: Sized,
        Self::Response: Send,
    {
        async move {
            self.call_on(bot).await?;
            Ok(())
        }
    }
}

/// A simple method for testing your bot's authentication token.
///
/// See also: <https://core.telegram.org/bots/api#getme>.
#[derive(Serialize)]
#[must_use]
pub struct GetMe;

impl Method for GetMe {
    const NAME: &'static str = "getMe";

    type Response = User;
}

/// [Update][1] types that the client wants to listen to.
///
/// [1]: https://core.telegram.org/bots/api#update
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum AllowedUpdate {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    BusinessConnection,
    BusinessMessage,
    EditedBusinessMessage,
    DeletedBusinessMessages,
    MessageReaction,
    MessageReactionCount,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    PurchasedPaidMedia,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    ChatBoost,
    RemovedChatBoost,
}

/// Use this method to [receive incoming updates][1] using long polling.
///
/// [1]: https://core.telegram.org/bots/api#getupdates
#[derive(Builder, Serialize)]
#[must_use]
pub struct GetUpdates<'a> {
    /// Identifier of the first update to be returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Limits the number of updates to be retrieved. Values between 1-100 are accepted. Defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Timeout in seconds for long polling.
    ///
    /// Defaults to 0, i.e. usual short polling.
    /// Should be positive, short polling should be used for testing purposes only.
    #[serde(rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<&'a [AllowedUpdate]>,
}

impl Method for GetUpdates<'_> {
    const NAME: &'static str = "getUpdates";

    type Response = Vec<Update>;

    /// The HTTP timeout must outlive the server-side long-poll timeout.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT + Duration::from_secs(self.timeout_secs.unwrap_or_default())
    }
}

/// [Send a message][1].
///
/// [1]: https://core.telegram.org/bots/api#sendmessage
#[derive(Builder, Serialize)]
#[must_use]
pub struct SendMessage<'a> {
    #[builder(into)]
    pub chat_id: ChatId,

    pub text: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub reply_markup: Option<ReplyMarkup<'a>>,
}

impl Method for SendMessage<'_> {
    const NAME: &'static str = "sendMessage";

    type Response = Message;
}

/// [Answer a callback query][1] sent from an inline keyboard.
///
/// [1]: https://core.telegram.org/bots/api#answercallbackquery
#[derive(Builder, Serialize)]
#[must_use]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
}

impl Method for AnswerCallbackQuery<'_> {
    const NAME: &'static str = "answerCallbackQuery";

    type Response = bool;
}

/// <https://core.telegram.org/bots/api#botcommand>
#[derive(Builder, Serialize)]
#[must_use]
pub struct BotCommand<'a> {
    pub command: &'a str,

    pub description: &'a str,
}

/// [Set the bot's command list][1].
///
/// [1]: https://core.telegram.org/bots/api#setmycommands
#[derive(Builder, Serialize)]
#[must_use]
pub struct SetMyCommands<'a> {
    pub commands: Vec<BotCommand<'a>>,
}

impl Method for SetMyCommands<'_> {
    const NAME: &'static str = "setMyCommands";

    type Response = bool;
}

/// [Specify the webhook URL][1] to receive updates through.
///
/// [1]: https://core.telegram.org/bots/api#setwebhook
#[derive(Builder, Serialize)]
#[must_use]
pub struct SetWebhook<'a> {
    pub url: &'a str,

    /// Secret echoed back by the platform in the `X-Telegram-Bot-Api-Secret-Token` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<&'a [AllowedUpdate]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

impl Method for SetWebhook<'_> {
    const NAME: &'static str = "setWebhook";

    type Response = bool;
}

/// [Remove the webhook][1] and switch back to long polling.
///
/// [1]: https://core.telegram.org/bots/api#deletewebhook
#[derive(Default, Builder, Serialize)]
#[must_use]
pub struct DeleteWebhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

impl Method for DeleteWebhook {
    const NAME: &'static str = "deleteWebhook";

    type Response = bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{InlineKeyboardButton, InlineKeyboardButtonPayload, InlineKeyboardMarkup};

    #[test]
    fn send_message_with_inline_keyboard_ok() -> Result {
        let markup = InlineKeyboardMarkup::single_button(InlineKeyboardButton {
            text: "Test",
            payload: InlineKeyboardButtonPayload::Url("https://example.org"),
        });
        let send_message = SendMessage::builder()
            .chat_id(42_i64)
            .text("test")
            .reply_markup(markup)
            .build();
        assert_eq!(
            serde_json::to_string(&send_message)?,
            // language=json
            r#"{"chat_id":42,"text":"test","reply_markup":{"inline_keyboard":[[{"text":"Test","url":"https://example.org"}]]}}"#,
        );
        Ok(())
    }

    #[test]
    fn get_updates_ok() -> Result {
        let allowed_updates = [AllowedUpdate::Message, AllowedUpdate::CallbackQuery];
        let get_updates = GetUpdates::builder()
            .offset(100)
            .timeout_secs(50)
            .allowed_updates(&allowed_updates)
            .build();
        assert_eq!(
            serde_json::to_string(&get_updates)?,
            // language=json
            r#"{"offset":100,"timeout":50,"allowed_updates":["message","callback_query"]}"#,
        );
        assert_eq!(get_updates.timeout(), DEFAULT_TIMEOUT + Duration::from_secs(50));
        Ok(())
    }
}
