//! Builder-style request objects: keyboards, reply parameters, and formatting options.

use bon::Builder;
use serde::Serialize;

/// [Formatting mode][1] for the message text.
///
/// [1]: https://core.telegram.org/bots/api#formatting-options
#[derive(Copy, Clone, Serialize)]
#[must_use]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,

    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
}

/// Describes the [options][1] used for link preview generation.
///
/// [1]: https://core.telegram.org/bots/api#linkpreviewoptions
#[derive(Default, Builder, Serialize)]
#[must_use]
pub struct LinkPreviewOptions {
    /// `true`, if the link preview is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,

    /// URL to use for the link preview.
    ///
    /// If empty, then the first URL found in the message text will be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// `true`, if the link preview must be shown above the message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_above_text: Option<bool>,
}

impl LinkPreviewOptions {
    pub const DISABLED: Self = Self { is_disabled: Some(true), url: None, show_above_text: None };
}

/// [Reply parameters][1] for the message being sent.
///
/// [1]: https://core.telegram.org/bots/api#replyparameters
#[derive(Builder, Serialize)]
#[must_use]
pub struct ReplyParameters {
    pub message_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sending_without_reply: Option<bool>,
}

#[derive(Serialize)]
#[serde(untagged)]
#[must_use]
pub enum ReplyMarkup<'a> {
    InlineKeyboard(InlineKeyboardMarkup<'a>),
}

impl<'a> From<InlineKeyboardMarkup<'a>> for ReplyMarkup<'a> {
    fn from(value: InlineKeyboardMarkup<'a>) -> Self {
        Self::InlineKeyboard(value)
    }
}

/// This object represents an [inline keyboard][1] that appears right next to the message it belongs to.
///
/// [1]: https://core.telegram.org/bots/api#inlinekeyboardmarkup
#[must_use]
#[derive(Serialize)]
pub struct InlineKeyboardMarkup<'a> {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

impl<'a> InlineKeyboardMarkup<'a> {
    pub fn single_button(button: InlineKeyboardButton<'a>) -> Self {
        Self { inline_keyboard: vec![vec![button]] }
    }
}

/// This object represents [one button of an inline keyboard][1].
///
/// [1]: https://core.telegram.org/bots/api#inlinekeyboardbutton
#[must_use]
#[derive(Serialize)]
pub struct InlineKeyboardButton<'a> {
    /// Label text on the button.
    pub text: &'a str,

    #[serde(flatten)]
    pub payload: InlineKeyboardButtonPayload<'a>,
}

#[must_use]
#[derive(Serialize)]
pub enum InlineKeyboardButtonPayload<'a> {
    /// HTTP or `tg://` URL to be opened when the button is pressed.
    ///
    /// Links `tg://user?id=<user_id>` can be used to mention a user by their identifier
    /// without using a username, if this is allowed by their privacy settings.
    #[serde(rename = "url")]
    Url(&'a str),

    /// Data to be sent in a [callback query][1] to the bot when the button is pressed.
    ///
    /// [1]: https://core.telegram.org/bots/api#callbackquery
    #[serde(rename = "callback_data")]
    CallbackData(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn inline_keyboard_ok() -> Result {
        let markup = InlineKeyboardMarkup::single_button(InlineKeyboardButton {
            text: "Test",
            payload: InlineKeyboardButtonPayload::Url("https://example.org"),
        });
        assert_eq!(
            serde_json::to_string(&markup)?,
            // language=json
            r#"{"inline_keyboard":[[{"text":"Test","url":"https://example.org"}]]}"#,
        );
        Ok(())
    }
}
