//! Typed [Bot API objects][1].
//!
//! The objects are deliberately partial: they carry the fields the dispatcher,
//! the caches, and the bundled methods need, not the entire remote schema.
//! Nested [`User`][user::User] and [`Chat`][chat::Chat] references are held
//! behind [`std::sync::Arc`] so the dispatcher can canonicalize them against
//! the entity caches.
//!
//! [1]: https://core.telegram.org/bots/api#available-types

pub mod boost;
pub mod business;
pub mod callback_query;
pub mod chat;
pub mod chat_member;
pub mod inline;
pub mod message;
pub mod payments;
pub mod poll;
pub mod reaction;
pub mod reply_markup;
pub mod update;
pub mod user;

pub use self::{
    boost::{ChatBoost, ChatBoostRemoved, ChatBoostSource, ChatBoostUpdated},
    business::{BusinessConnection, BusinessMessagesDeleted},
    callback_query::CallbackQuery,
    chat::{Chat, ChatId, ChatKind},
    chat_member::{ChatInviteLink, ChatJoinRequest, ChatMember, ChatMemberStatus, ChatMemberUpdated},
    inline::{ChosenInlineResult, InlineQuery},
    message::{Message, MessageEntity},
    payments::{PaidMediaPurchased, PreCheckoutQuery, ShippingAddress, ShippingQuery},
    poll::{Poll, PollAnswer, PollOption},
    reaction::{MessageReactionCountUpdated, MessageReactionUpdated, ReactionCount, ReactionType},
    reply_markup::{
        InlineKeyboardButton,
        InlineKeyboardButtonPayload,
        InlineKeyboardMarkup,
        LinkPreviewOptions,
        ParseMode,
        ReplyMarkup,
        ReplyParameters,
    },
    update::{Update, UpdatePayload},
    user::User,
};
