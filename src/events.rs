//! The outbound event surface: named events and the subscriber trait.

use std::{
    fmt::{self, Display, Formatter},
    future::Future,
};

use crate::{
    objects::{
        BusinessConnection,
        BusinessMessagesDeleted,
        CallbackQuery,
        ChatBoostRemoved,
        ChatBoostUpdated,
        ChatJoinRequest,
        ChatMemberUpdated,
        ChosenInlineResult,
        InlineQuery,
        Message,
        MessageReactionCountUpdated,
        MessageReactionUpdated,
        PaidMediaPurchased,
        Poll,
        PollAnswer,
        PreCheckoutQuery,
        ShippingQuery,
    },
    prelude::*,
};

/// One dispatched domain event with its constructed entity payload.
///
/// Ephemeral: produced by the dispatcher and handed straight to the subscriber,
/// never retained. The variants that collapse several update kinds
/// ([`Event::Message`], [`Event::MessageUpdate`]) and the variants derived from
/// service messages ([`Event::ChatMemberAdd`] and friends) make the mapping from
/// update kind to event many-to-many rather than a pure switch.
#[derive(Debug)]
#[must_use]
pub enum Event {
    /// A new message, channel post, or business message.
    Message(Message),

    /// Any flavor of an edited message: plain, channel post, or business.
    MessageUpdate(Message),

    /// Service message: users were added to a chat.
    ChatMemberAdd(Message),

    /// Service message: a user left or was removed from a chat.
    ChatMemberRemove(Message),

    /// Service message: a group, supergroup, or channel was created.
    ChatCreate(Message),

    /// Service message: the bot itself was removed from the chat.
    ChatDelete(Message),

    CallbackQuery(CallbackQuery),

    InlineQuery(InlineQuery),

    ChosenInlineResult(ChosenInlineResult),

    ShippingQuery(ShippingQuery),

    PreCheckoutQuery(PreCheckoutQuery),

    PurchasedPaidMedia(PaidMediaPurchased),

    Poll(Poll),

    PollAnswer(PollAnswer),

    /// The bot's own membership status changed in a chat.
    MyChatMemberUpdate(ChatMemberUpdated),

    /// Another user's membership status changed in a chat.
    ChatMemberUpdate(ChatMemberUpdated),

    ChatJoinRequest(ChatJoinRequest),

    ChatBoost(ChatBoostUpdated),

    ChatBoostRemove(ChatBoostRemoved),

    BusinessConnection(BusinessConnection),

    BusinessMessagesDelete(BusinessMessagesDeleted),

    MessageReaction(MessageReactionUpdated),

    MessageReactionCount(MessageReactionCountUpdated),
}

impl Event {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Message(_) => EventKind::Message,
            Self::MessageUpdate(_) => EventKind::MessageUpdate,
            Self::ChatMemberAdd(_) => EventKind::ChatMemberAdd,
            Self::ChatMemberRemove(_) => EventKind::ChatMemberRemove,
            Self::ChatCreate(_) => EventKind::ChatCreate,
            Self::ChatDelete(_) => EventKind::ChatDelete,
            Self::CallbackQuery(_) => EventKind::CallbackQuery,
            Self::InlineQuery(_) => EventKind::InlineQuery,
            Self::ChosenInlineResult(_) => EventKind::ChosenInlineResult,
            Self::ShippingQuery(_) => EventKind::ShippingQuery,
            Self::PreCheckoutQuery(_) => EventKind::PreCheckoutQuery,
            Self::PurchasedPaidMedia(_) => EventKind::PurchasedPaidMedia,
            Self::Poll(_) => EventKind::Poll,
            Self::PollAnswer(_) => EventKind::PollAnswer,
            Self::MyChatMemberUpdate(_) => EventKind::MyChatMemberUpdate,
            Self::ChatMemberUpdate(_) => EventKind::ChatMemberUpdate,
            Self::ChatJoinRequest(_) => EventKind::ChatJoinRequest,
            Self::ChatBoost(_) => EventKind::ChatBoost,
            Self::ChatBoostRemove(_) => EventKind::ChatBoostRemove,
            Self::BusinessConnection(_) => EventKind::BusinessConnection,
            Self::BusinessMessagesDelete(_) => EventKind::BusinessMessagesDelete,
            Self::MessageReaction(_) => EventKind::MessageReaction,
            Self::MessageReactionCount(_) => EventKind::MessageReactionCount,
        }
    }
}

/// The closed enumeration of event names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[must_use]
pub enum EventKind {
    Message,
    MessageUpdate,
    ChatMemberAdd,
    ChatMemberRemove,
    ChatCreate,
    ChatDelete,
    CallbackQuery,
    InlineQuery,
    ChosenInlineResult,
    ShippingQuery,
    PreCheckoutQuery,
    PurchasedPaidMedia,
    Poll,
    PollAnswer,
    MyChatMemberUpdate,
    ChatMemberUpdate,
    ChatJoinRequest,
    ChatBoost,
    ChatBoostRemove,
    BusinessConnection,
    BusinessMessagesDelete,
    MessageReaction,
    MessageReactionCount,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::MessageUpdate => "messageUpdate",
            Self::ChatMemberAdd => "chatMemberAdd",
            Self::ChatMemberRemove => "chatMemberRemove",
            Self::ChatCreate => "chatCreate",
            Self::ChatDelete => "chatDelete",
            Self::CallbackQuery => "callbackQuery",
            Self::InlineQuery => "inlineQuery",
            Self::ChosenInlineResult => "chosenInlineResult",
            Self::ShippingQuery => "shippingQuery",
            Self::PreCheckoutQuery => "preCheckoutQuery",
            Self::PurchasedPaidMedia => "purchasedPaidMedia",
            Self::Poll => "poll",
            Self::PollAnswer => "pollAnswer",
            Self::MyChatMemberUpdate => "myChatMemberUpdate",
            Self::ChatMemberUpdate => "chatMemberUpdate",
            Self::ChatJoinRequest => "chatJoinRequest",
            Self::ChatBoost => "chatBoost",
            Self::ChatBoostRemove => "chatBoostRemove",
            Self::BusinessConnection => "businessConnection",
            Self::BusinessMessagesDelete => "businessMessagesDelete",
            Self::MessageReaction => "messageReaction",
            Self::MessageReactionCount => "messageReactionCount",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Subscriber callback interface.
///
/// A failing handler never takes the surrounding loop down: the loop routes the
/// error to [`EventHandler::on_error`] and moves on to the next envelope.
pub trait EventHandler: Send + Sync {
    fn on_event(&self, event: Event) -> impl Future<Output = Result> + Send;

    /// Surface an error raised by [`EventHandler::on_event`].
    fn on_error(&self, error: Error) -> impl Future<Output = ()> + Send {
        async move {
            error!("event handler failed: {error}");
        }
    }
}
