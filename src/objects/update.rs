use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::objects::{
    boost::{ChatBoostRemoved, ChatBoostUpdated},
    business::{BusinessConnection, BusinessMessagesDeleted},
    callback_query::CallbackQuery,
    chat_member::{ChatJoinRequest, ChatMemberUpdated},
    inline::{ChosenInlineResult, InlineQuery},
    message::Message,
    payments::{PaidMediaPurchased, PreCheckoutQuery, ShippingQuery},
    poll::{Poll, PollAnswer},
    reaction::{MessageReactionCountUpdated, MessageReactionUpdated},
};

/// This object represents an incoming [update][1].
///
/// [1]: https://core.telegram.org/bots/api#update
#[derive(Debug)]
#[must_use]
pub struct Update {
    /// The update's unique identifier.
    ///
    /// Update identifiers start from a certain positive number and increase sequentially.
    pub id: u64,

    pub payload: UpdatePayload,
}

/// The one populated alternative of an [`Update`].
///
/// The remote contract promises exactly one populated field per update. An update that
/// violates the contract, or carries a kind this crate does not know yet, decodes to
/// [`UpdatePayload::Unknown`] and is skipped by the dispatcher instead of failing the batch.
#[derive(Debug, Deserialize)]
#[must_use]
pub enum UpdatePayload {
    #[serde(rename = "message")]
    Message(Message),

    #[serde(rename = "edited_message")]
    EditedMessage(Message),

    #[serde(rename = "channel_post")]
    ChannelPost(Message),

    #[serde(rename = "edited_channel_post")]
    EditedChannelPost(Message),

    #[serde(rename = "business_connection")]
    BusinessConnection(BusinessConnection),

    #[serde(rename = "business_message")]
    BusinessMessage(Message),

    #[serde(rename = "edited_business_message")]
    EditedBusinessMessage(Message),

    #[serde(rename = "deleted_business_messages")]
    DeletedBusinessMessages(BusinessMessagesDeleted),

    #[serde(rename = "message_reaction")]
    MessageReaction(MessageReactionUpdated),

    #[serde(rename = "message_reaction_count")]
    MessageReactionCount(MessageReactionCountUpdated),

    #[serde(rename = "inline_query")]
    InlineQuery(InlineQuery),

    #[serde(rename = "chosen_inline_result")]
    ChosenInlineResult(ChosenInlineResult),

    #[serde(rename = "callback_query")]
    CallbackQuery(CallbackQuery),

    #[serde(rename = "shipping_query")]
    ShippingQuery(ShippingQuery),

    #[serde(rename = "pre_checkout_query")]
    PreCheckoutQuery(PreCheckoutQuery),

    #[serde(rename = "purchased_paid_media")]
    PurchasedPaidMedia(PaidMediaPurchased),

    #[serde(rename = "poll")]
    Poll(Poll),

    #[serde(rename = "poll_answer")]
    PollAnswer(PollAnswer),

    #[serde(rename = "my_chat_member")]
    MyChatMember(ChatMemberUpdated),

    #[serde(rename = "chat_member")]
    ChatMember(ChatMemberUpdated),

    #[serde(rename = "chat_join_request")]
    ChatJoinRequest(ChatJoinRequest),

    #[serde(rename = "chat_boost")]
    ChatBoost(ChatBoostUpdated),

    #[serde(rename = "removed_chat_boost")]
    RemovedChatBoost(ChatBoostRemoved),

    /// Empty, unrecognized, or malformed alternative.
    #[serde(skip)]
    Unknown,
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            update_id: u64,

            #[serde(flatten)]
            rest: serde_json::Map<String, Value>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        // The alternative keys form an externally tagged union. Zero keys, several keys,
        // or an unrecognized key all fail the enum decode and degrade to `Unknown`.
        let payload = serde_json::from_value(Value::Object(envelope.rest))
            .unwrap_or(UpdatePayload::Unknown);
        Ok(Self { id: envelope.update_id, payload })
    }
}
