//! Classification of update envelopes into named events.

use bon::bon;

use crate::{
    events::Event,
    managers::{CacheOptions, EntityManager},
    objects::{
        CallbackQuery,
        Chat,
        ChatMemberUpdated,
        Message,
        Update,
        UpdatePayload,
        User,
    },
    prelude::*,
};

/// Turns one update envelope into at most one named event.
///
/// Dispatch is a pure function of the envelope, modulo the entity caches:
/// nested user and chat references get canonicalized through the managers, so
/// repeated references to one remote object share one local instance. No
/// network I/O ever happens here; resolving the «full» form of an entity is a
/// separate, explicitly user-invoked method call.
#[must_use]
pub struct Dispatcher {
    users: EntityManager<User>,
    chats: EntityManager<Chat>,
    me: Option<i64>,
}

#[bon]
impl Dispatcher {
    #[builder]
    pub fn new(
        /// Cache configuration for user entities.
        user_cache: Option<CacheOptions<User>>,

        /// Cache configuration for chat entities.
        chat_cache: Option<CacheOptions<Chat>>,

        /// The bot's own user ID, used to tell «the bot was removed» apart
        /// from «some member was removed». Usually obtained via `getMe`.
        me: Option<i64>,
    ) -> Self {
        Self {
            users: EntityManager::new(user_cache.unwrap_or_default()),
            chats: EntityManager::new(chat_cache.unwrap_or_default()),
            me,
        }
    }
}

impl Dispatcher {
    /// Classify the envelope and construct the event.
    ///
    /// An empty, unrecognized, or malformed envelope yields `None` and mutates
    /// no cache: unknown future update kinds must never fail the loop.
    pub fn dispatch(&mut self, update: Update) -> Option<Event> {
        match update.payload {
            UpdatePayload::Message(mut message) => {
                self.adopt_message(&mut message);
                Some(self.classify_message(message))
            }
            UpdatePayload::ChannelPost(mut message)
            | UpdatePayload::BusinessMessage(mut message) => {
                self.adopt_message(&mut message);
                Some(Event::Message(message))
            }
            UpdatePayload::EditedMessage(mut message)
            | UpdatePayload::EditedChannelPost(mut message)
            | UpdatePayload::EditedBusinessMessage(mut message) => {
                self.adopt_message(&mut message);
                Some(Event::MessageUpdate(message))
            }
            UpdatePayload::CallbackQuery(mut query) => {
                self.adopt_callback_query(&mut query);
                Some(Event::CallbackQuery(query))
            }
            UpdatePayload::InlineQuery(mut query) => {
                self.users.intern_in_place(&mut query.from);
                Some(Event::InlineQuery(query))
            }
            UpdatePayload::ChosenInlineResult(mut result) => {
                self.users.intern_in_place(&mut result.from);
                Some(Event::ChosenInlineResult(result))
            }
            UpdatePayload::ShippingQuery(mut query) => {
                self.users.intern_in_place(&mut query.from);
                Some(Event::ShippingQuery(query))
            }
            UpdatePayload::PreCheckoutQuery(mut query) => {
                self.users.intern_in_place(&mut query.from);
                Some(Event::PreCheckoutQuery(query))
            }
            UpdatePayload::PurchasedPaidMedia(mut purchase) => {
                self.users.intern_in_place(&mut purchase.from);
                Some(Event::PurchasedPaidMedia(purchase))
            }
            UpdatePayload::Poll(poll) => Some(Event::Poll(poll)),
            UpdatePayload::PollAnswer(mut answer) => {
                if let Some(user) = &mut answer.user {
                    self.users.intern_in_place(user);
                }
                if let Some(chat) = &mut answer.voter_chat {
                    self.chats.intern_in_place(chat);
                }
                Some(Event::PollAnswer(answer))
            }
            UpdatePayload::MyChatMember(mut updated) => {
                self.adopt_chat_member_updated(&mut updated);
                Some(Event::MyChatMemberUpdate(updated))
            }
            UpdatePayload::ChatMember(mut updated) => {
                self.adopt_chat_member_updated(&mut updated);
                Some(Event::ChatMemberUpdate(updated))
            }
            UpdatePayload::ChatJoinRequest(mut request) => {
                self.chats.intern_in_place(&mut request.chat);
                self.users.intern_in_place(&mut request.from);
                Some(Event::ChatJoinRequest(request))
            }
            UpdatePayload::ChatBoost(mut boost) => {
                self.chats.intern_in_place(&mut boost.chat);
                if let Some(user) = boost.boost.source.user_mut() {
                    self.users.intern_in_place(user);
                }
                Some(Event::ChatBoost(boost))
            }
            UpdatePayload::RemovedChatBoost(mut removed) => {
                self.chats.intern_in_place(&mut removed.chat);
                if let Some(user) = removed.source.user_mut() {
                    self.users.intern_in_place(user);
                }
                Some(Event::ChatBoostRemove(removed))
            }
            UpdatePayload::BusinessConnection(mut connection) => {
                self.users.intern_in_place(&mut connection.user);
                Some(Event::BusinessConnection(connection))
            }
            UpdatePayload::DeletedBusinessMessages(mut deleted) => {
                self.chats.intern_in_place(&mut deleted.chat);
                Some(Event::BusinessMessagesDelete(deleted))
            }
            UpdatePayload::MessageReaction(mut reaction) => {
                self.chats.intern_in_place(&mut reaction.chat);
                if let Some(user) = &mut reaction.user {
                    self.users.intern_in_place(user);
                }
                if let Some(chat) = &mut reaction.actor_chat {
                    self.chats.intern_in_place(chat);
                }
                Some(Event::MessageReaction(reaction))
            }
            UpdatePayload::MessageReactionCount(mut count) => {
                self.chats.intern_in_place(&mut count.chat);
                Some(Event::MessageReactionCount(count))
            }
            UpdatePayload::Unknown => {
                debug!(update.id, "skipping an unrecognized update");
                None
            }
        }
    }

    /// Service-message override rules: a handful of message shapes are more
    /// useful as their own events than as a generic `message`.
    fn classify_message(&self, message: Message) -> Event {
        if !message.new_chat_members.is_empty() {
            return Event::ChatMemberAdd(message);
        }
        if let Some(left) = &message.left_chat_member {
            return if self.me == Some(left.id) {
                Event::ChatDelete(message)
            } else {
                Event::ChatMemberRemove(message)
            };
        }
        if message.is_chat_creation() {
            return Event::ChatCreate(message);
        }
        Event::Message(message)
    }

    /// Canonicalize every user and chat reference the message carries,
    /// including the replied-to and pinned messages.
    fn adopt_message(&mut self, message: &mut Message) {
        self.chats.intern_in_place(&mut message.chat);
        if let Some(from) = &mut message.from {
            self.users.intern_in_place(from);
        }
        if let Some(via_bot) = &mut message.via_bot {
            self.users.intern_in_place(via_bot);
        }
        for member in &mut message.new_chat_members {
            self.users.intern_in_place(member);
        }
        if let Some(left) = &mut message.left_chat_member {
            self.users.intern_in_place(left);
        }
        for entity in &mut message.entities {
            if let Some(user) = &mut entity.user {
                self.users.intern_in_place(user);
            }
        }
        if let Some(reply_to) = &mut message.reply_to_message {
            self.adopt_message(reply_to);
        }
        if let Some(pinned) = &mut message.pinned_message {
            self.adopt_message(pinned);
        }
    }

    fn adopt_callback_query(&mut self, query: &mut CallbackQuery) {
        self.users.intern_in_place(&mut query.from);
        if let Some(message) = &mut query.message {
            self.adopt_message(message);
        }
    }

    fn adopt_chat_member_updated(&mut self, updated: &mut ChatMemberUpdated) {
        self.chats.intern_in_place(&mut updated.chat);
        self.users.intern_in_place(&mut updated.from);
        self.users.intern_in_place(&mut updated.old_chat_member.user);
        self.users.intern_in_place(&mut updated.new_chat_member.user);
    }

    /// The user entity cache.
    pub const fn users(&self) -> &EntityManager<User> {
        &self.users
    }

    /// The chat entity cache.
    pub const fn chats(&self) -> &EntityManager<Chat> {
        &self.chats
    }
}
