use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{chat::Chat, user::User};

/// A [boost added to a chat][1] or changed.
///
/// [1]: https://core.telegram.org/bots/api#chatboostupdated
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatBoostUpdated {
    pub chat: Arc<Chat>,

    pub boost: ChatBoost,
}

/// A [boost removed from a chat][1].
///
/// [1]: https://core.telegram.org/bots/api#chatboostremoved
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatBoostRemoved {
    pub chat: Arc<Chat>,

    pub boost_id: String,

    pub remove_date: i64,

    pub source: ChatBoostSource,
}

/// <https://core.telegram.org/bots/api#chatboost>
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ChatBoost {
    pub boost_id: String,

    pub add_date: i64,

    pub expiration_date: i64,

    pub source: ChatBoostSource,
}

/// The [source][1] of a chat boost.
///
/// [1]: https://core.telegram.org/bots/api#chatboostsource
#[derive(Debug, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
#[must_use]
pub enum ChatBoostSource {
    Premium {
        user: Arc<User>,
    },

    GiftCode {
        user: Arc<User>,
    },

    Giveaway {
        giveaway_message_id: u64,

        #[serde(default)]
        user: Option<Arc<User>>,
    },
}

impl ChatBoostSource {
    pub const fn user(&self) -> Option<&Arc<User>> {
        match self {
            Self::Premium { user } | Self::GiftCode { user } => Some(user),
            Self::Giveaway { user, .. } => user.as_ref(),
        }
    }

    pub fn user_mut(&mut self) -> Option<&mut Arc<User>> {
        match self {
            Self::Premium { user } | Self::GiftCode { user } => Some(user),
            Self::Giveaway { user, .. } => user.as_mut(),
        }
    }
}
