use std::sync::Arc;

use serde::Deserialize;

use crate::objects::{chat::Chat, user::User};

/// This object contains information about a [poll][1].
///
/// [1]: https://core.telegram.org/bots/api#poll
#[derive(Debug, Deserialize)]
#[must_use]
pub struct Poll {
    pub id: String,

    pub question: String,

    pub options: Vec<PollOption>,

    pub total_voter_count: u32,

    pub is_closed: bool,

    pub is_anonymous: bool,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub allows_multiple_answers: bool,
}

/// <https://core.telegram.org/bots/api#polloption>
#[derive(Debug, Deserialize)]
#[must_use]
pub struct PollOption {
    pub text: String,

    pub voter_count: u32,
}

/// An [answer][1] of a user in a non-anonymous poll.
///
/// [1]: https://core.telegram.org/bots/api#pollanswer
#[derive(Debug, Deserialize)]
#[must_use]
pub struct PollAnswer {
    pub poll_id: String,

    #[serde(default)]
    pub voter_chat: Option<Arc<Chat>>,

    #[serde(default)]
    pub user: Option<Arc<User>>,

    pub option_ids: Vec<u8>,
}
