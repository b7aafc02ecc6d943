use std::time::Duration;

use monostate::MustBe;
use serde::Deserialize;

use crate::prelude::*;

/// Telegram Bot API [response envelope][1].
///
/// [1]: https://core.telegram.org/bots/api#making-requests
#[derive(Deserialize)]
#[must_use]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok {
        ok: MustBe!(true),
        result: T,
    },

    Err {
        ok: MustBe!(false),
        description: String,
        error_code: i32,

        #[serde(default)]
        parameters: Option<ResponseParameters>,
    },
}

impl<T> From<ApiResponse<T>> for Result<T> {
    fn from(response: ApiResponse<T>) -> Self {
        match response {
            ApiResponse::Ok { result, .. } => Ok(result),
            ApiResponse::Err { description, error_code, parameters, .. } => {
                match parameters.and_then(|parameters| parameters.retry_after_secs) {
                    Some(retry_after_secs) => Err(Error::TooManyRequests {
                        retry_after: Duration::from_secs(retry_after_secs),
                    }),
                    None => Err(Error::Api { error_code, description }),
                }
            }
        }
    }
}

/// [Additional error details][1], notably the back-off hint on an exceeded rate limit.
///
/// [1]: https://core.telegram.org/bots/api#responseparameters
#[derive(Deserialize)]
#[must_use]
pub struct ResponseParameters {
    #[serde(default, rename = "retry_after")]
    pub retry_after_secs: Option<u64>,

    #[serde(default)]
    pub migrate_to_chat_id: Option<i64>,
}
