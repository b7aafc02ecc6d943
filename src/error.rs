use std::time::Duration;

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
#[must_use]
pub enum Error {
    /// [Rate limit][1] response from the Bot API.
    ///
    /// [1]: https://core.telegram.org/bots/faq#my-bot-is-hitting-limits-how-do-i-avoid-this
    #[error("too many requests, retry after {} secs", retry_after.as_secs())]
    TooManyRequests { retry_after: Duration },

    /// Any other `ok: false` response from the Bot API.
    #[error("API error {error_code}: {description}")]
    Api { error_code: i32, description: String },

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse the URL")]
    UrlParse(#[from] url::ParseError),

    #[error("failed to decode the payload")]
    Json(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
