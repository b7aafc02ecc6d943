//! The Bot API connection: URL assembly, request execution, rate-limit back-off.

use bon::bon;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{client::build_client, methods::Method, prelude::*, response::ApiResponse};

/// How many times a rate-limited call is retried before the error propagates.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Telegram Bot API connection.
#[must_use]
#[derive(Clone)]
pub struct Bot {
    client: Client,
    token: SecretString,
    root_url: Url,
}

#[bon]
impl Bot {
    #[builder]
    pub fn new(
        /// Shared HTTP client. Defaults to [`build_client`].
        client: Option<Client>,

        /// The bot token issued by `@BotFather`.
        #[builder(into)]
        token: SecretString,

        /// Root API URL, overridable for tests and local Bot API servers.
        root_url: Option<Url>,
    ) -> Result<Self> {
        Ok(Self {
            client: match client {
                Some(client) => client,
                None => build_client()?,
            },
            token,
            root_url: match root_url {
                Some(root_url) => root_url,
                None => Url::parse("https://api.telegram.org")?,
            },
        })
    }
}

impl Bot {
    /// Call the Bot API method.
    ///
    /// Rate-limited calls wait out the server-supplied `retry_after` and retry
    /// a bounded number of times before the error reaches the caller.
    #[instrument(skip_all, fields(method = M::NAME))]
    pub async fn call<M>(&self, method: &M) -> Result<M::Response>
    where
        M: Method + ?Sized,
    {
        let mut attempt = 0;
        loop {
            match self.call_once(method).await {
                Err(Error::TooManyRequests { retry_after })
                    if attempt < MAX_RATE_LIMIT_RETRIES =>
                {
                    attempt += 1;
                    warn!(retry_after_secs = retry_after.as_secs(), attempt, "rate limited");
                    tokio::time::sleep(retry_after).await;
                }
                result => return result,
            }
        }
    }

    async fn call_once<M>(&self, method: &M) -> Result<M::Response>
    where
        M: Method + ?Sized,
    {
        let mut url = self.root_url.clone();
        url.set_path(&format!("bot{}/{}", self.token.expose_secret(), M::NAME));
        let response = self
            .client
            .post(url)
            .json(method)
            .timeout(method.timeout())
            .send()
            .await?
            .json::<ApiResponse<M::Response>>()
            .await?;
        response.into()
    }
}
