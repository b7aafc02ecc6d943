//! Provides the shared HTTP client.

use std::time::Duration;

use reqwest::{
    Client,
    header,
    header::{HeaderMap, HeaderValue},
};

use crate::prelude::*;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(concat!(
            "botgram / ",
            env!("CARGO_PKG_VERSION"),
            " (Rust; https://github.com/koevoet1221/botgram)",
        )),
    );
    Ok(Client::builder()
        .gzip(true)
        .use_rustls_tls()
        .default_headers(headers)
        .timeout(DEFAULT_TIMEOUT)
        .pool_idle_timeout(Some(Duration::from_secs(600)))
        .build()?)
}
