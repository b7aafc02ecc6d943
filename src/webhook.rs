//! Webhook mode: an HTTP server feeding the same dispatcher as long polling.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    Json,
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use bon::Builder;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::mpsc;

use crate::{dispatch::Dispatcher, events::EventHandler, objects::Update, prelude::*};

/// Header the platform echoes the configured secret back in.
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Webhook server for receiving updates over HTTPS.
///
/// Requests only decode and enqueue; a single worker drains the queue and
/// dispatches sequentially, so the ordering and single-writer cache guarantees
/// of the polling mode carry over unchanged. On shutdown the server stops
/// accepting connections, in-flight requests complete, and the worker drains
/// what is already queued.
#[derive(Builder)]
#[must_use]
pub struct Webhook {
    /// Used by [`Webhook::run`]. `8443` is one of the ports the platform delivers to.
    #[builder(default = SocketAddr::from(([0, 0, 0, 0], 8443)))]
    bind_address: SocketAddr,

    dispatcher: Dispatcher,

    /// URL path the webhook is registered under, for example `/updates`.
    #[builder(into, default = String::from("/"))]
    path: String,

    /// Shared secret to verify against the `X-Telegram-Bot-Api-Secret-Token` header.
    secret_token: Option<SecretString>,

    /// Backpressure bound on updates decoded but not yet dispatched.
    #[builder(default = 100)]
    queue_size: usize,
}

#[derive(Clone)]
struct WebhookState {
    tx: mpsc::Sender<Update>,
    secret_token: Option<Arc<SecretString>>,
}

impl Webhook {
    /// Bind the configured address and serve until the shutdown future resolves.
    pub async fn run<H: EventHandler>(
        self,
        handler: &H,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result {
        let listener = tokio::net::TcpListener::bind(self.bind_address).await?;
        self.serve(listener, handler, shutdown).await
    }

    /// Serve on an already bound listener until the shutdown future resolves,
    /// then drain the queue.
    pub async fn serve<H: EventHandler>(
        mut self,
        listener: tokio::net::TcpListener,
        handler: &H,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result {
        let (tx, mut rx) = mpsc::channel(self.queue_size);
        let state = WebhookState { tx, secret_token: self.secret_token.take().map(Arc::new) };
        let router = Router::new()
            .route(&self.path, post(receive_update))
            .with_state(state);

        info!(local_address = ?listener.local_addr(), path = %self.path, "serving the webhook");
        let server = async {
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown)
                .await
                .map_err(Error::Io)
        };

        let mut dispatcher = self.dispatcher;
        let worker = async {
            // The sender side lives in the router; the loop ends once the server
            // is gone and the queue is drained.
            while let Some(update) = rx.recv().await {
                let update_id = update.id;
                let Some(event) = dispatcher.dispatch(update) else {
                    continue;
                };
                debug!(update_id, event = %event.kind(), "dispatching");
                if let Err(error) = handler.on_event(event).await {
                    handler.on_error(error).await;
                }
            }
            Ok(())
        };

        let ((), ()) = futures::try_join!(server, worker)?;
        Ok(())
    }
}

async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> StatusCode {
    if let Some(secret_token) = &state.secret_token {
        let supplied = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if supplied != Some(secret_token.expose_secret()) {
            warn!("webhook request with a missing or wrong secret token");
            return StatusCode::FORBIDDEN;
        }
    }
    if state.tx.send(update).await.is_err() {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::*;
    use crate::events::Event;

    fn state(secret: Option<&str>) -> (WebhookState, mpsc::Receiver<Update>) {
        let (tx, rx) = mpsc::channel(16);
        let state = WebhookState {
            tx,
            secret_token: secret.map(|secret| Arc::new(SecretString::from(secret))),
        };
        (state, rx)
    }

    fn update() -> Update {
        // language=json
        serde_json::from_str(
            r#"{"update_id": 1, "message": {"message_id": 1, "date": 0, "chat": {"id": 42, "type": "private"}}}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let (state, mut rx) = state(Some("right"));
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, "wrong".parse().unwrap());
        let status = receive_update(State(state), headers, Json(update())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn matching_secret_enqueues_the_update() {
        let (state, mut rx) = state(Some("right"));
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, "right".parse().unwrap());
        let status = receive_update(State(state), headers, Json(update())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rx.try_recv().unwrap().id, 1);
    }

    #[tokio::test]
    async fn no_secret_configured_accepts_everything() {
        let (state, mut rx) = state(None);
        let status = receive_update(State(state), HeaderMap::new(), Json(update())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rx.try_recv().unwrap().id, 1);
    }

    /// Records the identifiers of dispatched messages.
    #[derive(Default)]
    struct Recorder {
        message_ids: Mutex<Vec<u64>>,
    }

    impl EventHandler for Recorder {
        async fn on_event(&self, event: Event) -> Result {
            if let Event::Message(message) = event {
                self.message_ids.lock().unwrap().push(message.id);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn accepted_updates_are_drained_after_shutdown() -> Result {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let webhook = Webhook::builder().dispatcher(Dispatcher::builder().build()).build();
        let recorder = Recorder::default();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        let serving = webhook.serve(listener, &recorder, async move {
            let _ = done_rx.await;
        });
        let posting = async {
            let client = reqwest::Client::new();
            for message_id in 1..=3_u64 {
                let status = client
                    .post(format!("http://{address}/"))
                    .json(&serde_json::json!({
                        "update_id": message_id,
                        "message": {
                            "message_id": message_id,
                            "date": 0,
                            "chat": {"id": 42, "type": "private"},
                            "text": "hi"
                        }
                    }))
                    .send()
                    .await?
                    .status();
                assert_eq!(status.as_u16(), 200);
            }
            // Every accepted update is queued by now; stop the server and
            // expect the worker to drain all of them regardless.
            done_tx.send(()).ok();
            Ok::<_, Error>(())
        };
        let (served, posted) = tokio::join!(serving, posting);
        served?;
        posted?;

        assert_eq!(*recorder.message_ids.lock().unwrap(), [1, 2, 3]);
        Ok(())
    }
}
