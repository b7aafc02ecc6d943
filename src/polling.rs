//! Long polling: the update stream and the dispatching runner.

use std::{future::Future, time::Duration};

use bon::Builder;
use futures::{Stream, StreamExt, TryStreamExt, stream};

use crate::{
    bot::Bot,
    dispatch::Dispatcher,
    events::EventHandler,
    methods::{AllowedUpdate, GetUpdates, Method},
    objects::Update,
    prelude::*,
};

/// Fetch one batch with long polling. Shared by [`Bot::into_updates`] and [`Poller`].
async fn fetch_batch(
    bot: &Bot,
    offset: u64,
    limit: Option<u32>,
    poll_timeout: Duration,
    allowed_updates: Option<&[AllowedUpdate]>,
) -> Result<Vec<Update>> {
    GetUpdates::builder()
        .offset(offset)
        .maybe_limit(limit)
        .timeout_secs(poll_timeout.as_secs())
        .maybe_allowed_updates(allowed_updates)
        .build()
        .call_on(bot)
        .await
}

impl Bot {
    /// Convert the connection into an endless [`Stream`] of [`Update`]'s.
    ///
    /// The lower-level sibling of [`Poller`]: batches are fetched with long
    /// polling and flattened, the offset advances past the last seen update.
    pub fn into_updates(
        self,
        offset: u64,
        poll_timeout: Duration,
        limit: Option<u32>,
        allowed_updates: Option<Vec<AllowedUpdate>>,
    ) -> impl Stream<Item = Result<Update>> {
        let advance = move |(this, offset, allowed_updates): (
            Self,
            u64,
            Option<Vec<AllowedUpdate>>,
        )| async move {
            let updates =
                fetch_batch(&this, offset, limit, poll_timeout, allowed_updates.as_deref())
                    .await?;
            let next_offset = updates.last().map_or(offset, |last_update| last_update.id + 1);
            info!(n = updates.len(), next_offset, "received updates");
            Ok::<_, Error>(Some((
                stream::iter(updates).map(Ok),
                (this, next_offset, allowed_updates),
            )))
        };
        stream::try_unfold((self, offset, allowed_updates), advance).try_flatten()
    }
}

/// The long-poll runner: fetches update batches and feeds the dispatcher.
///
/// Envelopes inside one batch are dispatched strictly in arrival order, one at
/// a time. A failed fetch is reported and retried on the next iteration; the
/// runner only ever stops on the shutdown signal, and always finishes the
/// batch in flight before honoring it.
#[derive(Builder)]
#[must_use]
pub struct Poller {
    bot: Bot,

    dispatcher: Dispatcher,

    /// Identifier of the first update to request.
    #[builder(default)]
    offset: u64,

    /// Maximum batch size, 1-100.
    limit: Option<u32>,

    /// Server-side long-poll timeout.
    #[builder(default = Duration::from_secs(50))]
    poll_timeout: Duration,

    /// Update kinds to subscribe to. Unset means the platform default.
    allowed_updates: Option<Vec<AllowedUpdate>>,
}

impl Poller {
    /// Run the poller until the shutdown future resolves.
    pub async fn run<H: EventHandler>(
        mut self,
        handler: &H,
        shutdown: impl Future<Output = ()>,
    ) -> Result {
        info!(offset = self.offset, "running the poller");
        tokio::pin!(shutdown);
        loop {
            let batch = tokio::select! {
                // Once the signal is seen, no further batch is requested.
                biased;
                () = &mut shutdown => {
                    info!("shutting down");
                    break;
                }
                batch = self.next_batch() => batch,
            };
            match batch {
                Ok(updates) => self.dispatch_batch(updates, handler).await,
                Err(Error::TooManyRequests { retry_after }) => {
                    warn!(retry_after_secs = retry_after.as_secs(), "rate limited, waiting");
                    tokio::time::sleep(retry_after).await;
                }
                Err(error) => {
                    // A single failed fetch is not fatal, the next iteration retries.
                    error!("failed to fetch the updates: {error}");
                }
            }
        }
        Ok(())
    }

    async fn next_batch(&mut self) -> Result<Vec<Update>> {
        let updates = fetch_batch(
            &self.bot,
            self.offset,
            self.limit,
            self.poll_timeout,
            self.allowed_updates.as_deref(),
        )
        .await?;
        if let Some(last_update) = updates.last() {
            self.offset = last_update.id + 1;
        }
        debug!(n = updates.len(), next_offset = self.offset, "received a batch");
        Ok(updates)
    }

    /// Dispatch one batch sequentially in arrival order.
    async fn dispatch_batch<H: EventHandler>(&mut self, updates: Vec<Update>, handler: &H) {
        for update in updates {
            let update_id = update.id;
            let Some(event) = self.dispatcher.dispatch(update) else {
                continue;
            };
            debug!(update_id, event = %event.kind(), "dispatching");
            if let Err(error) = handler.on_event(event).await {
                handler.on_error(error).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use axum::{Json, Router, extract::State, routing::post};
    use serde_json::{Value, json};
    use tokio::sync::Notify;
    use url::Url;

    use super::*;
    use crate::events::{Event, EventKind};

    /// Records dispatched event kinds; fails on a chosen event to test error isolation.
    #[derive(Default)]
    struct Recorder {
        kinds: Mutex<Vec<EventKind>>,
        errors: Mutex<Vec<String>>,
        fail_on: Option<EventKind>,

        /// Fire the notification once this many events have been seen.
        notify_after: Option<(usize, Arc<Notify>)>,
    }

    impl EventHandler for Recorder {
        async fn on_event(&self, event: Event) -> Result {
            let kind = event.kind();
            let n_seen = {
                let mut kinds = self.kinds.lock().unwrap();
                kinds.push(kind);
                kinds.len()
            };
            if let Some((threshold, notify)) = &self.notify_after {
                if n_seen >= *threshold {
                    notify.notify_one();
                }
            }
            if self.fail_on == Some(kind) {
                return Err(Error::Api { error_code: 0, description: "boom".to_string() });
            }
            Ok(())
        }

        async fn on_error(&self, error: Error) {
            self.errors.lock().unwrap().push(error.to_string());
        }
    }

    type StubState = (Arc<Mutex<VecDeque<Value>>>, Arc<Mutex<Vec<Value>>>);

    async fn respond(
        State((script, requests)): State<StubState>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        requests.lock().unwrap().push(body);
        let response = script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json!({"ok": true, "result": []}));
        Json(response)
    }

    /// Spin up a local Bot API double that replays the scripted responses in
    /// order, then answers every further call with an empty batch. Returns a
    /// [`Bot`] pointed at it and the log of received request bodies.
    async fn scripted_bot(script: Vec<Value>) -> (Bot, Arc<Mutex<Vec<Value>>>) {
        let state: StubState =
            (Arc::new(Mutex::new(script.into())), Arc::new(Mutex::new(Vec::new())));
        let requests = Arc::clone(&state.1);
        let router = Router::new().route("/{*method}", post(respond)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let root_url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        let bot = Bot::builder().token("42:TEST").root_url(root_url).build().unwrap();
        (bot, requests)
    }

    fn rate_limited() -> Value {
        json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 0",
            "parameters": {"retry_after": 0}
        })
    }

    fn poller() -> Poller {
        Poller::builder()
            .bot(Bot::builder().token("42:TEST").build().unwrap())
            .dispatcher(Dispatcher::builder().build())
            .build()
    }

    fn batch() -> Vec<Update> {
        // language=json
        serde_json::from_str(
            r#"[
                {"update_id": 1, "message": {"message_id": 1, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "first"}},
                {"update_id": 2, "unrecognized_kind": {}},
                {"update_id": 3, "callback_query": {"id": "q", "chat_instance": "i", "from": {"id": 7, "first_name": "Eve"}}},
                {"update_id": 4, "message": {"message_id": 2, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "last"}}
            ]"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn batch_is_dispatched_in_arrival_order() {
        let recorder = Recorder::default();
        poller().dispatch_batch(batch(), &recorder).await;
        assert_eq!(
            *recorder.kinds.lock().unwrap(),
            [EventKind::Message, EventKind::CallbackQuery, EventKind::Message],
        );
        assert!(recorder.errors.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn handler_error_does_not_stop_the_batch() {
        let recorder = Recorder { fail_on: Some(EventKind::CallbackQuery), ..Recorder::default() };
        poller().dispatch_batch(batch(), &recorder).await;
        assert_eq!(recorder.kinds.lock().unwrap().len(), 3);
        assert_eq!(recorder.errors.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn run_waits_out_rate_limits_and_finishes_the_batch_before_stopping() {
        // Four rate-limited responses exhaust the connection-level retries, so
        // the runner's own back-off arm is taken before the batch arrives.
        let script = vec![
            rate_limited(),
            rate_limited(),
            rate_limited(),
            rate_limited(),
            json!({"ok": true, "result": [
                {"update_id": 1, "message": {"message_id": 1, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "hi"}},
                {"update_id": 2, "callback_query": {"id": "q", "chat_instance": "i", "from": {"id": 7, "first_name": "Eve"}}}
            ]}),
        ];
        let (bot, requests) = scripted_bot(script).await;
        let notify = Arc::new(Notify::new());
        let recorder = Recorder {
            notify_after: Some((2, Arc::clone(&notify))),
            ..Recorder::default()
        };
        let poller = Poller::builder()
            .bot(bot)
            .dispatcher(Dispatcher::builder().build())
            .poll_timeout(Duration::ZERO)
            .build();

        // The signal fires in the middle of dispatching, yet both events of
        // the in-flight batch come through before the runner returns.
        poller.run(&recorder, async move { notify.notified().await }).await.unwrap();

        assert_eq!(
            *recorder.kinds.lock().unwrap(),
            [EventKind::Message, EventKind::CallbackQuery],
        );
        assert_eq!(requests.lock().unwrap().len(), 5, "no fetch after the signal");
    }

    #[tokio::test]
    async fn into_updates_flattens_batches_and_advances_the_offset() {
        let script = vec![
            json!({"ok": true, "result": [
                {"update_id": 1, "message": {"message_id": 1, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "one"}},
                {"update_id": 2, "message": {"message_id": 2, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "two"}}
            ]}),
            json!({"ok": true, "result": [
                {"update_id": 3, "message": {"message_id": 3, "date": 0, "chat": {"id": 42, "type": "private"}, "text": "three"}}
            ]}),
        ];
        let (bot, requests) = scripted_bot(script).await;
        let updates =
            bot.into_updates(0, Duration::ZERO, Some(100), Some(vec![AllowedUpdate::Message]));
        tokio::pin!(updates);

        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(updates.next().await.unwrap().unwrap().id);
        }

        assert_eq!(ids, [1, 2, 3]);
        let requests = requests.lock().unwrap();
        assert_eq!(requests[0]["offset"], 0);
        assert_eq!(requests[0]["limit"], 100);
        assert_eq!(requests[0]["allowed_updates"], json!(["message"]));
        assert_eq!(requests[1]["offset"], 3, "the offset moves past the last seen update");
    }
}
