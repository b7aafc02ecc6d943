//! Typed client for the [Telegram Bot API][1]: methods, objects, a bounded
//! entity cache, and an update dispatcher with long-poll and webhook loops.
//!
//! The flow: a [`polling::Poller`] or a [`webhook::Webhook`] receives raw
//! [`objects::Update`] envelopes and hands each to the [`dispatch::Dispatcher`],
//! which classifies it into one named [`events::Event`]. Along the way, nested
//! user and chat references are canonicalized through the
//! [`cache::BoundedCache`]-backed managers, and the classified event finally
//! reaches your [`events::EventHandler`].
//!
//! ```no_run
//! use botgram::{Bot, Dispatcher, Event, Result, events::EventHandler, polling::Poller};
//!
//! struct Greeter;
//!
//! impl EventHandler for Greeter {
//!     async fn on_event(&self, event: Event) -> Result {
//!         if let Event::Message(message) = event {
//!             println!("#{}: {:?}", message.chat.id, message.text);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> Result {
//! let bot = Bot::builder().token(std::env::var("BOT_TOKEN").unwrap()).build()?;
//! let poller = Poller::builder()
//!     .bot(bot)
//!     .dispatcher(Dispatcher::builder().build())
//!     .build();
//! poller.run(&Greeter, std::future::pending()).await
//! # }
//! ```
//!
//! [1]: https://core.telegram.org/bots/api

pub mod bot;
pub mod cache;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod managers;
pub mod methods;
pub mod objects;
pub mod polling;
pub mod response;
pub mod webhook;

mod prelude;

pub use crate::{
    bot::Bot,
    dispatch::Dispatcher,
    error::{Error, Result},
    events::{Event, EventKind},
};
