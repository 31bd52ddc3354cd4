//! Client side of the CineStory API: an HTTP client with caching, retry
//! and rate limiting, plus endpoint subscriptions that poll on a timer
//! and upgrade to server push when a channel is available.

mod cache;
mod client;
mod error;
mod push;
mod rate_limit;
mod subscription;

pub use cache::ResponseCache;
pub use client::{RegisterAck, SyncClient, SyncClientConfig, CLIENT_VERSION};
pub use error::SyncError;
pub use push::{PushConnector, PushError, WebSocketConnector};
pub use rate_limit::RateLimiter;
pub use subscription::{subscribe, subscribe_with_push, Subscription, SyncSnapshot};
