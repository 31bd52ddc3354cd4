use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::sync::client::SyncClient;
use crate::sync::error::SyncError;
use crate::sync::push::PushConnector;

/// Point-in-time view of a synchronized endpoint. `loading` is true only
/// until the first fetch settles; after that a failed refresh leaves the
/// previous `data` in place and surfaces the failure through `error`.
pub struct SyncSnapshot<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<SyncError>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> SyncSnapshot<T> {
    fn initial() -> SyncSnapshot<T> {
        SyncSnapshot {
            data: None,
            loading: true,
            error: None,
            last_updated: None,
        }
    }
}

// Written out by hand so cloning does not demand `T: Clone`; the payload
// itself is shared behind the `Arc`.
impl<T> Clone for SyncSnapshot<T> {
    fn clone(&self) -> Self {
        SyncSnapshot {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            last_updated: self.last_updated,
        }
    }
}

/// Handle to a background sync worker. Dropping it aborts the worker, so
/// no further requests are issued and no further snapshots are produced.
pub struct Subscription<T> {
    snapshots: watch::Receiver<SyncSnapshot<T>>,
    worker: JoinHandle<()>,
}

impl<T> Subscription<T> {
    pub fn snapshot(&self) -> SyncSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Waits until the worker publishes a snapshot newer than the last one
    /// observed. Returns false if the worker is gone.
    pub async fn changed(&mut self) -> bool {
        self.snapshots.changed().await.is_ok()
    }

    /// Ends the subscription immediately. Equivalent to dropping the
    /// handle; spelled out for callers that want the intent visible.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Polls `endpoint` every `poll_interval`, starting with an immediate
/// fetch.
pub fn subscribe<T>(
    client: Arc<SyncClient>,
    endpoint: &str,
    poll_interval: Duration,
) -> Subscription<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    start(client, endpoint.to_string(), poll_interval, None)
}

/// Like `subscribe`, but attempts to upgrade to server push after the
/// initial fetch. While a push session is live no polls are issued; when
/// it ends the subscription falls back to polling for good.
pub fn subscribe_with_push<T>(
    client: Arc<SyncClient>,
    endpoint: &str,
    poll_interval: Duration,
    connector: Arc<dyn PushConnector>,
) -> Subscription<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    start(client, endpoint.to_string(), poll_interval, Some(connector))
}

fn start<T>(
    client: Arc<SyncClient>,
    endpoint: String,
    poll_interval: Duration,
    connector: Option<Arc<dyn PushConnector>>,
) -> Subscription<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let (sender, receiver) = watch::channel(SyncSnapshot::initial());
    let worker = tokio::spawn(run_sync_loop(
        client,
        endpoint,
        poll_interval,
        connector,
        sender,
    ));

    Subscription {
        snapshots: receiver,
        worker,
    }
}

async fn run_sync_loop<T>(
    client: Arc<SyncClient>,
    endpoint: String,
    poll_interval: Duration,
    connector: Option<Arc<dyn PushConnector>>,
    snapshots: watch::Sender<SyncSnapshot<T>>,
) where
    T: DeserializeOwned + Send + Sync + 'static,
{
    refresh(&client, &endpoint, &snapshots).await;

    // One upgrade attempt per subscription. A push session that ends drops
    // the worker back into polling and it stays there.
    if let Some(connector) = connector {
        match connector.connect().await {
            Ok(mut frames) => {
                tracing::info!("Push channel open for {}", endpoint);

                while let Some(frame) = frames.recv().await {
                    apply_frame(&frame, &endpoint, &snapshots);
                }

                tracing::warn!("Push channel for {} closed, falling back to polling", endpoint);
            }
            Err(err) => {
                tracing::warn!("Push upgrade for {} failed, polling instead: {}", endpoint, err);
            }
        }
    }

    let mut ticks = tokio::time::interval(poll_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // A fresh interval yields its first tick immediately; the fetch above
    // already covered that slot.
    ticks.tick().await;

    loop {
        ticks.tick().await;
        refresh(&client, &endpoint, &snapshots).await;
    }
}

async fn refresh<T>(client: &SyncClient, endpoint: &str, snapshots: &watch::Sender<SyncSnapshot<T>>)
where
    T: DeserializeOwned + Send + Sync,
{
    match client.fetch::<T>(endpoint).await {
        Ok(value) => publish(snapshots, value),
        Err(err) => {
            snapshots.send_modify(|snapshot| {
                snapshot.loading = false;
                snapshot.error = Some(err);
            });
        }
    }
}

fn apply_frame<T: DeserializeOwned>(
    frame: &str,
    endpoint: &str,
    snapshots: &watch::Sender<SyncSnapshot<T>>,
) {
    match serde_json::from_str::<T>(frame) {
        Ok(value) => publish(snapshots, value),
        Err(err) => {
            tracing::warn!("Discarding undecodable push frame for {}: {}", endpoint, err);
        }
    }
}

fn publish<T>(snapshots: &watch::Sender<SyncSnapshot<T>>, value: T) {
    snapshots.send_modify(|snapshot| {
        snapshot.data = Some(Arc::new(value));
        snapshot.loading = false;
        snapshot.error = None;
        snapshot.last_updated = Some(Utc::now());
    });
}
