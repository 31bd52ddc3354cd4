use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

#[derive(thiserror::Error, Debug)]
pub enum PushError {
    #[error("Failed to open the push channel: {0}")]
    Connect(String),
}

/// Source of server-pushed payloads. A successful `connect` hands back a
/// channel of raw frame bodies; the channel closing means the push
/// session is over and the subscriber should fall back to polling.
#[async_trait]
pub trait PushConnector: Send + Sync {
    async fn connect(&self) -> Result<mpsc::Receiver<String>, PushError>;
}

pub struct WebSocketConnector {
    url: String,
}

impl WebSocketConnector {
    pub fn new(url: String) -> WebSocketConnector {
        WebSocketConnector { url }
    }
}

#[async_trait]
impl PushConnector for WebSocketConnector {
    async fn connect(&self) -> Result<mpsc::Receiver<String>, PushError> {
        let (mut ws_stream, _) = connect_async(&self.url)
            .await
            .map_err(|err| PushError::Connect(err.to_string()))?;
        let (frames, receiver) = mpsc::channel(32);

        // Push sessions are one-way; nothing is ever sent upstream, so the
        // socket is only read from.
        tokio::spawn(async move {
            while let Some(message) = ws_stream.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if frames.send(text.to_string()).await.is_err() {
                            // The subscriber hung up.
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!("Push channel read failed: {}", err);
                        break;
                    }
                }
            }
        });

        Ok(receiver)
    }
}
