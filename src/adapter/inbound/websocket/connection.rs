//! [`Connection`] backed by a WebSocket writer task.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::domain::{ConnectionId, PushEvent};
use crate::error::DeliveryError;
use crate::port::Connection;

/// Handle to one client socket.
///
/// Frames are queued on a bounded channel drained by the socket's writer
/// task. A full queue makes `send` wait, so a slow client hits the
/// broadcaster's send timeout and is evicted.
pub struct WsConnection {
    id: ConnectionId,
    outbound: mpsc::Sender<Message>,
}

impl WsConnection {
    pub fn new(outbound: mpsc::Sender<Message>) -> Self {
        Self {
            id: ConnectionId::new(),
            outbound,
        }
    }
}

#[async_trait]
impl Connection for WsConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, event: &PushEvent) -> Result<(), DeliveryError> {
        let json =
            serde_json::to_string(event).map_err(|e| DeliveryError::Encode(e.to_string()))?;
        self.outbound
            .send(Message::Text(json))
            .await
            .map_err(|_| DeliveryError::Closed)
    }
}
