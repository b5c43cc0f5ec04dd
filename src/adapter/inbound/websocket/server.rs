//! WebSocket accept loop and per-socket session handling.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, trace, warn};

use super::connection::WsConnection;
use super::message::{ClientRequest, SubscriptionChange};
use crate::application::broadcast::SubscriptionRegistry;
use crate::domain::{ConnectionId, PushEvent};
use crate::error::Result;
use crate::port::Connection;

/// Listener for live clients.
pub struct WsServer {
    listener: TcpListener,
    registry: Arc<SubscriptionRegistry>,
    channel_capacity: usize,
}

impl WsServer {
    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(
        addr: &str,
        registry: Arc<SubscriptionRegistry>,
        channel_capacity: usize,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            registry,
            channel_capacity: channel_capacity.max(1),
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients until `shutdown` flips to `true`.
    pub async fn serve(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(addr = ?self.listener.local_addr().ok(), "WebSocket server listening");

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("WebSocket server stopping");
                        break;
                    }
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let registry = Arc::clone(&self.registry);
                            let capacity = self.channel_capacity;
                            tokio::spawn(handle_socket(stream, peer, registry, capacity));
                        }
                        Err(e) => warn!(error = %e, "Failed to accept connection"),
                    }
                }
            }
        }

        Ok(())
    }
}

async fn handle_socket(
    stream: TcpStream,
    peer: SocketAddr,
    registry: Arc<SubscriptionRegistry>,
    capacity: usize,
) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            debug!(peer = %peer, error = %e, "WebSocket handshake failed");
            return;
        }
    };
    let (mut sink, mut source) = ws.split();
    let (tx, mut rx) = mpsc::channel::<Message>(capacity);

    let connection = Arc::new(WsConnection::new(tx.clone()));
    let id = connection.id();
    registry.register(connection);
    debug!(connection_id = %id, peer = %peer, "Client connected");

    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    while let Some(frame) = source.next().await {
        let reply = match frame {
            Ok(Message::Text(text)) => {
                trace!(connection_id = %id, bytes = text.len(), "Client request");
                let event = match serde_json::from_str::<ClientRequest>(&text) {
                    Ok(request) => handle_request(&registry, id, &request),
                    Err(e) => PushEvent::error(format!("invalid request: {e}")),
                };
                match serde_json::to_string(&event) {
                    Ok(json) => Message::Text(json),
                    Err(e) => {
                        warn!(connection_id = %id, error = %e, "Failed to encode reply");
                        continue;
                    }
                }
            }
            Ok(Message::Ping(data)) => Message::Pong(data),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(connection_id = %id, error = %e, "WebSocket read error");
                break;
            }
        };
        if tx.send(reply).await.is_err() {
            break;
        }
    }

    registry.unregister(id);
    drop(tx);
    writer.abort();
    debug!(connection_id = %id, "Client disconnected");
}

/// Apply a client request to the registry and build the reply event.
pub fn handle_request(
    registry: &SubscriptionRegistry,
    id: ConnectionId,
    request: &ClientRequest,
) -> PushEvent {
    let Some(change) = request.subscription_change() else {
        return PushEvent::pong();
    };

    match change {
        SubscriptionChange::Subscribe(_, key) | SubscriptionChange::Unsubscribe(_, key)
            if key.trim().is_empty() =>
        {
            PushEvent::error("id must not be empty")
        }
        SubscriptionChange::Subscribe(scope, key) => {
            if registry.subscribe(id, scope, key) {
                PushEvent::Subscribed {
                    scope,
                    id: key.to_string(),
                }
            } else {
                PushEvent::error("connection is not registered")
            }
        }
        SubscriptionChange::Unsubscribe(scope, key) => {
            registry.unsubscribe(id, scope, key);
            PushEvent::Unsubscribed {
                scope,
                id: key.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubscriptionScope;
    use crate::testkit::connection::RecordingConnection;

    #[test]
    fn subscribe_acknowledges_and_registers() {
        let registry = SubscriptionRegistry::new();
        let conn = RecordingConnection::new();
        let id = conn.id();
        registry.register(conn);

        let reply = handle_request(
            &registry,
            id,
            &ClientRequest::SubscribePlayer { id: "p1".into() },
        );
        assert_eq!(reply.kind(), "SUBSCRIBED");
        assert!(registry.is_subscribed(id, SubscriptionScope::Player, "p1"));

        let reply = handle_request(
            &registry,
            id,
            &ClientRequest::UnsubscribePlayer { id: "p1".into() },
        );
        assert_eq!(reply.kind(), "UNSUBSCRIBED");
        assert!(!registry.is_subscribed(id, SubscriptionScope::Player, "p1"));
    }

    #[test]
    fn ping_gets_pong_and_empty_id_is_error() {
        let registry = SubscriptionRegistry::new();
        let conn = RecordingConnection::new();
        let id = conn.id();
        registry.register(conn);

        assert_eq!(handle_request(&registry, id, &ClientRequest::Ping).kind(), "PONG");
        let reply = handle_request(
            &registry,
            id,
            &ClientRequest::SubscribeLeague { id: " ".into() },
        );
        assert_eq!(reply.kind(), "ERROR");
    }

    #[test]
    fn unregistered_connection_cannot_subscribe() {
        let registry = SubscriptionRegistry::new();
        let reply = handle_request(
            &registry,
            ConnectionId::new(),
            &ClientRequest::SubscribeLeague { id: "L1".into() },
        );
        assert_eq!(reply.kind(), "ERROR");
    }
}
