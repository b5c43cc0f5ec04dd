//! Live event channel over a real socket.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use nflsync::adapter::inbound::websocket::WsServer;
use nflsync::application::broadcast::{Broadcaster, SubscriptionRegistry};
use nflsync::domain::{PushEvent, SubscriptionScope};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start() -> (Arc<SubscriptionRegistry>, String, watch::Sender<bool>) {
    let registry = Arc::new(SubscriptionRegistry::new());
    let server = WsServer::bind("127.0.0.1:0", Arc::clone(&registry), 16)
        .await
        .unwrap();
    let url = format!("ws://{}", server.local_addr().unwrap());
    let (stop, stop_rx) = watch::channel(false);
    tokio::spawn(server.serve(stop_rx));
    (registry, url, stop)
}

async fn next_json(client: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("read error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn request(client: &mut Client, body: &str) -> Value {
    client.send(Message::Text(body.to_string())).await.unwrap();
    next_json(client).await
}

#[tokio::test]
async fn subscribe_then_receive_scoped_event() {
    let (registry, url, _stop) = start().await;
    let (mut client, _) = tokio_tungstenite::connect_async(url).await.unwrap();

    let ack = request(&mut client, r#"{"action":"subscribe_player","id":"qb1"}"#).await;
    assert_eq!(ack["type"], "SUBSCRIBED");
    assert_eq!(ack["scope"], "player");
    assert_eq!(ack["id"], "qb1");

    let broadcaster = Broadcaster::new(Arc::clone(&registry), Duration::from_secs(1));
    let report = broadcaster
        .broadcast_scoped(SubscriptionScope::Player, "qb1", &PushEvent::error("test"))
        .await;
    assert_eq!(report.delivered, 1);

    let pushed = next_json(&mut client).await;
    assert_eq!(pushed["type"], "ERROR");
    assert_eq!(pushed["message"], "test");
}

#[tokio::test]
async fn ping_and_bad_requests_are_answered() {
    let (_registry, url, _stop) = start().await;
    let (mut client, _) = tokio_tungstenite::connect_async(url).await.unwrap();

    let pong = request(&mut client, r#"{"action":"ping"}"#).await;
    assert_eq!(pong["type"], "PONG");

    let error = request(&mut client, r#"{"action":"teleport"}"#).await;
    assert_eq!(error["type"], "ERROR");

    let unsubscribed =
        request(&mut client, r#"{"action":"unsubscribe_league","id":"L9"}"#).await;
    assert_eq!(unsubscribed["type"], "UNSUBSCRIBED");
}

#[tokio::test]
async fn closing_client_is_unregistered() {
    let (registry, url, _stop) = start().await;
    let (mut client, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    request(&mut client, r#"{"action":"subscribe_league","id":"L1"}"#).await;
    assert_eq!(registry.connection_count(), 1);

    client.close(None).await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while registry.connection_count() > 0 {
        assert!(tokio::time::Instant::now() < deadline, "client never unregistered");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(registry.stats().league_subscriptions, 0);
}
