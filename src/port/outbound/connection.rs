//! Live client connection port.

use async_trait::async_trait;

use crate::domain::event::PushEvent;
use crate::domain::ConnectionId;
use crate::error::DeliveryError;

/// A handle for pushing events to one real-time client.
///
/// The registry holds these behind `Arc` and never awaits a send while
/// holding a lock.
#[async_trait]
pub trait Connection: Send + Sync {
    fn id(&self) -> ConnectionId;

    /// Deliver one event. Errors mean the client is gone or unresponsive.
    async fn send(&self, event: &PushEvent) -> Result<(), DeliveryError>;
}
