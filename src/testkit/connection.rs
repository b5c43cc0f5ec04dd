//! [`Connection`] doubles.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{ConnectionId, PushEvent};
use crate::error::DeliveryError;
use crate::port::Connection;

/// Records every event it is sent.
pub struct RecordingConnection {
    id: ConnectionId,
    events: Mutex<Vec<PushEvent>>,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<PushEvent> {
        self.events.lock().clone()
    }

    /// Wire `type` tags of received events, in order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(PushEvent::kind).collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, event: &PushEvent) -> Result<(), DeliveryError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Fails every send as if the peer had gone away.
pub struct FailingConnection {
    id: ConnectionId,
}

impl FailingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
        })
    }
}

#[async_trait]
impl Connection for FailingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, _event: &PushEvent) -> Result<(), DeliveryError> {
        Err(DeliveryError::Closed)
    }
}

/// Never completes a send.
pub struct StalledConnection {
    id: ConnectionId,
}

impl StalledConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
        })
    }
}

#[async_trait]
impl Connection for StalledConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, _event: &PushEvent) -> Result<(), DeliveryError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}
