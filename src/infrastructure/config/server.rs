//! Live event server configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub bind: String,
    /// Per-connection send timeout before eviction.
    pub send_timeout_ms: u64,
    /// Outbound message buffer per connection.
    pub channel_capacity: usize,
}

impl ServerConfig {
    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: "127.0.0.1:8765".into(),
            send_timeout_ms: 5_000,
            channel_capacity: 256,
        }
    }
}
