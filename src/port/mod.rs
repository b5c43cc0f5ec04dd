//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌────────────┐
//! │  Data   │            │  KV / Doc   │              │    Live    │
//! │ Source  │            │   Stores    │              │ Connection │
//! └─────────┘            └─────────────┘              └────────────┘
//! ```
//!
//! - [`outbound`]: data source, key-value store, document store, live connections
//! - [`inbound`]: operator use cases (trigger, status, health, metrics)

pub mod inbound;
pub mod outbound;

pub use inbound::operator::{HealthReport, SyncMetrics, SyncOperator};
pub use outbound::cache::KeyValueStore;
pub use outbound::connection::Connection;
pub use outbound::source::NflDataSource;
pub use outbound::store::DocumentStore;
