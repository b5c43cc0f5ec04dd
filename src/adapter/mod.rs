//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - CLI and WebSocket entry points driving the application
//! - [`outbound`] - Data feed, key-value and document store implementations

pub mod inbound;
pub mod outbound;
