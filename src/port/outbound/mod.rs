//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod cache;
pub mod connection;
pub mod source;
pub mod store;
