//! Inbound adapters: the operator CLI and the live event channel.

pub mod cli;
pub mod websocket;
