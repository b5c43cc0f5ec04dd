//! WebSocket live event channel.
//!
//! Clients send JSON requests tagged by `action`; the server replies with
//! acknowledgement events and pushes broadcast events as they happen.

pub mod connection;
pub mod message;
pub mod server;

pub use connection::WsConnection;
pub use message::ClientRequest;
pub use server::{handle_request, WsServer};
