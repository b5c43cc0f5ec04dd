//! Typed caches over outbound key-value ports.

mod snapshot;

pub use snapshot::{Cached, ChangeCache, DEFAULT_KEY_PREFIX, DEFAULT_TTL};
