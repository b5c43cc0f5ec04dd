//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through ports to implement the sync pipeline.

pub mod broadcast;
pub mod cache;
pub mod delta;
pub mod sync;
