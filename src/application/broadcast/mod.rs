//! Live subscription tracking and event fan-out.

mod broadcaster;
mod registry;

pub use broadcaster::{Broadcaster, DeliveryReport, DEFAULT_SEND_TIMEOUT};
pub use registry::{RegistryStats, SubscriptionRegistry};
