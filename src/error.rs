use thiserror::Error;

use crate::domain::job::SyncJobType;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by the external data source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("data source request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("data source returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unexpected payload from {endpoint}: {reason}")]
    Payload { endpoint: String, reason: String },

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by key-value and document stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("database error: {0}")]
    Database(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to encode value: {0}")]
    Encode(String),
}

/// Errors raised while pushing an event to a live connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,

    #[error("send timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// Errors raised by the sync orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("a {0} sync is already running")]
    AlreadyRunning(SyncJobType),

    #[error("unknown job type: {0}")]
    UnknownJobType(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("scheduler error: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(StoreError::Redis(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Source(SourceError::Request(err))
    }
}

impl From<tokio_cron_scheduler::JobSchedulerError> for Error {
    fn from(err: tokio_cron_scheduler::JobSchedulerError) -> Self {
        Error::Scheduler(err.to_string())
    }
}
