//! Miette-based diagnostics for configuration errors.
//!
//! Renders the offending configuration file with a labeled span and an
//! optional help line.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as SettingsError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(nflsync::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error pointing at `offset..offset+len` in `src`.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic for a config load failure, if it can be located.
    ///
    /// Parse errors point at the span reported by the TOML parser; invalid
    /// values point at the first occurrence of the field name.
    #[must_use]
    pub fn from_load_error(error: &Error, src: &str) -> Option<Self> {
        match error {
            Error::Config(SettingsError::Parse(e)) => {
                let span = e.span().unwrap_or(0..0);
                Some(
                    Self::new(e.message(), src, span.start, span.len())
                        .with_help("check the TOML syntax near the highlighted location"),
                )
            }
            Error::Config(SettingsError::InvalidValue { field, reason }) => {
                let offset = src.find(field)?;
                Some(Self::new(
                    format!("invalid value for {field}: {reason}"),
                    src,
                    offset,
                    field.len(),
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Config;

    #[test]
    fn parse_error_is_located() {
        let src = "[sync]\nlive_interval_secs = \"soon\"\n";
        let error = Config::parse_toml(src).unwrap_err();
        let diagnostic = ConfigError::from_load_error(&error, src).unwrap();
        assert!(diagnostic.span.offset() > 0);
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn invalid_value_points_at_field() {
        let src = "[sync]\nlive_interval_secs = 0\n";
        let error = Config::parse_toml(src).unwrap_err();
        let diagnostic = ConfigError::from_load_error(&error, src).unwrap();
        assert_eq!(diagnostic.span.offset(), src.find("live_interval_secs").unwrap());
        assert_eq!(diagnostic.span.len(), "live_interval_secs".len());
    }
}
