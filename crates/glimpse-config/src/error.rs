//! # Design
//!
//! - Keep configuration error messages constant.
//! - Carry the offending variable and value as structured fields.

use thiserror::Error;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading start-up configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable was not provided.
    #[error("missing environment configuration")]
    Missing {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// A variable was present but could not be used.
    #[error("invalid configuration")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: &'static str, value: &str) -> Self {
        Self::Invalid {
            name,
            reason,
            value: Some(value.to_string()),
        }
    }

    /// Name of the variable the error refers to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Missing { name } | Self::Invalid { name, .. } => name,
        }
    }
}
