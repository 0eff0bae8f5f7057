//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses parse as socket addresses
//! - Validate value ranges (timeouts > 0, body limit > 0, file mode)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WikiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::WikiConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("storage.file_mode {0:#o} must grant owner read/write and stay within 0o777")]
    InvalidFileMode(u32),

    #[error("storage.data_dir must not be empty")]
    EmptyDataDir,
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &WikiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let mode = config.storage.file_mode;
    if mode & !0o777 != 0 || mode & 0o600 != 0o600 {
        errors.push(ValidationError::InvalidFileMode(mode));
    }

    if config.storage.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
