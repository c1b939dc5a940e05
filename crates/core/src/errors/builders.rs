//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create a vault error for a secret or OTP that could not be fetched
    #[must_use]
    pub fn secret_unavailable(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SecretUnavailable {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create an issuance error without an underlying cause
    #[must_use]
    pub fn issuance_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::IssuanceFailed {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an issuance error wrapping the identity service's own error
    #[must_use]
    pub fn issuance_failed_with_source(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::IssuanceFailed {
            operation: operation.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a cache error from an I/O or decoding failure
    #[must_use]
    pub fn cache_io_with_source<E>(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::CacheIo {
            path: path.into(),
            operation: operation.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a JSON error with a description of what was being decoded
    #[must_use]
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            message: message.into(),
            source,
        }
    }

    /// True for errors raised by the vault
    #[must_use]
    pub fn is_secret_unavailable(&self) -> bool {
        matches!(self, Error::SecretUnavailable { .. })
    }

    /// True for errors raised by the identity service
    #[must_use]
    pub fn is_issuance_failed(&self) -> bool {
        matches!(self, Error::IssuanceFailed { .. })
    }

    /// True for errors raised by the credential cache
    #[must_use]
    pub fn is_cache_io(&self) -> bool {
        matches!(self, Error::CacheIo { .. })
    }
}
