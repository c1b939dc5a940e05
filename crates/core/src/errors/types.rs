//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for op2aws operations
pub type Result<T> = std::result::Result<T, Error>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for op2aws operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A secret or OTP could not be read from the vault
    #[error("secret '{reference}' is unavailable: {message}")]
    SecretUnavailable { reference: String, message: String },

    /// The identity service rejected or could not complete the exchange
    #[error("{operation} failed: {message}")]
    IssuanceFailed {
        operation: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A cache entry could not be read, decoded, written or removed
    #[error("credential cache {operation} failed for '{}': {message}", .path.display())]
    CacheIo {
        path: PathBuf,
        operation: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations outside the credential cache
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let invocation = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}
