//! Core domain types for `op2aws`.
//!
//! - **`commands`**: argument lists for external commands (the `op` CLI)
//! - **`credentials`**: temporary credentials issued by the identity service
//! - **`request`**: the issuance request and the flow it selects
//! - **`security`**: vault references and the long-lived keys read from them

pub mod commands;
pub mod credentials;
pub mod request;
pub mod security;

pub use commands::*;
pub use credentials::*;
pub use request::*;
pub use security::*;
