//! Core domain types, errors, and constants for `op2aws`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate
//!   in the workspace. Each failure kind of the resolution pipeline (vault,
//!   issuance, cache) has its own variant.
//! - **`types`**: secret references, long-lived keys, temporary credentials
//!   and the issuance request that selects a flow.
//! - **`constants`**: default field labels, session name, environment
//!   variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
