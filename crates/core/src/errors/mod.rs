//! Error types for op2aws operations

mod builders;
mod conversions;
mod types;

pub use types::{Error, Result};
