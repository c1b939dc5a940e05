//! Shared utilities for op2aws
//!
//! Small, dependency-light helpers used by several crates in the workspace:
//! atomic file writes for the credential cache, XDG path resolution, the
//! tracing subscriber setup, and the bridge that lets synchronous code drive
//! the async AWS SDK.

pub mod async_runtime;
pub mod atomic_file;
pub mod tracing;
pub mod xdg;

pub use async_runtime::*;
pub use atomic_file::*;
pub use xdg::*;
