//! Credential resolution for op2aws
//!
//! The [`Resolver`] is the single entry point used by the CLI: it answers
//! from the [`CredentialCache`] when a valid entry exists and otherwise asks
//! the [`CredentialIssuer`] for a fresh credential and caches it.

pub mod config;
pub mod resolver;

pub use config::ResolverConfig;
pub use resolver::Resolver;

pub use op2aws_cache::{CacheFingerprint, CredentialCache};
pub use op2aws_issuer::{CredentialIssuer, IssuerConfig, StsIdentityService};
