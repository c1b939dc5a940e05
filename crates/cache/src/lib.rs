//! Credential cache for op2aws
//!
//! Temporary credentials are kept as one JSON file per [`CacheFingerprint`]
//! inside a cache directory. An entry is only ever returned while it is
//! still valid; the lookup that finds it expired deletes it.

pub mod fingerprint;
pub mod store;

pub use fingerprint::CacheFingerprint;
pub use store::CredentialCache;
