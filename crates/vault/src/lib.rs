//! Secret vault capability for op2aws
//!
//! [`SecretVault`] is the narrow interface the credential issuer depends on:
//! fetch one secret value, fetch the current OTP of an item, and report
//! whether the backend can be reached at all. [`OnePasswordVault`] implements
//! it on top of the 1Password `op` CLI, with process spawning behind the
//! [`CommandExecutor`] seam so tests never touch a real binary.

pub mod command_executor;
pub mod onepassword;

pub use command_executor::{CommandExecutor, SystemCommandExecutor};
pub use onepassword::{ItemField, ItemSummary, Named, OnePasswordVault, VaultSummary};

use op2aws_core::{Result, SecretReference};

/// Capability to read long-lived secrets and OTPs from an external store
pub trait SecretVault {
    /// Fetch a single secret value. Fails with `SecretUnavailable`.
    fn fetch_secret(&self, reference: &SecretReference) -> Result<String>;

    /// Fetch the current one-time password of an item. Fails with
    /// `SecretUnavailable`.
    fn fetch_otp(&self, vault_id: &str, item_id: &str) -> Result<String>;

    /// Whether the backend can currently be reached. Never errors.
    fn available(&self) -> bool;
}

impl<T: SecretVault + ?Sized> SecretVault for &T {
    fn fetch_secret(&self, reference: &SecretReference) -> Result<String> {
        (**self).fetch_secret(reference)
    }

    fn fetch_otp(&self, vault_id: &str, item_id: &str) -> Result<String> {
        (**self).fetch_otp(vault_id, item_id)
    }

    fn available(&self) -> bool {
        (**self).available()
    }
}
