//! Vault references and the long-lived keys stored behind them

use crate::constants::OP_REFERENCE_PREFIX;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

// op://vault/item/field, every segment non-empty
static OP_REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^op://([^/]+)/([^/]+)/([^/]+)$").expect("static regex is valid")
});

/// Identifies a single secret value inside the vault
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretReference {
    vault_id: String,
    item_id: String,
    field_name: String,
}

impl SecretReference {
    #[must_use]
    pub fn new(
        vault_id: impl Into<String>,
        item_id: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            vault_id: vault_id.into(),
            item_id: item_id.into(),
            field_name: field_name.into(),
        }
    }

    #[must_use]
    pub fn vault_id(&self) -> &str {
        &self.vault_id
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{OP_REFERENCE_PREFIX}{}/{}/{}",
            self.vault_id, self.item_id, self.field_name
        )
    }
}

impl FromStr for SecretReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = OP_REFERENCE_REGEX.captures(s).ok_or_else(|| {
            Error::configuration(format!(
                "invalid secret reference '{s}': expected {OP_REFERENCE_PREFIX}<vault>/<item>/<field>"
            ))
        })?;
        Ok(Self::new(&captures[1], &captures[2], &captures[3]))
    }
}

/// The static access key pair read from the vault.
///
/// Only lives for the duration of one issuance call; the secret half is wiped
/// on drop.
#[derive(Clone)]
pub struct LongLivedKeys {
    access_key_id: String,
    secret_access_key: Zeroizing<String>,
}

impl LongLivedKeys {
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: Zeroizing::new(secret_access_key.into()),
        }
    }

    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for LongLivedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongLivedKeys")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
