//! The issuance request and the flow it selects

use std::fmt;

/// Everything that determines which issuance flow runs and which cache entry
/// applies. An empty MFA serial or role ARN means "not requested".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuanceRequest {
    vault_id: String,
    item_id: String,
    mfa_serial: Option<String>,
    role_arn: Option<String>,
}

/// The two mutually exclusive ways of obtaining a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuanceFlow<'a> {
    /// Credentials tied to the vault identity itself
    SessionToken,
    /// Credentials for a different role
    AssumeRole { role_arn: &'a str },
}

impl IssuanceRequest {
    #[must_use]
    pub fn new(vault_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            vault_id: vault_id.into(),
            item_id: item_id.into(),
            mfa_serial: None,
            role_arn: None,
        }
    }

    #[must_use]
    pub fn with_mfa_serial(mut self, mfa_serial: impl Into<String>) -> Self {
        self.mfa_serial = non_empty(mfa_serial.into());
        self
    }

    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = non_empty(role_arn.into());
        self
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
    pub fn mfa_serial(&self) -> Option<&str> {
        self.mfa_serial.as_deref()
    }

    #[must_use]
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Select the flow for this request; decided fresh on every call
    #[must_use]
    pub fn flow(&self) -> IssuanceFlow<'_> {
        match self.role_arn.as_deref() {
            Some(role_arn) => IssuanceFlow::AssumeRole { role_arn },
            None => IssuanceFlow::SessionToken,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl fmt::Display for IssuanceFlow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssuanceFlow::SessionToken => write!(f, "session-token"),
            IssuanceFlow::AssumeRole { .. } => write!(f, "assume-role"),
        }
    }
}
