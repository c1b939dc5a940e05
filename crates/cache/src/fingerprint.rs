use md5::{Digest, Md5};
use op2aws_core::IssuanceRequest;
use std::fmt;

/// Cache key derived from everything that selects an issuance flow.
///
/// MD5 of `"{vault}-{item}-{mfa}-{role}"`, absent fields rendered as the
/// empty string. The field order and separator are part of the on-disk
/// format: changing them orphans every existing entry.
///
/// The separator is not escaped, so requests whose fields only differ in
/// where a `-` splits them (vault `team-aws` + item `prod` vs vault `team` +
/// item `aws-prod`) share one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheFingerprint([u8; 16]);

impl CacheFingerprint {
    #[must_use]
    pub fn new(request: &IssuanceRequest) -> Self {
        Self::from_parts(
            request.vault_id(),
            request.item_id(),
            request.mfa_serial().unwrap_or_default(),
            request.role_arn().unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn from_parts(vault_id: &str, item_id: &str, mfa_serial: &str, role_arn: &str) -> Self {
        let mut hasher = Md5::new();
        hasher.update(format!("{vault_id}-{item_id}-{mfa_serial}-{role_arn}").as_bytes());

        let mut digest = [0u8; 16];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }

    /// Lowercase hex digest, also used as the entry file name
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl From<&IssuanceRequest> for CacheFingerprint {
    fn from(request: &IssuanceRequest) -> Self {
        Self::new(request)
    }
}

impl fmt::Display for CacheFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
