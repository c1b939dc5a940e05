//! The identity service capability and the requests it accepts

use op2aws_core::{LongLivedKeys, Result, TemporaryCredential};

/// Serial number of an MFA device together with its current code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MfaToken {
    pub serial_number: String,
    pub token_code: String,
}

/// Credentials for the vault identity itself
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionTokenRequest {
    pub mfa: Option<MfaToken>,
}

/// Credentials for another role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    pub mfa: Option<MfaToken>,
}

/// Exchanges long-lived keys for a temporary credential
pub trait IdentityService {
    fn issue_session_token(
        &self,
        keys: &LongLivedKeys,
        request: &SessionTokenRequest,
    ) -> Result<TemporaryCredential>;

    fn assume_role(
        &self,
        keys: &LongLivedKeys,
        request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredential>;
}

impl<T: IdentityService + ?Sized> IdentityService for &T {
    fn issue_session_token(
        &self,
        keys: &LongLivedKeys,
        request: &SessionTokenRequest,
    ) -> Result<TemporaryCredential> {
        (**self).issue_session_token(keys, request)
    }

    fn assume_role(
        &self,
        keys: &LongLivedKeys,
        request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredential> {
        (**self).assume_role(keys, request)
    }
}
