use crate::config::IssuerConfig;
use crate::identity::{AssumeRoleRequest, IdentityService, MfaToken, SessionTokenRequest};
use op2aws_core::{
    IssuanceFlow, IssuanceRequest, LongLivedKeys, Result, SecretReference, TemporaryCredential,
};
use op2aws_vault::SecretVault;

/// Turns an [`IssuanceRequest`] into a fresh [`TemporaryCredential`].
///
/// Every step runs in order and the first failure aborts the rest: the
/// access key id, the secret access key, the OTP when an MFA serial is set,
/// and finally one identity service call. Nothing is cached here.
pub struct CredentialIssuer<V, S> {
    vault: V,
    identity: S,
    config: IssuerConfig,
}

impl<V: SecretVault, S: IdentityService> CredentialIssuer<V, S> {
    pub fn new(vault: V, identity: S, config: IssuerConfig) -> Self {
        Self {
            vault,
            identity,
            config,
        }
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    #[tracing::instrument(
        skip(self, request),
        fields(vault = %request.vault_id(), item = %request.item_id(), flow = %request.flow())
    )]
    pub fn issue(&self, request: &IssuanceRequest) -> Result<TemporaryCredential> {
        let keys = self.fetch_keys(request)?;
        let mfa = self.fetch_mfa(request)?;

        let credential = match request.flow() {
            IssuanceFlow::SessionToken => {
                let sts_request = SessionTokenRequest { mfa };
                self.identity.issue_session_token(&keys, &sts_request)?
            }
            IssuanceFlow::AssumeRole { role_arn } => {
                let sts_request = AssumeRoleRequest {
                    role_arn: role_arn.to_string(),
                    session_name: self.config.session_name.clone(),
                    mfa,
                };
                self.identity.assume_role(&keys, &sts_request)?
            }
        };

        tracing::info!(
            expiration = %credential.expiration(),
            "issued temporary credential"
        );
        Ok(credential)
    }

    fn fetch_keys(&self, request: &IssuanceRequest) -> Result<LongLivedKeys> {
        let access_key_id = self.vault.fetch_secret(&SecretReference::new(
            request.vault_id(),
            request.item_id(),
            &self.config.access_key_field,
        ))?;
        let secret_access_key = self.vault.fetch_secret(&SecretReference::new(
            request.vault_id(),
            request.item_id(),
            &self.config.secret_access_key_field,
        ))?;
        Ok(LongLivedKeys::new(access_key_id, secret_access_key))
    }

    fn fetch_mfa(&self, request: &IssuanceRequest) -> Result<Option<MfaToken>> {
        let Some(serial_number) = request.mfa_serial() else {
            return Ok(None);
        };
        let token_code = self
            .vault
            .fetch_otp(request.vault_id(), request.item_id())?;
        Ok(Some(MfaToken {
            serial_number: serial_number.to_string(),
            token_code,
        }))
    }
}
