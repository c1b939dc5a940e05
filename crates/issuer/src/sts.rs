//! AWS STS implementation of [`IdentityService`]

use crate::identity::{AssumeRoleRequest, IdentityService, SessionTokenRequest};
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_sts::config::Region;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client;
use chrono::{DateTime, Utc};
use op2aws_core::{
    Error, LongLivedKeys, Result, TemporaryCredential, COMMAND_ROOT, DEFAULT_STS_REGION,
};
use op2aws_utils::run_async;

const GET_SESSION_TOKEN: &str = "GetSessionToken";
const ASSUME_ROLE: &str = "AssumeRole";

/// Calls STS with the long-lived keys as static credentials.
///
/// The region comes from the usual AWS provider chain (`AWS_REGION`,
/// profile, IMDS) and falls back to `us-east-1`. Each call runs on its own
/// current-thread runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct StsIdentityService;

impl StsIdentityService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    async fn client(&self, keys: &LongLivedKeys) -> Client {
        let credentials = Credentials::new(
            keys.access_key_id(),
            keys.secret_access_key(),
            None,
            None,
            COMMAND_ROOT,
        );

        let region =
            RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_STS_REGION));

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .load()
            .await;

        Client::new(&shared_config)
    }
}

impl IdentityService for StsIdentityService {
    fn issue_session_token(
        &self,
        keys: &LongLivedKeys,
        request: &SessionTokenRequest,
    ) -> Result<TemporaryCredential> {
        tracing::debug!(mfa = request.mfa.is_some(), "calling sts:GetSessionToken");

        run_async(async {
            let client = self.client(keys).await;
            let output = client
                .get_session_token()
                .set_serial_number(request.mfa.as_ref().map(|m| m.serial_number.clone()))
                .set_token_code(request.mfa.as_ref().map(|m| m.token_code.clone()))
                .send()
                .await
                .map_err(|e| sdk_error(GET_SESSION_TOKEN, e))?;

            convert(GET_SESSION_TOKEN, output.credentials())
        })
    }

    fn assume_role(
        &self,
        keys: &LongLivedKeys,
        request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredential> {
        tracing::debug!(
            role_arn = %request.role_arn,
            session_name = %request.session_name,
            mfa = request.mfa.is_some(),
            "calling sts:AssumeRole"
        );

        run_async(async {
            let client = self.client(keys).await;
            let output = client
                .assume_role()
                .role_arn(&request.role_arn)
                .role_session_name(&request.session_name)
                .set_serial_number(request.mfa.as_ref().map(|m| m.serial_number.clone()))
                .set_token_code(request.mfa.as_ref().map(|m| m.token_code.clone()))
                .send()
                .await
                .map_err(|e| sdk_error(ASSUME_ROLE, e))?;

            convert(ASSUME_ROLE, output.credentials())
        })
    }
}

fn sdk_error<E>(operation: &str, err: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();
    Error::issuance_failed_with_source(operation, message, err)
}

fn convert(
    operation: &str,
    credentials: Option<&aws_sdk_sts::types::Credentials>,
) -> Result<TemporaryCredential> {
    let credentials = credentials
        .ok_or_else(|| Error::issuance_failed(operation, "response contained no credentials"))?;

    let expiration = credentials.expiration();
    let expiration = to_utc(expiration.secs(), expiration.subsec_nanos()).ok_or_else(|| {
        Error::issuance_failed(
            operation,
            format!("expiration {}s is out of range", expiration.secs()),
        )
    })?;

    Ok(TemporaryCredential::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        credentials.session_token(),
        expiration,
    ))
}

fn to_utc(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sts::primitives::DateTime as SmithyDateTime;

    #[test]
    fn test_convert_credentials() {
        let credentials = aws_sdk_sts::types::Credentials::builder()
            .access_key_id("ASIAEXAMPLE")
            .secret_access_key("secret")
            .session_token("token")
            .expiration(SmithyDateTime::from_secs_and_nanos(1_900_000_000, 500_000_000))
            .build()
            .unwrap();

        let converted = convert(GET_SESSION_TOKEN, Some(&credentials)).unwrap();
        assert_eq!(converted.access_key_id(), "ASIAEXAMPLE");
        assert_eq!(converted.secret_access_key(), "secret");
        assert_eq!(converted.session_token(), "token");
        assert_eq!(converted.expiration().timestamp(), 1_900_000_000);
        assert_eq!(converted.expiration().timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_missing_credentials_is_issuance_failure() {
        let err = convert(ASSUME_ROLE, None).unwrap_err();
        match err {
            Error::IssuanceFailed { operation, .. } => assert_eq!(operation, "AssumeRole"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sdk_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = sdk_error(GET_SESSION_TOKEN, io);
        assert!(err.is_issuance_failed());
        assert!(err.to_string().contains("refused"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
