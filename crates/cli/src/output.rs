//! What `op2aws cli` prints

use chrono::{DateTime, Utc};
use op2aws_core::{Result, TemporaryCredential, CREDENTIAL_PROCESS_VERSION};
use serde::Serialize;

/// The document the AWS SDKs expect from a `credential_process`
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CredentialProcessOutput<'a> {
    version: u8,
    access_key_id: &'a str,
    secret_access_key: &'a str,
    session_token: &'a str,
    expiration: DateTime<Utc>,
}

pub fn render_credential_process(credential: &TemporaryCredential) -> Result<String> {
    let document = CredentialProcessOutput {
        version: CREDENTIAL_PROCESS_VERSION,
        access_key_id: credential.access_key_id(),
        secret_access_key: credential.secret_access_key(),
        session_token: credential.session_token(),
        expiration: credential.expiration(),
    };
    Ok(serde_json::to_string(&document)?)
}

/// `export` lines for `eval "$(op2aws cli ... --export)"`
pub fn render_exports(credential: &TemporaryCredential) -> String {
    format!(
        "export AWS_ACCESS_KEY_ID={}\nexport AWS_SECRET_ACCESS_KEY={}\nexport AWS_SESSION_TOKEN={}\n",
        credential.access_key_id(),
        credential.secret_access_key(),
        credential.session_token(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credential() -> TemporaryCredential {
        TemporaryCredential::new(
            "ASIAEXAMPLE",
            "wJalrXUtnFEMI",
            "FwoGZXIvYXdzEJr",
            Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn test_credential_process_document() {
        let rendered = render_credential_process(&credential()).unwrap();
        assert_eq!(
            rendered,
            r#"{"Version":1,"AccessKeyId":"ASIAEXAMPLE","SecretAccessKey":"wJalrXUtnFEMI","SessionToken":"FwoGZXIvYXdzEJr","Expiration":"2030-01-02T03:04:05Z"}"#
        );
    }

    #[test]
    fn test_exports() {
        assert_eq!(
            render_exports(&credential()),
            "export AWS_ACCESS_KEY_ID=ASIAEXAMPLE\n\
             export AWS_SECRET_ACCESS_KEY=wJalrXUtnFEMI\n\
             export AWS_SESSION_TOKEN=FwoGZXIvYXdzEJr\n"
        );
    }
}
