//! End-to-end resolution against recording fakes and a real cache directory

use chrono::{Duration, Utc};
use op2aws_core::{Error, IssuanceRequest, LongLivedKeys, Result, SecretReference, TemporaryCredential};
use op2aws_issuer::{AssumeRoleRequest, IdentityService, IssuerConfig, SessionTokenRequest};
use op2aws_resolver::{CacheFingerprint, CredentialCache, Resolver, ResolverConfig};
use op2aws_vault::SecretVault;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type CallLog = Arc<Mutex<Vec<String>>>;

struct RecordingVault {
    log: CallLog,
}

impl SecretVault for RecordingVault {
    fn fetch_secret(&self, reference: &SecretReference) -> Result<String> {
        self.log
            .lock()
            .unwrap()
            .push(format!("vault:{}", reference.field_name()));
        Ok(format!("{}-value", reference.field_name()))
    }

    fn fetch_otp(&self, _vault_id: &str, _item_id: &str) -> Result<String> {
        self.log.lock().unwrap().push("vault:otp".to_string());
        Ok("424242".to_string())
    }

    fn available(&self) -> bool {
        true
    }
}

struct RecordingIdentity {
    log: CallLog,
    outcome: Mutex<Option<Result<TemporaryCredential>>>,
}

impl RecordingIdentity {
    fn returning(log: &CallLog, outcome: Result<TemporaryCredential>) -> Self {
        Self {
            log: Arc::clone(log),
            outcome: Mutex::new(Some(outcome)),
        }
    }

    fn take(&self, call: &str) -> Result<TemporaryCredential> {
        self.log.lock().unwrap().push(call.to_string());
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("identity service called more than once")
    }
}

impl IdentityService for RecordingIdentity {
    fn issue_session_token(
        &self,
        _keys: &LongLivedKeys,
        _request: &SessionTokenRequest,
    ) -> Result<TemporaryCredential> {
        self.take("sts:session-token")
    }

    fn assume_role(
        &self,
        _keys: &LongLivedKeys,
        _request: &AssumeRoleRequest,
    ) -> Result<TemporaryCredential> {
        self.take("sts:assume-role")
    }
}

fn credential(access_key_id: &str, valid_for: Duration) -> TemporaryCredential {
    TemporaryCredential::new(access_key_id, "secret", "token", Utc::now() + valid_for)
}

fn resolver(
    dir: &TempDir,
    log: &CallLog,
    outcome: Result<TemporaryCredential>,
) -> Resolver<RecordingVault, RecordingIdentity> {
    Resolver::new(
        RecordingVault {
            log: Arc::clone(log),
        },
        RecordingIdentity::returning(log, outcome),
        ResolverConfig::new(dir.path(), IssuerConfig::default()),
    )
}

fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[test]
fn cache_hit_skips_vault_and_identity_service() {
    let dir = TempDir::new().unwrap();
    let log = CallLog::default();
    let request = IssuanceRequest::new("test-vault", "test-item");
    let cached = credential("ASIACACHED", Duration::hours(1));

    CredentialCache::new(dir.path())
        .store(&CacheFingerprint::new(&request), &cached)
        .unwrap();

    let resolver = resolver(&dir, &log, Ok(credential("ASIANEW", Duration::hours(1))));
    let resolved = resolver.resolve(&request, false).unwrap();

    assert_eq!(resolved, cached);
    assert!(calls(&log).is_empty());
}

#[test]
fn miss_issues_and_stores() {
    let dir = TempDir::new().unwrap();
    let log = CallLog::default();
    let request = IssuanceRequest::new("test-vault", "test-item")
        .with_mfa_serial("test-mfa")
        .with_role_arn("test-assume-role");
    let issued = credential("ASIANEW", Duration::hours(1));

    let resolver = resolver(&dir, &log, Ok(issued.clone()));
    assert_eq!(resolver.resolve(&request, false).unwrap(), issued);

    assert_eq!(
        calls(&log),
        vec![
            "vault:aws_access_key_id",
            "vault:aws_secret_access_key",
            "vault:otp",
            "sts:assume-role",
        ]
    );
    assert!(dir.path().join("41f9ea0d0f7c3b470458d338de7ee037").is_file());
}

#[test]
fn expired_entry_is_replaced() {
    let dir = TempDir::new().unwrap();
    let log = CallLog::default();
    let request = IssuanceRequest::new("test-vault", "test-item");
    let fingerprint = CacheFingerprint::new(&request);
    let cache = CredentialCache::new(dir.path());

    cache
        .store(&fingerprint, &credential("ASIAOLD", Duration::hours(-1)))
        .unwrap();

    let issued = credential("ASIANEW", Duration::hours(1));
    let resolver = resolver(&dir, &log, Ok(issued.clone()));

    assert_eq!(resolver.resolve(&request, false).unwrap(), issued);
    assert_eq!(cache.lookup(&fingerprint).unwrap(), Some(issued));
}

#[test]
fn forced_refresh_calls_identity_service_once_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let log = CallLog::default();
    let request = IssuanceRequest::new("test-vault", "test-item");
    let fingerprint = CacheFingerprint::new(&request);
    let cache = CredentialCache::new(dir.path());

    cache
        .store(&fingerprint, &credential("ASIAOLD", Duration::hours(1)))
        .unwrap();

    let fresh = credential("ASIAFRESH", Duration::hours(1));
    let resolver = resolver(&dir, &log, Ok(fresh.clone()));

    assert_eq!(resolver.resolve(&request, true).unwrap(), fresh);

    let identity_calls = calls(&log)
        .into_iter()
        .filter(|call| call.starts_with("sts:"))
        .count();
    assert_eq!(identity_calls, 1);
    assert_eq!(cache.lookup(&fingerprint).unwrap(), Some(fresh));
}

#[test]
fn issuance_error_is_not_masked_by_cached_entry() {
    let dir = TempDir::new().unwrap();
    let log = CallLog::default();
    let request = IssuanceRequest::new("test-vault", "test-item");
    let fingerprint = CacheFingerprint::new(&request);
    let cache = CredentialCache::new(dir.path());
    let cached = credential("ASIAOLD", Duration::hours(1));

    cache.store(&fingerprint, &cached).unwrap();

    let resolver = resolver(
        &dir,
        &log,
        Err(Error::issuance_failed("GetSessionToken", "ExpiredToken")),
    );
    let err = resolver.resolve(&request, true).unwrap_err();

    assert!(err.is_issuance_failed());
    // The old entry is left alone
    assert_eq!(cache.lookup(&fingerprint).unwrap(), Some(cached));
}
