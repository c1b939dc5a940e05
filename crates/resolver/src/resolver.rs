use crate::config::ResolverConfig;
use op2aws_cache::{CacheFingerprint, CredentialCache};
use op2aws_core::{IssuanceRequest, Result, TemporaryCredential};
use op2aws_issuer::{CredentialIssuer, IdentityService};
use op2aws_vault::SecretVault;

/// Cache-first credential resolution
pub struct Resolver<V, S> {
    issuer: CredentialIssuer<V, S>,
    cache: CredentialCache,
}

impl<V: SecretVault, S: IdentityService> Resolver<V, S> {
    pub fn new(vault: V, identity: S, config: ResolverConfig) -> Self {
        Self::from_parts(
            CredentialIssuer::new(vault, identity, config.issuer),
            CredentialCache::new(config.cache_dir),
        )
    }

    pub fn from_parts(issuer: CredentialIssuer<V, S>, cache: CredentialCache) -> Self {
        Self { issuer, cache }
    }

    pub fn cache(&self) -> &CredentialCache {
        &self.cache
    }

    /// Whether the vault backend answers at all
    pub fn vault_available(&self) -> bool {
        self.issuer.vault().available()
    }

    /// Return a valid credential for `request`.
    ///
    /// Unless `force_refresh` is set a valid cached entry is returned without
    /// contacting the vault or the identity service. Otherwise a new
    /// credential is issued and replaces the cache entry. Issuance errors are
    /// returned as-is even when a cached entry exists.
    pub fn resolve(
        &self,
        request: &IssuanceRequest,
        force_refresh: bool,
    ) -> Result<TemporaryCredential> {
        let fingerprint = CacheFingerprint::new(request);

        if force_refresh {
            tracing::debug!(%fingerprint, "forced refresh, skipping cache");
        } else if let Some(credential) = self.cache.lookup(&fingerprint)? {
            return Ok(credential);
        }

        let credential = self.issuer.issue(request)?;
        self.cache.store(&fingerprint, &credential)?;
        Ok(credential)
    }
}
