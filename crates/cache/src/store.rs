//! File-backed credential store

use crate::fingerprint::CacheFingerprint;
use chrono::{DateTime, Utc};
use op2aws_core::{Error, Result, TemporaryCredential};
use op2aws_utils::atomic_file::write_atomic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
const FILE_MODE: u32 = 0o600;

/// One JSON file per fingerprint under `dir`
#[derive(Debug, Clone)]
pub struct CredentialCache {
    dir: PathBuf,
}

impl CredentialCache {
    /// The directory is created lazily by the first [`store`](Self::store)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entry_path(&self, fingerprint: &CacheFingerprint) -> PathBuf {
        self.dir.join(fingerprint.to_hex())
    }

    /// Return the cached credential if one exists and is still valid.
    ///
    /// An absent entry is `Ok(None)`. An expired entry is deleted and also
    /// reported as `Ok(None)`. Anything unreadable is a `CacheIo` error.
    pub fn lookup(&self, fingerprint: &CacheFingerprint) -> Result<Option<TemporaryCredential>> {
        self.lookup_at(fingerprint, Utc::now())
    }

    pub(crate) fn lookup_at(
        &self,
        fingerprint: &CacheFingerprint,
        now: DateTime<Utc>,
    ) -> Result<Option<TemporaryCredential>> {
        let path = self.entry_path(fingerprint);

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%fingerprint, "no cached credential");
                return Ok(None);
            }
            Err(e) => return Err(Error::cache_io_with_source(&path, "read", e)),
        };

        let credential: TemporaryCredential = serde_json::from_slice(&data)
            .map_err(|e| Error::cache_io_with_source(&path, "decode", e))?;

        if credential.is_expired_at(now) {
            tracing::debug!(
                %fingerprint,
                expiration = %credential.expiration(),
                "cached credential expired, evicting"
            );
            self.delete(&path)?;
            return Ok(None);
        }

        tracing::debug!(
            %fingerprint,
            expiration = %credential.expiration(),
            "using cached credential"
        );
        Ok(Some(credential))
    }

    /// Write `credential` under `fingerprint`, replacing any previous entry
    pub fn store(&self, fingerprint: &CacheFingerprint, credential: &TemporaryCredential) -> Result<()> {
        self.ensure_dir()?;

        let path = self.entry_path(fingerprint);
        let data = serde_json::to_vec(credential)
            .map_err(|e| Error::cache_io_with_source(&path, "encode", e))?;

        write_atomic(&path, &data, FILE_MODE)
            .map_err(|e| Error::cache_io_with_source(&path, "write", e))?;

        tracing::debug!(
            %fingerprint,
            expiration = %credential.expiration(),
            "stored credential"
        );
        Ok(())
    }

    /// Delete the entry for `fingerprint`. Returns whether one existed.
    pub fn remove(&self, fingerprint: &CacheFingerprint) -> Result<bool> {
        self.delete(&self.entry_path(fingerprint))
    }

    fn delete(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            // Another process got there first
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::cache_io_with_source(path, "delete", e)),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }

        builder
            .create(&self.dir)
            .map_err(|e| Error::cache_io_with_source(&self.dir, "create directory", e))
    }
}
