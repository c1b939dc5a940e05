use op2aws_core::OP2AWS_CACHE_DIR_VAR;
use op2aws_issuer::IssuerConfig;
use op2aws_utils::XdgPaths;
use std::path::PathBuf;

/// Everything one resolution needs to know, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub cache_dir: PathBuf,
    pub issuer: IssuerConfig,
}

impl ResolverConfig {
    pub fn new(cache_dir: impl Into<PathBuf>, issuer: IssuerConfig) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            issuer,
        }
    }

    /// Cache directory from `OP2AWS_CACHE_DIR`, else `$XDG_CACHE_HOME/op2aws`
    pub fn from_env(issuer: IssuerConfig) -> Self {
        let cache_dir = std::env::var_os(OP2AWS_CACHE_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(XdgPaths::cache_dir);
        Self::new(cache_dir, issuer)
    }
}
