use super::CredentialArgs;
use crate::output;
use eyre::eyre;
use op2aws_core::IssuanceRequest;
use op2aws_issuer::IssuerConfig;
use op2aws_resolver::{CacheFingerprint, Resolver, ResolverConfig, StsIdentityService};
use op2aws_vault::OnePasswordVault;

impl CredentialArgs {
    pub fn issuance_request(&self) -> IssuanceRequest {
        IssuanceRequest::new(&self.vault, &self.item)
            .with_mfa_serial(self.mfa.clone().unwrap_or_default())
            .with_role_arn(self.assume_role.clone().unwrap_or_default())
    }

    pub fn issuer_config(&self) -> IssuerConfig {
        IssuerConfig::default().with_fields(&self.access_key_label, &self.secret_access_key_label)
    }
}

pub fn execute(args: &CredentialArgs, force: bool, export: bool) -> eyre::Result<()> {
    let vault = OnePasswordVault::from_env();
    let bin = vault.bin().to_string();
    let config = ResolverConfig::from_env(args.issuer_config());
    tracing::debug!(cache_dir = %config.cache_dir.display(), "resolved configuration");

    let resolver = Resolver::new(vault, StsIdentityService::new(), config);
    if !resolver.vault_available() {
        return Err(eyre!(
            "the 1Password CLI ('{bin}') is not available; install it and sign in with `op signin`"
        ));
    }

    let request = args.issuance_request();
    if force {
        let fingerprint = CacheFingerprint::new(&request);
        tracing::info!(
            entry = %resolver.cache().entry_path(&fingerprint).display(),
            "ignoring cached credential"
        );
    }

    let credential = resolver.resolve(&request, force)?;

    if export {
        print!("{}", output::render_exports(&credential));
    } else {
        println!("{}", output::render_credential_process(&credential)?);
    }
    Ok(())
}
