use super::CredentialArgs;
use crate::profile::{aws_config_path, write_profile, ProfileEntry};

pub fn execute(name: &str, args: &CredentialArgs, write: bool) -> eyre::Result<()> {
    let body = ProfileEntry {
        name,
        vault: &args.vault,
        item: &args.item,
        assume_role: args.assume_role.as_deref().unwrap_or_default(),
        mfa: args.mfa.as_deref().unwrap_or_default(),
        access_key_label: &args.access_key_label,
        secret_access_key_label: &args.secret_access_key_label,
    }
    .render();

    if !write {
        println!("{}", body.trim_start());
        return Ok(());
    }

    let path = aws_config_path();
    write_profile(&path, &body)?;
    println!("Profile '{name}' written to {}", path.display());
    Ok(())
}
