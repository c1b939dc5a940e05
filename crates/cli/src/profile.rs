//! `~/.aws/config` profile entries that call back into `op2aws cli`

use op2aws_core::{
    Error, Result, AWS_ACCESS_KEY_FIELD_DEFAULT, AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT, COMMAND_CLI,
    COMMAND_ROOT, OP2AWS_AWS_CONFIG_VAR,
};
use op2aws_utils::XdgPaths;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inputs of one rendered profile. Empty strings mean "not set".
#[derive(Debug, Clone, Copy)]
pub struct ProfileEntry<'a> {
    pub name: &'a str,
    pub vault: &'a str,
    pub item: &'a str,
    pub assume_role: &'a str,
    pub mfa: &'a str,
    pub access_key_label: &'a str,
    pub secret_access_key_label: &'a str,
}

impl ProfileEntry<'_> {
    /// Render the entry, including the two leading newlines that separate
    /// it from whatever precedes it in the config file
    pub fn render(&self) -> String {
        let mut options = Vec::new();
        if !self.assume_role.is_empty() {
            options.push(format!("\"-a\" \"{}\"", self.assume_role));
        }
        if !self.mfa.is_empty() {
            options.push(format!("\"-m\" \"{}\"", self.mfa));
        }
        if is_override(self.access_key_label, AWS_ACCESS_KEY_FIELD_DEFAULT) {
            options.push(format!("\"-k\" \"{}\"", self.access_key_label));
        }
        if is_override(self.secret_access_key_label, AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT) {
            options.push(format!("\"-s\" \"{}\"", self.secret_access_key_label));
        }

        let mut options = options.join(" ");
        if !options.is_empty() {
            options.insert(0, ' ');
        }

        format!(
            "\n\n[profile {}]\n    credential_process = sh -c '\"{COMMAND_ROOT}\" \"{COMMAND_CLI}\" \"{}\" \"{}\"{options}'",
            self.name, self.vault, self.item,
        )
    }
}

fn is_override(label: &str, default: &str) -> bool {
    !label.is_empty() && label != default
}

/// `OP2AWS_AWS_CONFIG`, else `~/.aws/config`
pub fn aws_config_path() -> PathBuf {
    std::env::var_os(OP2AWS_AWS_CONFIG_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(XdgPaths::aws_config_file)
}

/// Append `body` to the config file at `path`, creating the file if needed
pub fn write_profile(path: &Path, body: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::file_system(path, "open AWS config", e))?;

    file.write_all(body.as_bytes())
        .map_err(|e| Error::file_system(path, "append profile", e))?;

    tracing::debug!(path = %path.display(), "profile written");
    Ok(())
}
