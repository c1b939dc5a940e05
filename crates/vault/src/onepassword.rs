//! 1Password backend driven through the `op` CLI

use crate::command_executor::{CommandExecutor, SystemCommandExecutor};
use crate::SecretVault;
use op2aws_core::{
    CommandArguments, Error, Result, SecretReference, OP2AWS_OP_BIN_VAR, OP_DEFAULT_BIN,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Anything listed by the discovery commands that has a display name
pub trait Named {
    fn name(&self) -> &str;
}

/// A vault as returned by `op vault list`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VaultSummary {
    pub id: String,
    pub name: String,
}

/// An item as returned by `op item list`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
}

/// A field of an item as returned by `op item get --format json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub reference: String,
}

#[derive(Deserialize)]
struct ItemDetails {
    #[serde(default)]
    fields: Vec<ItemField>,
}

impl Named for VaultSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ItemSummary {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Named for ItemField {
    fn name(&self) -> &str {
        &self.label
    }
}

/// [`SecretVault`] backed by the 1Password CLI
pub struct OnePasswordVault<E = SystemCommandExecutor> {
    executor: E,
    bin: String,
}

impl OnePasswordVault<SystemCommandExecutor> {
    /// Use the `op` binary found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self::with_executor(SystemCommandExecutor, OP_DEFAULT_BIN)
    }

    /// Use the binary named by `OP2AWS_OP_BIN`, falling back to `op`
    #[must_use]
    pub fn from_env() -> Self {
        let bin = std::env::var(OP2AWS_OP_BIN_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| OP_DEFAULT_BIN.to_string());
        Self::with_executor(SystemCommandExecutor, bin)
    }
}

impl Default for OnePasswordVault<SystemCommandExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> OnePasswordVault<E> {
    pub fn with_executor(executor: E, bin: impl Into<String>) -> Self {
        Self {
            executor,
            bin: bin.into(),
        }
    }

    #[must_use]
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Run `op` and return its trimmed stdout, failing on a non-zero exit
    fn run(&self, args: CommandArguments) -> Result<String> {
        let output = self.executor.execute(&self.bin, &args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::command_execution(
                &self.bin,
                args.into_inner(),
                stderr.trim().to_string(),
                output.status.code(),
            ));
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| Error::configuration(format!("{} output is not valid UTF-8: {e}", self.bin)))
    }

    fn run_json<T: DeserializeOwned>(&self, args: CommandArguments, what: &str) -> Result<T> {
        let output = self.run(args)?;
        serde_json::from_str(&output)
            .map_err(|e| Error::json(format!("failed to decode {what} from {}", self.bin), e))
    }

    /// All vaults the signed-in account can see
    pub fn list_vaults(&self) -> Result<Vec<VaultSummary>> {
        let args = CommandArguments::new()
            .arg("vault")
            .arg("list")
            .arg("--format")
            .arg("json");
        self.run_json(args, "vault list")
    }

    /// All items of one vault
    pub fn list_items(&self, vault_id: &str) -> Result<Vec<ItemSummary>> {
        let args = CommandArguments::new()
            .arg("item")
            .arg("list")
            .arg("--vault")
            .arg(vault_id)
            .arg("--format")
            .arg("json");
        self.run_json(args, "item list")
    }

    /// The fields of one item, in the order 1Password reports them
    pub fn list_fields(&self, vault_id: &str, item_id: &str) -> Result<Vec<ItemField>> {
        let args = CommandArguments::new()
            .arg("item")
            .arg("get")
            .arg(item_id)
            .arg("--vault")
            .arg(vault_id)
            .arg("--format")
            .arg("json");
        let details: ItemDetails = self.run_json(args, "item details")?;
        Ok(details.fields)
    }
}

impl<E: CommandExecutor> SecretVault for OnePasswordVault<E> {
    fn fetch_secret(&self, reference: &SecretReference) -> Result<String> {
        let reference_str = reference.to_string();
        tracing::debug!(reference = %reference_str, "reading secret from 1Password");

        let args = CommandArguments::new().arg("read").arg(&reference_str);
        let value = self
            .run(args)
            .map_err(|e| Error::secret_unavailable(&reference_str, e.to_string()))?;

        if value.is_empty() {
            return Err(Error::secret_unavailable(
                reference_str,
                "the field is empty",
            ));
        }
        Ok(value)
    }

    fn fetch_otp(&self, vault_id: &str, item_id: &str) -> Result<String> {
        let reference = format!("op://{vault_id}/{item_id} (one-time password)");
        tracing::debug!(reference = %reference, "reading OTP from 1Password");

        let args = CommandArguments::new()
            .arg("item")
            .arg("get")
            .arg(item_id)
            .arg("--vault")
            .arg(vault_id)
            .arg("--otp");
        let otp = self
            .run(args)
            .map_err(|e| Error::secret_unavailable(&reference, e.to_string()))?;

        if otp.is_empty() {
            return Err(Error::secret_unavailable(reference, "no one-time password"));
        }
        Ok(otp)
    }

    fn available(&self) -> bool {
        let args = CommandArguments::new().arg("--version");
        match self.executor.execute(&self.bin, &args) {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::debug!(error = %e, "1Password CLI is not available");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_executor::TestCommandExecutor;
    use serial_test::serial;

    fn vault(executor: TestCommandExecutor) -> OnePasswordVault<TestCommandExecutor> {
        OnePasswordVault::with_executor(executor, "op")
    }

    #[test]
    fn test_fetch_secret_reads_op_reference() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response(
            "op",
            &["read", "op://Private/AWS/aws_access_key_id"],
            "AKIAEXAMPLE\n",
        );
        let vault = vault(executor);

        let reference = SecretReference::new("Private", "AWS", "aws_access_key_id");
        assert_eq!(vault.fetch_secret(&reference).unwrap(), "AKIAEXAMPLE");
    }

    #[test]
    fn test_fetch_secret_failure_is_secret_unavailable() {
        let executor = TestCommandExecutor::new();
        executor.add_error_response(
            "op",
            &["read", "op://Private/AWS/missing"],
            "[ERROR] could not read secret: field not found\n",
        );
        let vault = vault(executor);

        let err = vault
            .fetch_secret(&SecretReference::new("Private", "AWS", "missing"))
            .unwrap_err();
        match err {
            Error::SecretUnavailable { reference, message } => {
                assert_eq!(reference, "op://Private/AWS/missing");
                assert!(message.contains("field not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fetch_secret_rejects_empty_value() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response("op", &["read", "op://v/i/f"], "  \n");
        let vault = vault(executor);

        let err = vault
            .fetch_secret(&SecretReference::new("v", "i", "f"))
            .unwrap_err();
        assert!(err.is_secret_unavailable());
    }

    #[test]
    fn test_fetch_otp_command_line() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response(
            "op",
            &["item", "get", "AWS prod", "--vault", "Private", "--otp"],
            "123456\n",
        );
        let vault = vault(executor);

        assert_eq!(vault.fetch_otp("Private", "AWS prod").unwrap(), "123456");
    }

    #[test]
    fn test_fetch_otp_without_response_is_secret_unavailable() {
        let vault = vault(TestCommandExecutor::new());
        assert!(vault
            .fetch_otp("Private", "AWS")
            .unwrap_err()
            .is_secret_unavailable());
    }

    #[test]
    fn test_available() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response("op", &["--version"], "2.30.0\n");
        assert!(vault(executor).available());

        let executor = TestCommandExecutor::new();
        executor.add_error_response("op", &["--version"], "broken");
        assert!(!vault(executor).available());

        assert!(!vault(TestCommandExecutor::new()).available());
    }

    #[test]
    fn test_list_vaults() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response(
            "op",
            &["vault", "list", "--format", "json"],
            r#"[{"id":"abc","name":"Private","content_version":4},{"id":"def","name":"Shared"}]"#,
        );
        let vaults = vault(executor).list_vaults().unwrap();
        let names: Vec<&str> = vaults.iter().map(Named::name).collect();
        assert_eq!(names, vec!["Private", "Shared"]);
    }

    #[test]
    fn test_list_items() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response(
            "op",
            &["item", "list", "--vault", "Private", "--format", "json"],
            r#"[{"id":"1","title":"AWS prod","category":"LOGIN","vault":{"id":"abc","name":"Private"}}]"#,
        );
        let items = vault(executor).list_items("Private").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "AWS prod");
        assert_eq!(items[0].category, "LOGIN");
    }

    #[test]
    fn test_list_fields() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response(
            "op",
            &["item", "get", "AWS prod", "--vault", "Private", "--format", "json"],
            r#"{"id":"1","fields":[
                {"id":"a","section":{"id":"s"},"type":"STRING","label":"aws_access_key_id","reference":"op://Private/AWS prod/aws_access_key_id"},
                {"id":"b","type":"CONCEALED","label":"aws_secret_access_key","reference":"op://Private/AWS prod/aws_secret_access_key"}
            ]}"#,
        );
        let fields = vault(executor).list_fields("Private", "AWS prod").unwrap();
        let labels: Vec<&str> = fields.iter().map(Named::name).collect();
        assert_eq!(labels, vec!["aws_access_key_id", "aws_secret_access_key"]);
        assert_eq!(fields[1].field_type, "CONCEALED");
    }

    #[test]
    fn test_list_vaults_bad_json() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response("op", &["vault", "list", "--format", "json"], "not json");
        let err = vault(executor).list_vaults().unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides_binary() {
        let original = std::env::var(OP2AWS_OP_BIN_VAR).ok();

        std::env::set_var(OP2AWS_OP_BIN_VAR, "/opt/1password/op");
        assert_eq!(OnePasswordVault::from_env().bin(), "/opt/1password/op");

        std::env::set_var(OP2AWS_OP_BIN_VAR, "  ");
        assert_eq!(OnePasswordVault::from_env().bin(), "op");

        match original {
            Some(value) => std::env::set_var(OP2AWS_OP_BIN_VAR, value),
            None => std::env::remove_var(OP2AWS_OP_BIN_VAR),
        }
    }
}
