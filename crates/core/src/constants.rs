/// Constants used throughout the op2aws codebase
// Binary and subcommand used in generated credential_process entries
pub const COMMAND_ROOT: &str = "op2aws";
pub const COMMAND_CLI: &str = "cli";

// 1Password defaults
pub const OP_DEFAULT_BIN: &str = "op";
pub const OP_REFERENCE_PREFIX: &str = "op://";
pub const AWS_ACCESS_KEY_FIELD_DEFAULT: &str = "aws_access_key_id";
pub const AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT: &str = "aws_secret_access_key";

// STS
pub const DEFAULT_SESSION_NAME: &str = "op2aws-session";
pub const DEFAULT_STS_REGION: &str = "us-east-1";

// credential_process output schema version
pub const CREDENTIAL_PROCESS_VERSION: u8 = 1;

// Environment variable names
pub const OP2AWS_CACHE_DIR_VAR: &str = "OP2AWS_CACHE_DIR";
pub const OP2AWS_OP_BIN_VAR: &str = "OP2AWS_OP_BIN";
pub const OP2AWS_LOG_VAR: &str = "OP2AWS_LOG";
pub const OP2AWS_AWS_CONFIG_VAR: &str = "OP2AWS_AWS_CONFIG";
