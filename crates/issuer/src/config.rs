use op2aws_core::{
    AWS_ACCESS_KEY_FIELD_DEFAULT, AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT, DEFAULT_SESSION_NAME,
};

/// Which vault fields hold the key pair, and how assumed-role sessions are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    pub access_key_field: String,
    pub secret_access_key_field: String,
    pub session_name: String,
}

impl IssuerConfig {
    /// Override the field labels; empty values keep the defaults
    #[must_use]
    pub fn with_fields(
        mut self,
        access_key_field: impl Into<String>,
        secret_access_key_field: impl Into<String>,
    ) -> Self {
        let access_key_field = access_key_field.into();
        let secret_access_key_field = secret_access_key_field.into();
        if !access_key_field.is_empty() {
            self.access_key_field = access_key_field;
        }
        if !secret_access_key_field.is_empty() {
            self.secret_access_key_field = secret_access_key_field;
        }
        self
    }
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            access_key_field: AWS_ACCESS_KEY_FIELD_DEFAULT.to_string(),
            secret_access_key_field: AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT.to_string(),
            session_name: DEFAULT_SESSION_NAME.to_string(),
        }
    }
}
