//! Credential issuance for op2aws
//!
//! [`CredentialIssuer`] reads the long-lived access key pair (and, when
//! requested, an OTP) from a [`SecretVault`](op2aws_vault::SecretVault) and
//! exchanges it with an [`IdentityService`] for a temporary credential.
//! Without a role the session-token flow runs, with a role the assume-role
//! flow. [`StsIdentityService`] is the AWS STS implementation.

pub mod config;
pub mod identity;
pub mod issuer;
pub mod sts;

pub use config::IssuerConfig;
pub use identity::{AssumeRoleRequest, IdentityService, MfaToken, SessionTokenRequest};
pub use issuer::CredentialIssuer;
pub use sts::StsIdentityService;
