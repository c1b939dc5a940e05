use clap::Subcommand;
use op2aws_core::{AWS_ACCESS_KEY_FIELD_DEFAULT, AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT};

pub mod cli;
pub mod list;
pub mod profile;

use self::list::ListCommands;

/// Options shared by every command that selects an issuance flow
#[derive(clap::Args, Debug, Clone)]
pub struct CredentialArgs {
    /// 1Password vault holding the AWS keys
    pub vault: String,

    /// 1Password item holding the AWS keys
    pub item: String,

    /// ARN of the MFA device; the OTP is read from the same item
    #[arg(short = 'm', long = "mfa", value_name = "ARN")]
    pub mfa: Option<String>,

    /// ARN of a role to assume instead of using the item's own identity
    #[arg(short = 'a', long = "assume-role", value_name = "ARN")]
    pub assume_role: Option<String>,

    /// Label of the 1Password field holding AWS_ACCESS_KEY_ID
    #[arg(
        short = 'k',
        long = "label-accesskey",
        value_name = "LABEL",
        default_value = AWS_ACCESS_KEY_FIELD_DEFAULT
    )]
    pub access_key_label: String,

    /// Label of the 1Password field holding AWS_SECRET_ACCESS_KEY
    #[arg(
        short = 's',
        long = "label-secret-accesskey",
        value_name = "LABEL",
        default_value = AWS_SECRET_ACCESS_KEY_FIELD_DEFAULT
    )]
    pub secret_access_key_label: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print temporary credentials, for use as credential_process
    Cli {
        #[command(flatten)]
        credentials: CredentialArgs,

        /// Ignore the cache and issue new credentials
        #[arg(short, long)]
        force: bool,

        /// Print shell export statements instead of JSON
        #[arg(short, long)]
        export: bool,
    },

    /// Render an ~/.aws/config profile that calls `op2aws cli`
    Profile {
        /// Name of the AWS profile
        name: String,

        #[command(flatten)]
        credentials: CredentialArgs,

        /// Append the profile to the AWS config file instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// List vaults, items or fields visible to the 1Password CLI
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

impl Commands {
    pub fn execute(self) -> eyre::Result<()> {
        match self {
            Commands::Cli {
                credentials,
                force,
                export,
            } => cli::execute(&credentials, force, export),
            Commands::Profile {
                name,
                credentials,
                write,
            } => profile::execute(&name, &credentials, write),
            Commands::List { command } => command.execute(),
        }
    }
}
