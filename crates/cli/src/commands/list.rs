use clap::Subcommand;
use op2aws_vault::{Named, OnePasswordVault};

#[derive(Subcommand)]
pub enum ListCommands {
    /// Vaults of the signed-in account
    Vaults,
    /// Items of a vault
    Items {
        vault: String,
    },
    /// Field labels of an item
    Fields {
        vault: String,
        item: String,
    },
}

impl ListCommands {
    pub fn execute(self) -> eyre::Result<()> {
        let vault = OnePasswordVault::from_env();
        match self {
            ListCommands::Vaults => print_names(&vault.list_vaults()?),
            ListCommands::Items { vault: vault_id } => print_names(&vault.list_items(&vault_id)?),
            ListCommands::Fields {
                vault: vault_id,
                item,
            } => print_names(&vault.list_fields(&vault_id, &item)?),
        }
        Ok(())
    }
}

fn print_names<T: Named>(entries: &[T]) {
    for entry in entries {
        println!("{}", entry.name());
    }
}
