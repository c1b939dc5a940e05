use clap::Parser;

mod commands;
mod output;
mod profile;

use commands::Commands;

#[derive(Parser)]
#[command(name = "op2aws")]
#[command(about = "Temporary AWS credentials from keys stored in 1Password", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // stdout belongs to credential_process, so a broken logger must not abort
    if let Err(e) = op2aws_utils::tracing::init() {
        eprintln!("op2aws: failed to initialize logging: {e}");
    }

    let cli = Cli::parse();
    cli.command.execute()
}
