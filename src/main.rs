use std::process::ExitCode;

use clap::Parser;
use vault_upload_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await.map(|_| ExitCode::SUCCESS),
        Command::Issue(args) => cli::token::issue(args),
        Command::Verify(args) => cli::token::verify(args),
        Command::GenSecret(args) => cli::token::gen_secret(args),
    }
}
