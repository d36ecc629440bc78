//! Command line interface
//!
//! - `serve`: run the HTTP server
//! - `issue`: sign a link token offline
//! - `verify`: check a token against the configured secret
//! - `gen-secret`: print a fresh random secret

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Signed upload links for creator vaults
#[derive(Parser)]
#[command(name = "vault-upload-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Issue an upload token without the server
    Issue(token::IssueArgs),

    /// Verify an upload token
    Verify(token::VerifyArgs),

    /// Generate a random secret for UPLOAD_LINK_SECRET
    GenSecret(token::GenSecretArgs),
}
