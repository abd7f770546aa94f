//! Unified sandgate CLI.
//!
//! This binary provides a unified interface to all sandgate components:
//! - `sandgate server` - Run the HTTP server
//! - `sandgate users` - Inspect provisioned users (SQL backend)
//!
//! Each subcommand can also be run as a standalone binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Sandgate unified CLI.
#[derive(Parser)]
#[command(
    name = "sandgate",
    version,
    about = "Trusted-header authentication for a web file manager",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    #[command(name = "server", alias = "serve")]
    Server(Box<sandgate_server::ServerArgs>),

    /// Inspect provisioned users (SQL backend).
    #[command(name = "users")]
    Users(sandgate_auth::UsersArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Server(args) => sandgate_server::cli::run(*args).await,
        Commands::Users(args) => sandgate_auth::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
