use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use envcrypt::cli::{
    handle_add_command, handle_config_command, handle_encrypt_command, handle_keygen_command,
    handle_log_command, handle_reveal_command, handle_status_command, AddArgs, ConfigArgs,
    EncryptArgs, KeygenArgs, LogArgs, RevealArgs, StatusArgs,
};
use envcrypt::config::{EnvcryptPaths, Settings};

#[derive(Parser)]
#[command(
    name = "envcrypt",
    author = "Kaylee Beyene",
    version,
    about = "Selectively encrypt values inside .env files",
    long_about = "envcrypt encrypts chosen values of a NAME=VALUE env file in place, \
                  leaving every other entry readable. Values that are already \
                  encrypted are never encrypted twice."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt existing values by name
    Encrypt(EncryptArgs),

    /// Add or update values, storing them encrypted
    Add(AddArgs),

    /// Print decrypted values
    Reveal(RevealArgs),

    /// Show which values are encrypted
    Status(StatusArgs),

    /// Generate a new key file
    Keygen(KeygenArgs),

    /// Show recent audit log entries
    Log(LogArgs),

    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = EnvcryptPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let success = match cli.command {
        Commands::Encrypt(args) => handle_encrypt_command(&paths, &settings, args)?,
        Commands::Add(args) => handle_add_command(&paths, &settings, args)?,
        Commands::Reveal(args) => {
            handle_reveal_command(args)?;
            true
        }
        Commands::Status(args) => {
            handle_status_command(args)?;
            true
        }
        Commands::Keygen(args) => {
            handle_keygen_command(&paths, &settings, args)?;
            true
        }
        Commands::Log(args) => {
            handle_log_command(&paths, args)?;
            true
        }
        Commands::Config(args) => {
            handle_config_command(&paths, &settings, args)?;
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
