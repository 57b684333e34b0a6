//! Command-line interface.

pub mod completions;
pub mod output;
pub mod prompt;
pub mod pull;
pub mod push;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// Envault - .env files in your password manager's vault.
#[derive(Parser)]
#[command(
    name = "envault",
    about = "Push .env files into a password-manager vault, pull them back",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Push a .env file into a vault item and write a reference template
    Push {
        /// Path to the .env file
        env_file: PathBuf,
        /// Vault name (created on confirmation if missing)
        vault: String,
        /// Item title within the vault
        item_name: String,
        /// Template output path (default: <env_file>.tpl)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print intended actions without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Store fields as concealed (masked) values
        #[arg(long)]
        secret: bool,
        /// Skip confirmation prompts
        #[arg(short, long)]
        force: bool,
    },

    /// Pull current values through a template into a .env file
    Pull {
        /// Path to the .tpl template file
        template_file: PathBuf,
        /// Env output path (default: template path without .tpl)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print intended actions without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Overwrite an existing output file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Execute the parsed command.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Push {
            env_file,
            vault,
            item_name,
            output,
            dry_run,
            secret,
            force,
        } => push::execute(&env_file, &vault, &item_name, output, dry_run, secret, force),
        Command::Pull {
            template_file,
            output,
            dry_run,
            force,
        } => pull::execute(&template_file, output, dry_run, force),
        Command::Completions { shell } => {
            completions::execute(shell);
            Ok(())
        }
    }
}
