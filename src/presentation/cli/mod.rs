pub mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::presentation::cli::commands::clone::CloneCommand;

/// Version string shown by `--version`
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

/// manyrepo - Clone the repositories listed in a manifest
#[derive(Parser, Debug)]
#[command(name = "manyrepo")]
#[command(about = "Clone the repositories listed in a manifest")]
#[command(version = VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone every repository listed in the manifest
    Clone {
        /// Manifest file (defaults to manyrepo.yml in the working directory)
        #[arg(short, long, env = "MANYREPO_MANIFEST")]
        manifest: Option<PathBuf>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    /// Build the runner from already parsed arguments
    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), error_report(&e));
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Clone { manifest } => {
                CloneCommand::new(manifest.clone(), self.cli.verbose)
                    .execute()
                    .await?;
                Ok(())
            }
        }
    }
}

/// The error followed by its whole source chain
pub fn error_report(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}
