//! Command-line interface for the HR server.

use clap::{Parser, Subcommand};

/// HRMS - human resources API server
#[derive(Parser)]
#[command(name = "hrms")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the API server until Ctrl+C (default)
    #[command(alias = "-s", alias = "--serve")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Connect to the database, apply migrations and exit
    #[command(alias = "-c", alias = "--check")]
    Check,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::parse_from(["hrms"]);
        assert_eq!(cli.command(), Commands::Serve);
    }

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(Cli::parse_from(["hrms", "init"]).command(), Commands::Init);
        assert_eq!(Cli::parse_from(["hrms", "check"]).command(), Commands::Check);
    }
}
