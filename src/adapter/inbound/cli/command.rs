//! Command-line interface definitions.
//!
//! Defines the CLI for the cryptodip binary using `clap`.

use clap::Parser;
use std::path::PathBuf;

/// Buy a cryptocurrency whenever its price dips below its trailing average.
#[derive(Parser, Debug)]
#[command(name = "cryptodip")]
#[command(version, about)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: PathBuf,

    /// Trade against the exchange's sandbox environment
    #[arg(short = 'd', long, visible_alias = "debug")]
    pub sandbox: bool,

    /// Override the configured log level (e.g. debug, cryptodip=trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Override the configured SQLite database path
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::try_parse_from(["cryptodip", "-c", "bot.toml", "-d"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("bot.toml"));
        assert!(cli.sandbox);
        assert!(!cli.check);
    }

    #[test]
    fn debug_is_an_alias_for_sandbox() {
        let cli = Cli::try_parse_from(["cryptodip", "--config", "bot.toml", "--debug"]).unwrap();
        assert!(cli.sandbox);
    }

    #[test]
    fn config_is_required() {
        assert!(Cli::try_parse_from(["cryptodip"]).is_err());
    }
}
