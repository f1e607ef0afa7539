use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::pipeline::ReportTable;

/// Starschema - Build a box office star schema from sales records
#[derive(Parser, Debug)]
#[command(name = "starschema")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Storage backend
    #[arg(long, short, global = true, value_enum, default_value_t = Backend::Sqlite)]
    pub backend: Backend,

    /// SQLite database path (`:memory:` for a throwaway database)
    #[arg(long, global = true, env = "SQLITE_PATH")]
    pub database: Option<String>,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build, load and print every table plus the sales report
    Run(SourceArgs),
    /// Build and load, then print row counts
    Load(SourceArgs),
    /// Print a persisted table
    Report {
        #[arg(value_enum)]
        table: ReportTable,
    },
    /// Build the star schema and print it without persisting
    Build(SourceArgs),
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// JSON source file (defaults to the built-in sample data)
    #[arg(long, short, env = "STARSCHEMA_SOURCE")]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database at `--database` / `SQLITE_PATH`
    Sqlite,
    /// Process-local tables, discarded on exit
    Memory,
}

impl Commands {
    /// Source file given to the command, if it reads sources.
    pub fn source(&self) -> Option<PathBuf> {
        match self {
            Commands::Run(args) | Commands::Load(args) | Commands::Build(args) => {
                args.source.clone()
            }
            Commands::Report { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_globals() {
        let cli = Cli::try_parse_from([
            "starschema",
            "run",
            "--source",
            "sales.json",
            "--format",
            "json",
            "--backend",
            "memory",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.backend, Backend::Memory);
        assert_eq!(cli.command.source(), Some(PathBuf::from("sales.json")));
    }

    #[test]
    fn test_parse_report_table() {
        let cli = Cli::try_parse_from(["starschema", "report", "sales"]).unwrap();

        assert_eq!(
            cli.command,
            Commands::Report {
                table: ReportTable::Sales
            }
        );
        assert_eq!(cli.command.source(), None);
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        assert!(Cli::try_parse_from(["starschema", "report", "returns"]).is_err());
    }
}
