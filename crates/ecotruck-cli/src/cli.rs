//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ecotruck_app::app::Period;
use ecotruck_types::{ExportFormat, OutputFormat};

#[derive(Parser)]
#[command(name = "ecotruck")]
#[command(version)]
#[command(about = "Estimate the monthly savings of tire pressure monitoring for truck fleets")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Store directory override
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute savings for a scenario file (.json or .toml) and store it
    Calculate {
        /// Path to scenario file
        scenario: PathBuf,

        /// Compute only, do not store
        #[arg(long)]
        dry_run: bool,

        /// Session identifier to group submissions
        #[arg(long, short = 's')]
        session: Option<String>,

        /// Name of the submitting user
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// JSON file with additional monthly gains
        #[arg(long, short = 'g')]
        gains: Option<PathBuf>,
    },

    /// List stored calculations, newest first
    List {
        /// Filter by company name (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Submission window (all, today, week, month, year)
        #[arg(long, default_value = "all")]
        period: Period,

        /// Page number, starting at 1
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,

        /// Entries per page. Uses config value if not specified.
        #[arg(long, short = 'n')]
        per_page: Option<usize>,
    },

    /// Show one calculation (full id or short prefix)
    Show {
        id: String,
    },

    /// Delete a calculation
    Delete {
        id: String,
    },

    /// Compare calculations side by side
    Compare {
        /// Calculation ids or short prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Only show fields that differ
        #[arg(long)]
        differences: bool,
    },

    /// Show dashboard statistics
    Stats,

    /// Export calculations to CSV or Excel
    Export {
        /// Output file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// File type (csv, xlsx)
        #[arg(long, default_value = "csv")]
        to: ExportFormat,

        /// Filter by company name (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Submission window (all, today, week, month, year)
        #[arg(long, default_value = "all")]
        period: Period,
    },

    /// Print the savings report of one calculation
    Report {
        id: String,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show the last calculation of a session
    Last {
        session: String,
    },

    /// List the standard additional gains
    Gains {
        /// Write a fillable JSON template to this path
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set listing page size
        #[arg(long)]
        set_page_size: Option<usize>,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default fuel savings percentage
        #[arg(long)]
        set_fuel_savings: Option<f64>,

        /// Set default CPK improvement percentage
        #[arg(long)]
        set_cpk_improvement: Option<f64>,

        /// Set default carcass savings percentage
        #[arg(long)]
        set_carcass_savings: Option<f64>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_period() {
        let cli = Cli::try_parse_from(["ecotruck", "list", "--period", "week", "-f", "json"])
            .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::List { period, page, .. } => {
                assert_eq!(period, Period::Week);
                assert_eq!(page, 1);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_compare_requires_ids() {
        assert!(Cli::try_parse_from(["ecotruck", "compare"]).is_err());
        assert!(Cli::try_parse_from(["ecotruck", "compare", "ab12cd34"]).is_ok());
    }

    #[test]
    fn test_export_format() {
        let cli = Cli::try_parse_from(["ecotruck", "export", "--to", "xlsx"]).unwrap();
        match cli.command {
            Commands::Export { to, .. } => assert_eq!(to, ExportFormat::Xlsx),
            _ => panic!("expected export"),
        }
    }
}
