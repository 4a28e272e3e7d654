use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "supplier-scorecard",
    version,
    about = "Weighted supplier performance scorecards from monthly procurement records"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a template batch and config into a directory
    Init(InitCommand),
    /// Validate a batch and print the scorecard
    Score(ScoreCommand),
    /// Validate a batch without scoring it
    Validate(ValidateCommand),
}

#[derive(Args)]
pub struct InitCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub dry_run: bool,
    #[arg(long)]
    pub no_overwrite: bool,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Batch file (TOML)
    pub batch: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Config file used instead of scorecard.toml next to the batch
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateCommand {
    /// Batch file (TOML)
    pub batch: PathBuf,
    /// Config file used instead of scorecard.toml next to the batch
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Csv,
}
