mod cli;
mod config;
mod engine;
mod error;
mod metrics;
mod reference;
mod report;
mod telemetry;
mod template;
mod types;
mod validation;

use crate::error::ScorecardError;
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ScorecardError> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let batch = config::load_batch(&cmd.batch)?;
            let root = cmd.batch.parent().unwrap_or_else(|| Path::new("."));
            let loaded = config::load_config(root, cmd.config.as_deref())?;
            if let Err(err) = validation::validate(&batch, &loaded) {
                return rejected(err);
            }

            let mut session = engine::ScoringSession::from_batch(&batch, &loaded);
            let scorecard = session.score_batch(&batch)?;

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Csv => report::OutputFormat::Csv,
            };
            let rendered = report::render(&scorecard, output_format, loaded.precision())?;
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            let batch = config::load_batch(&cmd.batch)?;
            let root = cmd.batch.parent().unwrap_or_else(|| Path::new("."));
            let loaded = config::load_config(root, cmd.config.as_deref())?;
            let violations = validation::collect_violations(&batch, &loaded);
            if violations.is_empty() {
                println!("validate: ok");
                return Ok(exit_code::SUCCESS);
            }
            for violation in &violations {
                println!("[ERROR] {violation}");
            }
            Ok(exit_code::REJECTED)
        }
        cli::Commands::Init(cmd) => {
            let options = template::InitOptions {
                dry_run: cmd.dry_run,
                no_overwrite: cmd.no_overwrite,
            };
            let files = template::write_templates(&cmd.path, options)?;
            let verb = if cmd.dry_run { "would write" } else { "wrote" };
            for file in &files {
                println!("{verb}: {}", file.display());
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn rejected(err: ScorecardError) -> Result<i32, ScorecardError> {
    match err {
        ScorecardError::Validation(violations) => {
            eprintln!("error: batch rejected");
            for violation in &violations {
                eprintln!("  {violation}");
            }
            Ok(exit_code::REJECTED)
        }
        other => Err(other),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
