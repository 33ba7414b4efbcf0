use crate::{ConfigOverrides, LedgerConfig, ResultsFile, TallyOptions, run_tally};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "seatledger")]
#[command(about = "Replay state results into an election seat ledger")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "seatledger.toml")]
    config_path: PathBuf,

    /// Configuration overrides
    #[command(flatten)]
    config: ConfigOverrides,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit every result in a file to a fresh ledger and report the tally
    Tally(TallyArgs),
    /// Validate a results file without tallying it
    Check {
        /// TOML file with `[[result]]` entries
        results: PathBuf,
    },
}

#[derive(Args)]
struct TallyArgs {
    /// TOML file with `[[result]]` entries
    results: PathBuf,

    /// Submit as this caller instead of the configured authority
    #[arg(long)]
    caller: Option<String>,

    /// Finalize the election after the last result
    #[arg(long)]
    finalize: bool,

    /// Abort on the first rejected result
    #[arg(long)]
    strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = LedgerConfig::resolve(self.config, &self.config_path)?;

        let filter = if self.verbose {
            "debug".to_string()
        } else {
            config.log_filter.clone()
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();

        match self.command {
            Commands::Tally(args) => tally(&config, args),
            Commands::Check { results } => check(&results),
        }
    }
}

fn tally(config: &LedgerConfig, args: TallyArgs) -> Result<()> {
    let file = ResultsFile::load(&args.results)?;
    info!(
        results = file.results.len(),
        authority = %config.authority,
        "replaying {}",
        args.results.display()
    );

    let options = TallyOptions {
        caller: args.caller,
        finalize: args.finalize,
        strict: args.strict,
    };
    let report = run_tally(config, file.results, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let file = ResultsFile::load(path)?;
    let problems = file.check();

    for problem in &problems {
        println!("#{}: {}", problem.index + 1, problem.error);
    }

    if !problems.is_empty() {
        bail!(
            "{} of {} result(s) in {} would be rejected",
            problems.len(),
            file.results.len(),
            path.display()
        );
    }

    println!("{}: {} result(s) ok", path.display(), file.results.len());
    Ok(())
}
