use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = seatledger_cli::cli::Cli::parse();
    cli.run()
}
