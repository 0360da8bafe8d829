//! GNSS CLI - Command line tool for day-of-year dates, station distances
//! and displacement arrows.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "gnss-cli",
    version,
    about = "GNSS station toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: gnss_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let output = gnss_cmd::run(cli.command)?;
    println!("{}", output);
    Ok(())
}
