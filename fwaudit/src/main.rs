use anyhow::Result;
use clap::Parser;

mod audit_cmd;
mod cli;
mod logging;
mod offline_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let report = cli.command.report_args();
    logging::init(report.verbose, report.log_file.as_deref())?;

    match cli.command {
        Command::Meraki(args) => audit_cmd::run_meraki(args),
        Command::Sonicwall(args) => audit_cmd::run_sonicwall(args),
        Command::Offline(args) => offline_cmd::run_offline(args),
    }
}
