use anyhow::Context;
use clap::Parser;
use sealant_cli::Cli;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = sealant_cli::load_settings(&cli)?;
    let _log = sealant_cli::init_logging(&cli, &config.logging)?;

    let mut stdout = std::io::stdout().lock();
    let outcome = sealant_cli::run(cli.command, config, &mut stdout).context("sealant failed")?;
    Ok(outcome.into())
}
