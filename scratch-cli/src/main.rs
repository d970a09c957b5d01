mod loader;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use loader::JsonFileLoader;
use scratch_game::{ScratchEngine, ScratchResult};

const USAGE: &str =
    "Invalid arguments. Usage: scratch-game --config config.json --betting-amount 100";

#[derive(Debug, Parser)]
#[command(name = "scratch-game", version)]
#[command(about = "Play one scratch card round and print the result as JSON")]
struct Args {
    /// Path to the round configuration (JSON)
    #[arg(long)]
    config: PathBuf,

    /// Amount wagered on the round
    #[arg(long = "betting-amount")]
    betting_amount: u64,

    /// Seed the round for reproducible output
    #[arg(long, env = "SCRATCH_SEED", hide = true)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().ok();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            log::debug!("argument parsing failed: {err}");
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let engine = ScratchEngine::new(JsonFileLoader::new(&args.config));
    let result = match args.seed {
        Some(seed) => {
            log::info!("playing seeded round ({seed})");
            engine.play_seeded(args.betting_amount, seed)?
        }
        None => engine.play(args.betting_amount)?,
    };
    let mut out = stdout().lock();
    write_result(&mut out, &result)
}

fn write_result(out: &mut dyn Write, result: &ScratchResult) -> Result<()> {
    let json = result.to_json().context("serializing result")?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

fn report_failure(err: &anyhow::Error) {
    eprintln!("{} {err}", "Error during game execution:".red().bold());
    for cause in err.chain().skip(1) {
        eprintln!("  {} {cause}", "caused by:".yellow());
    }
}
