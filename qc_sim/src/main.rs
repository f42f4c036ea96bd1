//! Run a craps session and print the results as JSON.

use anyhow::{Context, Result};
use pico_args::Arguments;

use quick_craps::session::{Session, SessionConfig};

const HELP: &str = "\
Simulate a craps session and report per-player results as JSON

USAGE:
  qc_sim [OPTIONS]

OPTIONS:
  --players N           Number of players at the table  [default: 6]
  --hours N             Hours of play to simulate  [default: 4]
  --unit DOLLARS        Base bet unit  [default: 25]
  --limit DOLLARS       Table maximum bet  [default: 5000]
  --buyin DOLLARS       Buy-in per player  [default: 1000]
  --seed SEED           Root seed; omit for a fresh one (logged for replay)
  --track NUMBERS       Comma-separated numbers to track streaks for, e.g. 6,8

FLAGS:
  -h, --help            Print help information
";

fn main() -> Result<()> {
    env_logger::init();

    let mut pargs = Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let defaults = SessionConfig::default();
    let config = SessionConfig {
        num_players: pargs
            .opt_value_from_str("--players")?
            .unwrap_or(defaults.num_players),
        hours_of_play: pargs
            .opt_value_from_str("--hours")?
            .unwrap_or(defaults.hours_of_play),
        bet_unit: pargs
            .opt_value_from_str("--unit")?
            .unwrap_or(defaults.bet_unit),
        table_limit: pargs
            .opt_value_from_str("--limit")?
            .unwrap_or(defaults.table_limit),
        buy_in: pargs
            .opt_value_from_str("--buyin")?
            .unwrap_or(defaults.buy_in),
        seed: pargs.opt_value_from_str("--seed")?,
        streak_numbers: pargs
            .opt_value_from_fn("--track", parse_numbers)?
            .unwrap_or_default(),
        ..defaults
    };

    let remaining = pargs.finish();
    anyhow::ensure!(remaining.is_empty(), "unrecognized arguments: {remaining:?}");
    anyhow::ensure!(config.num_players > 0, "--players must be at least 1");

    let mut session = Session::new(config);
    session.run().context("session aborted")?;

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn parse_numbers(raw: &str) -> Result<Vec<u8>> {
    raw.split(',')
        .map(|part| {
            let number: u8 = part
                .trim()
                .parse()
                .with_context(|| format!("bad number in --track: {part:?}"))?;
            anyhow::ensure!((2..=12).contains(&number), "--track numbers must be 2..=12");
            Ok(number)
        })
        .collect()
}
