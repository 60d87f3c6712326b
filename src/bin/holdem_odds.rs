use std::process::ExitCode;

use clap::Parser;
use holdem_odds::core::{PokerError, cards_from_str};
use holdem_odds::holdem::{
    DEFAULT_TRIALS, EquityCalculator, EquityConfig, EquityResult, OddsRequest,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(name = "holdem_odds")]
#[command(about = "Estimate a Texas Hold'em hand's odds against one random opponent")]
struct Cli {
    /// The two hole cards, e.g. AsKs
    #[arg(long)]
    hole: String,

    /// Three to five board cards, e.g. QsJsTs
    #[arg(long)]
    board: String,

    /// Number of simulated opponent hands
    #[arg(short, long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,
}

fn run(cli: &Cli) -> Result<EquityResult, PokerError> {
    let request = OddsRequest::new(cards_from_str(&cli.hole)?, cards_from_str(&cli.board)?);

    let mut config = EquityConfig::default().trials(cli.trials);
    if let Some(seed) = cli.seed {
        config = config.seed(seed);
    }
    EquityCalculator::with_config(config).calculate(&request)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
