mod simulation;

use std::error::Error;

use blackjack_ev::Card;
use blackjack_ev_drivers::parse_config_from_file;
use clap::Parser;
use simulation::Table;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_ev.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Cards already dealt from the shoe, e.g. `--seen AS 10H QD`
    #[arg(short, long, num_args = 1..)]
    seen: Vec<String>,

    /// The player's cards in the current round
    #[arg(long, num_args = 1..)]
    hand: Vec<String>,

    /// The dealer's up card. Enables the dealer-outcome sampler and play advice.
    #[arg(short, long)]
    upcard: Option<String>,

    /// Log simulation batches
    #[arg(short, long)]
    verbose: bool,
}

fn resolve_config_path(config: String) -> Result<String, Box<dyn Error>> {
    if config != DEFAULT_CONFIG_PATH {
        return Ok(config);
    }
    let home_dir = home::home_dir().ok_or("Cannot find home directory")?;
    let config_file_path = home_dir.join(".blackjack_ev.yml");
    if !config_file_path.exists() {
        return Err("Config file not exists".into());
    }
    if config_file_path.is_dir() {
        return Err("This should be a path rather than a directory".into());
    }
    let path = config_file_path
        .to_str()
        .ok_or("Config file path is not valid UTF-8")?;
    Ok(String::from(path))
}

fn parse_cards(codes: &[String]) -> Result<Vec<Card>, blackjack_ev::Error> {
    codes.iter().map(|code| code.parse::<Card>()).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CommandLineArgs::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config_path = resolve_config_path(args.config)?;
    let config = parse_config_from_file(&config_path)?;

    let table = Table {
        seen: parse_cards(&args.seen)?,
        hand: parse_cards(&args.hand)?,
        upcard: args.upcard.map(|code| code.parse::<Card>()).transpose()?,
    };

    simulation::run(&config, &table)
}
