//! Grid Heist command-line driver.
//!
//! Generates boards, lists legal actions and plays demo matches with the
//! built-in policies.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_heist::arena::{replay, Match, PolicyKind};
use grid_heist::config::ArenaConfig;
use grid_heist::core::PlayerId;
use grid_heist::rules::{legal_actions, standings};

/// Grid Heist - deterministic four-player grid game engine
#[derive(Parser, Debug)]
#[command(name = "grid-heist")]
#[command(about = "Generate boards and play Grid Heist matches", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "grid-heist.toml")]
    config: PathBuf,

    /// Override the match seed
    #[arg(long, global = true)]
    seed: Option<String>,

    /// Override the round budget
    #[arg(long, global = true)]
    max_rounds: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated board and spawn positions
    Board {
        /// Print the full initial state as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// List a player's legal actions on the initial board
    Legal {
        /// Player id, e.g. P1
        #[arg(default_value = "P1")]
        player: String,
    },

    /// Play a full match with a built-in policy and verify it by replay
    Run {
        /// Policy override: greedy or random
        #[arg(long)]
        policy: Option<String>,

        /// Emit each round record as a JSON line on stdout
        #[arg(long)]
        json: bool,

        /// Expire unanswered deals after this many rounds
        #[arg(long)]
        deal_ttl: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ArenaConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(seed) = cli.seed {
        config.game.seed = seed;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.game.max_rounds = max_rounds;
    }

    match cli.command {
        Command::Board { json } => print_board(&config, json),
        Command::Legal { player } => print_legal(&config, &player),
        Command::Run {
            policy,
            json,
            deal_ttl,
        } => {
            if let Some(policy) = policy {
                config.policy.kind = match policy.as_str() {
                    "greedy" => PolicyKind::Greedy,
                    "random" => PolicyKind::Random,
                    other => bail!("unknown policy '{}' (expected 'greedy' or 'random')", other),
                };
            }
            run_match(&config, json, deal_ttl)
        }
    }
}

fn print_board(config: &ArenaConfig, json: bool) -> Result<()> {
    let state = config.game.generator().build()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!(
        "seed={} size={} max_rounds={}",
        state.seed,
        state.board.size(),
        state.max_rounds
    );
    print!("{}", state.board);
    for player in state.players.values() {
        println!("{} at {}", player.player_id, player.pos);
    }
    Ok(())
}

fn print_legal(config: &ArenaConfig, player: &str) -> Result<()> {
    let state = config.game.generator().build()?;
    let player = PlayerId::new(player);
    if state.player(&player).is_none() {
        bail!("no player '{}' in this match", player);
    }

    for summary in legal_actions(&state, &player) {
        println!("{:<12} {}", summary.kind, summary.description);
    }
    Ok(())
}

fn run_match(config: &ArenaConfig, json: bool, deal_ttl: Option<u32>) -> Result<()> {
    let initial = config.game.generator().build()?;
    info!(
        seed = %config.game.seed,
        policy = ?config.policy.kind,
        max_rounds = config.game.max_rounds,
        "starting match"
    );

    let mut game = Match::new(initial, config.policy.kind.build(&config.game.seed));
    if let Some(ttl) = deal_ttl {
        game = game.with_deal_ttl(ttl);
    }

    while let Some(record) = game.play_round() {
        if json {
            println!("{}", serde_json::to_string(record)?);
        }
    }

    let result = game.run();
    let final_state = game.state().clone();
    let (initial, records) = game.into_log();
    let replayed = replay(&initial, &records).context("replaying match log")?;
    if replayed.players != final_state.players || replayed.board != final_state.board {
        bail!("replay reached a different final state");
    }
    info!(rounds = records.len(), "replay verified");

    if !json {
        for player in standings(&final_state) {
            println!(
                "{}  score={:<4} keys={}",
                player.player_id, player.score, player.keys
            );
        }
        println!("result: {:?}", result);
    }
    Ok(())
}
