use anyhow::{Context, Result};
use chess_core::arena::{run_series, MatchConfig, SeriesSummary};
use chess_core::engine::config::EngineConfig;
use chess_core::engine::player::{Player, PlayerKind};
use chess_core::logic::board::Color;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "chess-arena",
    about = "Play headless games between minimax and random agents"
)]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Agent playing white (minimax|random)
    #[arg(long, default_value_t = PlayerKind::Minimax)]
    white: PlayerKind,

    /// Agent playing black (minimax|random)
    #[arg(long, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Search depth for minimax agents; overrides the config file
    #[arg(long)]
    depth: Option<u8>,

    /// Random seed; each game and side gets its own seed derived from it
    #[arg(long)]
    seed: Option<u64>,

    /// Total moves before the game is declared a draw
    #[arg(long, default_value_t = 100)]
    max_moves: u32,

    /// Optional: engine config as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Optional: write the series summary JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_engine_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading engine config {}", path.display()))?;
            EngineConfig::load_from_json(&json)
                .with_context(|| format!("parsing engine config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config = config.with_depth(depth);
    }
    Ok(config)
}

fn game_seed(base: Option<u64>, game: u32, color: Color) -> Option<u64> {
    base.map(|seed| {
        seed.wrapping_mul(1_000_003)
            .wrapping_add(u64::from(game) * 2)
            .wrapping_add(color.index() as u64)
    })
}

fn print_summary(summary: &SeriesSummary) {
    println!(
        "games: {}  white wins: {}  black wins: {}  draws: {}",
        summary.games, summary.white_wins, summary.black_wins, summary.draws
    );
    for (i, outcome) in summary.outcomes.iter().enumerate() {
        println!(
            "game {:>3}: {:?} after {} moves, winner {}, points {}-{}, avg decision {:.1}/{:.1} ms",
            i + 1,
            outcome.game_end_status,
            outcome.moves.len(),
            outcome
                .winner
                .map_or_else(|| "none".to_string(), |c| c.to_string()),
            outcome.white.points,
            outcome.black.points,
            outcome.white.average_decision_ms(),
            outcome.black.average_decision_ms(),
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let engine_config = Arc::new(load_engine_config(&args)?);
    let match_config = MatchConfig {
        max_moves: args.max_moves,
    };

    tracing::info!(
        "Playing {} game(s): {} (white) vs {} (black), depth {}",
        args.games,
        args.white,
        args.black,
        engine_config.search_depth
    );

    let summary = run_series(
        args.games,
        &match_config,
        |game| {
            Player::build(
                args.white,
                Color::White,
                &engine_config,
                game_seed(args.seed, game, Color::White),
            )
        },
        |game| {
            Player::build(
                args.black,
                Color::Black,
                &engine_config,
                game_seed(args.seed, game, Color::Black),
            )
        },
    )
    .context("match aborted")?;

    print_summary(&summary);

    let output = args.output.clone().unwrap_or_else(|| {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        PathBuf::from(format!("results_{stamp}.json"))
    });
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(&output, json)
        .with_context(|| format!("writing results to {}", output.display()))?;
    tracing::info!("Results written to {}", output.display());

    Ok(())
}
