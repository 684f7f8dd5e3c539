use crate::engine::Agent;
use crate::error::ChessError;
use crate::logic::board::{Board, Color};
use crate::logic::game::{GameState, GameStatus};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Total moves (both sides) after which the game is drawn.
    pub max_moves: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_moves: 100 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEndStatus {
    NoValidMoves,
    MoveLimit,
    CheckMate,
    KingCaptured,
    InvalidMove,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub points: i32,
    pub capture_count: u32,
    pub move_count: u32,
    /// Wall time of every decision, in milliseconds.
    pub time_log_ms: Vec<f64>,
}

impl PlayerStats {
    pub fn average_decision_ms(&self) -> f64 {
        if self.time_log_ms.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.time_log_ms.len() as f64;
        self.time_log_ms.iter().sum::<f64>() / count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Option<Color>,
    pub is_draw: bool,
    pub white: PlayerStats,
    pub black: PlayerStats,
    pub game_end_status: GameEndStatus,
    pub moves: Vec<String>,
    pub final_fen: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub outcomes: Vec<GameOutcome>,
}

impl SeriesSummary {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome.winner {
            Some(Color::White) => self.white_wins += 1,
            Some(Color::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }
        self.outcomes.push(outcome);
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn stats_mut<'a>(
    white: &'a mut PlayerStats,
    black: &'a mut PlayerStats,
    color: Color,
) -> &'a mut PlayerStats {
    match color {
        Color::White => white,
        Color::Black => black,
    }
}

/// Plays one game from the standard start position.
pub fn play_match<'a>(
    white: &'a mut dyn Agent,
    black: &'a mut dyn Agent,
    config: &MatchConfig,
) -> Result<GameOutcome, ChessError> {
    play_match_from(Board::new(), white, black, config)
}

/// Plays one game from `board`, alternating between the two agents until the
/// game ends.
///
/// The agents only ever see a copy of the authoritative board. Moves are
/// validated by [`GameState::make_move`]; the first rejected move ends the
/// game, decided on points.
pub fn play_match_from<'a>(
    board: Board,
    white: &'a mut dyn Agent,
    black: &'a mut dyn Agent,
    config: &MatchConfig,
) -> Result<GameOutcome, ChessError> {
    let mut game = GameState::from_board(board);
    let mut white_stats = PlayerStats::default();
    let mut black_stats = PlayerStats::default();
    let mut moves = Vec::new();
    let mut moves_played: u32 = 0;

    log::info!("Match started: {}", game.board.to_fen_string());

    let (winner, end_status) = loop {
        if let GameStatus::Checkmate { winner } = game.status {
            break (Some(winner), GameEndStatus::CheckMate);
        }
        if let GameStatus::KingCaptured { winner } = game.status {
            break (Some(winner), GameEndStatus::KingCaptured);
        }
        if moves_played >= config.max_moves {
            break (None, GameEndStatus::MoveLimit);
        }

        let color = game.turn();
        let agent = match color {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };

        let start = Instant::now();
        let choice = agent.choose_action(&game.board)?;
        stats_mut(&mut white_stats, &mut black_stats, color)
            .time_log_ms
            .push(elapsed_ms(start));

        let Some(mv) = choice else {
            break (None, GameEndStatus::NoValidMoves);
        };

        match game.make_move(mv.from, mv.to) {
            Ok(record) => {
                let stats = stats_mut(&mut white_stats, &mut black_stats, color);
                stats.move_count += 1;
                if record.captured.is_some() {
                    stats.capture_count += 1;
                    stats.points = game.points(color);
                }
                moves.push(mv.to_string());
                moves_played += 1;
            }
            Err(e) => {
                log::warn!("{color} played an invalid move {mv}: {e}");
                let winner = match white_stats.points.cmp(&black_stats.points) {
                    std::cmp::Ordering::Greater => Some(Color::White),
                    std::cmp::Ordering::Less => Some(Color::Black),
                    std::cmp::Ordering::Equal => None,
                };
                break (winner, GameEndStatus::InvalidMove);
            }
        }
    };

    let outcome = GameOutcome {
        winner,
        is_draw: winner.is_none(),
        white: white_stats,
        black: black_stats,
        game_end_status: end_status,
        moves,
        final_fen: game.board.to_fen_string(),
    };

    log::info!(
        "Match finished after {} moves: {:?}, winner {}",
        moves_played,
        outcome.game_end_status,
        outcome
            .winner
            .map_or_else(|| "none".to_string(), |c| c.to_string())
    );

    Ok(outcome)
}

/// Plays `games` games, building a fresh pair of agents for each one.
pub fn run_series<W, B, FW, FB>(
    games: u32,
    config: &MatchConfig,
    mut make_white: FW,
    mut make_black: FB,
) -> Result<SeriesSummary, ChessError>
where
    W: Agent,
    B: Agent,
    FW: FnMut(u32) -> W,
    FB: FnMut(u32) -> B,
{
    let mut summary = SeriesSummary::default();
    for game in 0..games {
        let mut white = make_white(game);
        let mut black = make_black(game);
        let outcome = play_match(&mut white, &mut black, config)?;
        summary.record(outcome);
    }
    Ok(summary)
}
