use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Agent, Move};
use crate::error::ChessError;
use crate::logic::board::{Board, Color};
use crate::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Picks uniformly among all pseudo-legal moves. Ignores check entirely.
pub struct RandomPlayer {
    color: Color,
    generator: MoveGenerator,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, StdRng::from_entropy())
    }

    pub fn with_seed(color: Color, seed: u64) -> Self {
        Self::with_rng(color, StdRng::seed_from_u64(seed))
    }

    fn with_rng(color: Color, rng: StdRng) -> Self {
        Self {
            color,
            generator: MoveGenerator::new(),
            rng,
        }
    }
}

impl Agent for RandomPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_action(&mut self, board: &Board) -> Result<Option<Move>, ChessError> {
        let moves = self.generator.pseudo_legal_moves(board, self.color);
        Ok(moves.choose(&mut self.rng).copied())
    }
}

pub struct MinimaxPlayer {
    engine: AlphaBetaEngine,
}

impl MinimaxPlayer {
    pub fn new(color: Color, config: Arc<EngineConfig>) -> Self {
        Self {
            engine: AlphaBetaEngine::new(color, config, StdRng::from_entropy()),
        }
    }

    pub fn with_seed(color: Color, config: Arc<EngineConfig>, seed: u64) -> Self {
        Self {
            engine: AlphaBetaEngine::new(color, config, StdRng::seed_from_u64(seed)),
        }
    }
}

impl Agent for MinimaxPlayer {
    fn color(&self) -> Color {
        self.engine.color()
    }

    fn choose_action(&mut self, board: &Board) -> Result<Option<Move>, ChessError> {
        let Some((mv, value, stats)) = self.engine.best_move(board)? else {
            log::debug!("{}: no move available", self.engine.color());
            return Ok(None);
        };
        log::debug!(
            "{}: best {} value {} ({} nodes, depth {}, {} ms)",
            self.engine.color(),
            mv,
            value,
            stats.nodes,
            stats.depth,
            stats.time_ms
        );
        Ok(Some(mv))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Random,
    Minimax,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Minimax => write!(f, "minimax"),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "minimax" => Ok(Self::Minimax),
            other => Err(format!("unknown player kind: {other}")),
        }
    }
}

/// Closed set of agents the arena can field.
pub enum Player {
    Random(RandomPlayer),
    Minimax(MinimaxPlayer),
}

impl Player {
    /// Builds an agent of `kind`; `seed` makes its choices reproducible.
    pub fn build(
        kind: PlayerKind,
        color: Color,
        config: &Arc<EngineConfig>,
        seed: Option<u64>,
    ) -> Self {
        match (kind, seed) {
            (PlayerKind::Random, Some(seed)) => Self::Random(RandomPlayer::with_seed(color, seed)),
            (PlayerKind::Random, None) => Self::Random(RandomPlayer::new(color)),
            (PlayerKind::Minimax, Some(seed)) => {
                Self::Minimax(MinimaxPlayer::with_seed(color, Arc::clone(config), seed))
            }
            (PlayerKind::Minimax, None) => {
                Self::Minimax(MinimaxPlayer::new(color, Arc::clone(config)))
            }
        }
    }
}

impl Agent for Player {
    fn color(&self) -> Color {
        match self {
            Self::Random(p) => p.color(),
            Self::Minimax(p) => p.color(),
        }
    }

    fn choose_action(&mut self, board: &Board) -> Result<Option<Move>, ChessError> {
        match self {
            Self::Random(p) => p.choose_action(board),
            Self::Minimax(p) => p.choose_action(board),
        }
    }
}
