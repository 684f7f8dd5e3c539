use crate::error::ChessError;
use crate::logic::board::{Board, Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod player;
pub mod search;

/// A candidate move as produced by the move generator.
///
/// `points` is the material value of the captured piece, with a captured
/// king mapped to the configured king value instead of its (zero) material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub can_capture: bool,
    pub points: i32,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
}

pub trait Evaluator {
    /// Static score of `board` from `perspective`'s point of view.
    fn evaluate(&self, board: &Board, perspective: Color) -> i32;
}

/// A decision maker for one side of the board.
pub trait Agent {
    fn color(&self) -> Color;

    /// Picks a move for `self.color()`. `Ok(None)` means no move is available.
    fn choose_action(&mut self, board: &Board) -> Result<Option<Move>, ChessError>;
}
