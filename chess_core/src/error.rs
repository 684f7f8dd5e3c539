use crate::logic::board::{Color, Square};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChessError {
    /// Check logic needs exactly one king per side.
    #[error("malformed board: no {color} king present")]
    MalformedBoard { color: Color },

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid FEN `{0}`")]
    InvalidFen(String),

    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid engine configuration: {0}")]
    ConfigValue(String),
}
