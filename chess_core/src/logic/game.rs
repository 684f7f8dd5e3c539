use crate::logic::board::{Board, Color, Piece, Square};
use crate::logic::rules::{is_in_checkmate, is_valid_move, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Checkmate { winner: Color },
    KingCaptured { winner: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub color: Color,
}

/// The authoritative board a match is played on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub status: GameStatus,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let mut state = Self {
            board,
            status: GameStatus::Playing,
            history: Vec::new(),
        };
        state.update_status();
        state
    }

    pub const fn turn(&self) -> Color {
        self.board.turn
    }

    pub const fn is_over(&self) -> bool {
        !matches!(self.status, GameStatus::Playing)
    }

    /// Validates and plays a move for the side to move, then hands the turn
    /// over. Only piece ownership and movement patterns are checked; a move
    /// that leaves the mover's king attacked is accepted.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let color = self.turn();
        is_valid_move(&self.board, from, to, color)?;

        let piece = self
            .board
            .get_piece(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        let captured = self
            .board
            .move_piece(from, to)
            .map_err(|_| MoveError::NoPieceAtSource)?;

        let record = MoveRecord {
            from,
            to,
            piece,
            captured,
            color,
        };
        self.history.push(record);
        self.board.turn = color.opposite();

        self.update_status();
        Ok(record)
    }

    fn update_status(&mut self) {
        let to_move = self.turn();

        if self.board.king_square(to_move).is_none() {
            self.status = GameStatus::KingCaptured {
                winner: to_move.opposite(),
            };
            return;
        }

        // A board missing the other king cannot be analysed; leave it playing.
        if let Ok(true) = is_in_checkmate(&self.board, to_move) {
            self.status = GameStatus::Checkmate {
                winner: to_move.opposite(),
            };
        }
    }

    /// Material value of every piece captured by `color` so far.
    pub fn points(&self, color: Color) -> i32 {
        self.history
            .iter()
            .filter(|r| r.color == color)
            .filter_map(|r| r.captured)
            .map(|p| p.kind.material_value())
            .sum()
    }
}
