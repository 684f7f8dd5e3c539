use crate::error::ChessError;
use crate::logic::board::{Board, Piece, Square};
use std::ops::Deref;

/// A disposable copy of a board used to play out hypothetical lines.
///
/// The board is plain data, so taking a copy is a flat 64-square copy. Every
/// node of a search owns its own `SimulationBoard`; siblings never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationBoard {
    board: Board,
}

impl SimulationBoard {
    #[must_use]
    pub const fn from_board(board: &Board) -> Self {
        Self { board: *board }
    }

    /// A fresh copy of this position for one child branch.
    #[must_use]
    pub const fn branch(&self) -> Self {
        Self { board: self.board }
    }

    /// Plays `from -> to` without any legality check and passes the turn.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Option<Piece>, ChessError> {
        let captured = self.board.move_piece(from, to)?;
        self.board.turn = self.board.turn.opposite();
        Ok(captured)
    }
}

impl Deref for SimulationBoard {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Color, PieceKind};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_apply_does_not_touch_source_board() {
        let live = Board::new();
        let mut sim = SimulationBoard::from_board(&live);

        sim.apply_move(sq("e2"), sq("e4")).unwrap();

        assert!(live.get_piece(sq("e2")).is_some());
        assert!(live.is_empty(sq("e4")));
        assert_eq!(live.turn, Color::White);

        assert!(sim.is_empty(sq("e2")));
        assert_eq!(sim.get_piece(sq("e4")).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(sim.turn, Color::Black);
    }

    #[test]
    fn test_siblings_are_isolated() {
        let parent = SimulationBoard::from_board(&Board::new());
        let mut left = parent.branch();
        let mut right = parent.branch();

        left.apply_move(sq("g1"), sq("f3")).unwrap();
        right.apply_move(sq("d2"), sq("d4")).unwrap();

        assert!(left.get_piece(sq("d2")).is_some());
        assert!(left.is_empty(sq("d4")));
        assert!(right.get_piece(sq("g1")).is_some());
        assert!(right.is_empty(sq("f3")));
        assert_eq!(*parent, Board::new());
    }

    #[test]
    fn test_apply_reports_capture() {
        let board = Board::from_fen("4k3/8/8/3r4/8/8/8/3QK3 w").unwrap();
        let mut sim = SimulationBoard::from_board(&board);
        let captured = sim.apply_move(sq("d1"), sq("d5")).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceKind::Rook, Color::Black)));
    }

    #[test]
    fn test_apply_from_empty_square_fails() {
        let mut sim = SimulationBoard::from_board(&Board::new());
        assert!(sim.apply_move(sq("e4"), sq("e5")).is_err());
    }
}
