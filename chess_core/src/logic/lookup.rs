use crate::logic::board::Square;
use std::sync::OnceLock;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// On-board step targets for the leaper pieces, per origin square.
pub struct AttackTables {
    pub knight_moves: Vec<Vec<Square>>,
    pub king_moves: Vec<Vec<Square>>,
}

impl AttackTables {
    fn new() -> Self {
        Self {
            knight_moves: Square::all()
                .map(|sq| compute_steps(sq, &KNIGHT_OFFSETS))
                .collect(),
            king_moves: Square::all()
                .map(|sq| compute_steps(sq, &KING_OFFSETS))
                .collect(),
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AttackTables> = OnceLock::new();
        INSTANCE.get_or_init(AttackTables::new)
    }

    pub fn knight_targets(&self, sq: Square) -> &[Square] {
        self.knight_moves.get(sq.index()).map_or(&[][..], Vec::as_slice)
    }

    pub fn king_targets(&self, sq: Square) -> &[Square] {
        self.king_moves.get(sq.index()).map_or(&[][..], Vec::as_slice)
    }
}

fn compute_steps(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_step_counts() {
        let tables = AttackTables::get();
        let a1: Square = "a1".parse().unwrap();
        let d4: Square = "d4".parse().unwrap();

        assert_eq!(tables.knight_targets(a1).len(), 2);
        assert_eq!(tables.king_targets(a1).len(), 3);
        assert_eq!(tables.knight_targets(d4).len(), 8);
        assert_eq!(tables.king_targets(d4).len(), 8);
    }

    #[test]
    fn test_no_wraparound() {
        let tables = AttackTables::get();
        let h4: Square = "h4".parse().unwrap();
        for target in tables.knight_targets(h4) {
            assert!(target.file() >= 5, "knight on h4 wrapped to {target}");
        }
        for target in tables.king_targets(h4) {
            assert!(target.file() >= 6, "king on h4 wrapped to {target}");
        }
    }
}
