use crate::logic::board::PieceKind;

// Material values per `PieceKind`.
pub const VAL_PAWN: i32 = 1;
pub const VAL_KNIGHT: i32 = 3;
pub const VAL_BISHOP: i32 = 3;
pub const VAL_ROOK: i32 = 5;
pub const VAL_QUEEN: i32 = 9;
// The king never counts towards material.
pub const VAL_KING: i32 = 0;

/// The same values, ordered by `PieceKind::index()`.
pub const PIECE_VALUES: [i32; 6] = [
    VAL_PAWN, VAL_KNIGHT, VAL_BISHOP, VAL_ROOK, VAL_QUEEN, VAL_KING,
];

/// Finite stand-in for the "infinite" value of a king when it shows up as a
/// capture target in a candidate move.
pub const KING_CAPTURE_VALUE: i32 = 10_000;

/// Largest accepted `king_capture_value`. Terminal scores must stay inside
/// the search window `(-INFINITY, INFINITY)` after material is added.
pub const MAX_KING_CAPTURE_VALUE: i32 = 100_000;

#[must_use]
pub const fn get_piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => VAL_PAWN,
        PieceKind::Knight => VAL_KNIGHT,
        PieceKind::Bishop => VAL_BISHOP,
        PieceKind::Rook => VAL_ROOK,
        PieceKind::Queen => VAL_QUEEN,
        PieceKind::King => VAL_KING,
    }
}

/// Points awarded for capturing `kind`. Unlike `get_piece_value`, the king
/// maps to `king_value` so that king captures dominate every other capture.
#[must_use]
pub const fn capture_points(kind: PieceKind, king_value: i32) -> i32 {
    match kind {
        PieceKind::King => king_value,
        _ => get_piece_value(kind),
    }
}
