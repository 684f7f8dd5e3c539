use crate::error::ChessError;
use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::lookup::{AttackTables, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use thiserror::Error;

/// Reasons the driver refuses a move on the authoritative board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece at source square")]
    NoPieceAtSource,
    #[error("piece does not belong to the side to move")]
    NotYourTurn,
    #[error("destination is not reachable by this piece")]
    InvalidMovePattern,
    #[error("destination holds a friendly piece")]
    TargetOccupiedByFriendly,
    #[error("the game is already over")]
    GameOver,
}

/// Pseudo-legal destinations of the piece standing on `from`.
///
/// Movement geometry and blocking only: a returned move may leave the
/// mover's own king attacked.
pub fn get_valid_moves(board: &Board, from: Square) -> Result<Vec<Square>, ChessError> {
    let piece = board.get_piece(from).ok_or(ChessError::EmptySquare(from))?;
    Ok(piece_destinations(board, from, piece))
}

pub(crate) fn piece_destinations(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    let mut targets = Vec::with_capacity(27);
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, &mut targets),
        PieceKind::Knight => {
            let tables = AttackTables::get();
            step_moves(board, piece.color, tables.knight_targets(from), &mut targets);
        }
        PieceKind::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS, &mut targets),
        PieceKind::Rook => slide_moves(board, from, piece.color, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Queen => slide_moves(board, from, piece.color, &QUEEN_DIRECTIONS, &mut targets),
        PieceKind::King => {
            let tables = AttackTables::get();
            step_moves(board, piece.color, tables.king_targets(from), &mut targets);
        }
    }
    targets
}

fn pawn_moves(board: &Board, from: Square, color: Color, targets: &mut Vec<Square>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
        targets.push(one);
        if from.rank() == color.pawn_start_rank() {
            if let Some(two) = one.offset(0, dir).filter(|&sq| board.is_empty(sq)) {
                targets.push(two);
            }
        }
    }

    for d_file in [-1, 1] {
        if let Some(diag) = from.offset(d_file, dir) {
            if board.get_piece(diag).is_some_and(|p| p.color != color) {
                targets.push(diag);
            }
        }
    }
}

fn step_moves(board: &Board, color: Color, candidates: &[Square], targets: &mut Vec<Square>) {
    for &to in candidates {
        match board.get_piece(to) {
            Some(p) if p.color == color => {}
            _ => targets.push(to),
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match board.get_piece(to) {
                None => targets.push(to),
                Some(p) => {
                    if p.color != color {
                        targets.push(to);
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
}

/// Squares some piece of `attacker` could move to, indexed by square.
pub fn reachable_squares(board: &Board, attacker: Color) -> [bool; Square::COUNT] {
    let mut reachable = [false; Square::COUNT];
    for (from, piece) in board.pieces_of(attacker) {
        for to in piece_destinations(board, from, piece) {
            if let Some(slot) = reachable.get_mut(to.index()) {
                *slot = true;
            }
        }
    }
    reachable
}

/// Checks whether `color`'s king is attacked.
///
/// Returns the square of the first enemy piece (in board order) whose
/// pseudo-legal moves reach the king, or `None` when not in check. Only one
/// threat is ever reported, even under double check.
pub fn is_in_check(board: &Board, color: Color) -> Result<Option<Square>, ChessError> {
    let king_sq = board.require_king(color)?;

    let threat = board
        .pieces_of(color.opposite())
        .find(|&(from, piece)| piece_destinations(board, from, piece).contains(&king_sq))
        .map(|(from, _)| from);

    Ok(threat)
}

/// King destinations not reachable by any enemy pseudo-legal move on the
/// current board.
///
/// This is an approximation of real safety: the enemy's reach is measured
/// before the king moves, so squares behind the king on a slider's line,
/// squares a pawn attacks diagonally, and defended enemy pieces all count
/// as safe.
pub fn king_escape_squares(board: &Board, color: Color) -> Result<Vec<Square>, ChessError> {
    let king_sq = board.require_king(color)?;
    let king = Piece::new(PieceKind::King, color);
    let reachable = reachable_squares(board, color.opposite());

    Ok(piece_destinations(board, king_sq, king)
        .into_iter()
        .filter(|sq| !reachable.get(sq.index()).copied().unwrap_or(false))
        .collect())
}

/// `color` is in check and its king has no escape square (see
/// `king_escape_squares` for what counts as an escape).
pub fn is_in_checkmate(board: &Board, color: Color) -> Result<bool, ChessError> {
    if is_in_check(board, color)?.is_none() {
        return Ok(false);
    }
    Ok(king_escape_squares(board, color)?.is_empty())
}

/// Validates a move requested on the authoritative board: the piece must
/// belong to `turn` and the destination must be one of its pseudo-legal
/// destinations.
pub fn is_valid_move(board: &Board, from: Square, to: Square, turn: Color) -> Result<(), MoveError> {
    let piece = board.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;

    if piece.color != turn {
        return Err(MoveError::NotYourTurn);
    }

    if board.get_piece(to).is_some_and(|target| target.color == piece.color) {
        return Err(MoveError::TargetOccupiedByFriendly);
    }

    if !piece_destinations(board, from, piece).contains(&to) {
        return Err(MoveError::InvalidMovePattern);
    }

    Ok(())
}

/// Squares strictly between `from` and `to` when they share a rank, file or
/// diagonal; empty otherwise.
pub(crate) fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let df = i16::from(to.file()) - i16::from(from.file());
    let dr = i16::from(to.rank()) - i16::from(from.rank());
    if !(df == 0 || dr == 0 || df.abs() == dr.abs()) || (df == 0 && dr == 0) {
        return Vec::new();
    }

    #[allow(clippy::cast_possible_truncation)]
    let (step_f, step_r) = (df.signum() as i8, dr.signum() as i8);
    let mut between = Vec::new();
    let mut cursor = from.offset(step_f, step_r);
    while let Some(sq) = cursor {
        if sq == to {
            break;
        }
        between.push(sq);
        cursor = sq.offset(step_f, step_r);
    }
    between
}
