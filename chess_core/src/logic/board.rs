use crate::error::ChessError;
use crate::logic::eval_constants::get_piece_value;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use std::str::FromStr;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Rank delta of a single pawn step.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    pub const fn promotion_rank(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material value used by the evaluator. The king is worth nothing here.
    #[must_use]
    pub const fn material_value(self) -> i32 {
        get_piece_value(self)
    }

    /// Upper-case notation letter.
    pub const fn notation(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub const fn is_slider(self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn to_fen_char(self) -> char {
        let c = self.kind.notation();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Self { kind, color })
    }
}

/// A board position, rank-major: index = rank * 8 + file, a1 = 0, h8 = 63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Steps by (`d_file`, `d_rank`), returning `None` when the result falls
    /// off the board. Never wraps around an edge.
    #[must_use]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = i16::from(self.file()) + i16::from(d_file);
        let rank = i16::from(self.rank()) + i16::from(d_rank);
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (file, rank) = (file as u8, rank as u8);
            Self::new(file, rank)
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..64u8).map(Self)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file());
        write!(f, "{}{}", file, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(ChessError::InvalidSquare(s.to_string()));
        };
        let file = file.wrapping_sub(b'a');
        let rank = rank.wrapping_sub(b'1');
        Self::new(file, rank).ok_or_else(|| ChessError::InvalidSquare(s.to_string()))
    }
}

/// The authoritative 8x8 board: 64 squares, each holding at most one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    squares: [Option<Piece>; 64],
    pub turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position, white to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
            turn: Color::White,
        }
    }

    fn setup_initial_position(&mut self) {
        self.setup_pieces(Color::White, 0, 1);
        self.setup_pieces(Color::Black, 7, 6);
    }

    fn setup_pieces(&mut self, color: Color, back_rank: u8, pawn_rank: u8) {
        let back_row = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, kind) in (0u8..).zip(back_row) {
            if let Some(sq) = Square::new(file, back_rank) {
                self.add_piece(sq, kind, color);
            }
            if let Some(sq) = Square::new(file, pawn_rank) {
                self.add_piece(sq, PieceKind::Pawn, color);
            }
        }
    }

    pub fn add_piece(&mut self, sq: Square, kind: PieceKind, color: Color) {
        self.set_piece(sq, Some(Piece { kind, color }));
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(slot) = self.squares.get_mut(sq.index()) {
            *slot = piece;
        }
    }

    #[must_use]
    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.squares.get(sq.index()).copied().flatten()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get_piece(sq).is_none()
    }

    /// Occupied squares in board order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get_piece(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Like `king_square`, but a missing king is reported as a malformed board.
    pub fn require_king(&self, color: Color) -> Result<Square, ChessError> {
        self.king_square(color)
            .ok_or(ChessError::MalformedBoard { color })
    }

    /// Moves the piece on `from` to `to`, replacing whatever stood there.
    /// Pawns reaching their last rank become queens. The turn is left alone;
    /// callers decide whether the move ends a ply.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Piece>, ChessError> {
        let mut piece = self.get_piece(from).ok_or(ChessError::EmptySquare(from))?;
        let captured = self.get_piece(to);

        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
            piece.kind = PieceKind::Queen;
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(piece));
        Ok(captured)
    }

    /// Parses the placement field of a FEN string, optionally followed by the
    /// side to move. Remaining FEN fields are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;

        let mut board = Self::empty();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidFen(fen.to_string()));
        }

        for (row, rank) in rows.iter().zip((0u8..8).rev()) {
            let mut file: u8 = 0;
            for c in row.chars() {
                if c.is_ascii_digit() {
                    // Only 1-8 empty squares may be skipped at once.
                    let skip = c
                        .to_digit(10)
                        .filter(|d| (1..=8).contains(d))
                        .and_then(|d| u8::try_from(d).ok())
                        .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                    file = file
                        .checked_add(skip)
                        .filter(|&f| f <= 8)
                        .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                    continue;
                }
                let piece =
                    Piece::from_fen_char(c).ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                let sq = Square::new(file, rank)
                    .ok_or_else(|| ChessError::InvalidFen(fen.to_string()))?;
                board.set_piece(sq, Some(piece));
                file += 1;
            }
            if file != 8 {
                return Err(ChessError::InvalidFen(fen.to_string()));
            }
        }

        board.turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ChessError::InvalidFen(fen.to_string())),
        };

        Ok(board)
    }

    pub fn to_fen_string(&self) -> String {
        let mut fen = String::new();
        for rank in (0u8..8).rev() {
            let mut empty_count = 0;
            for file in 0u8..8 {
                let piece = Square::new(file, rank).and_then(|sq| self.get_piece(sq));
                if let Some(piece) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.turn == Color::White { 'w' } else { 'b' });
        fen
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.get_piece(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
