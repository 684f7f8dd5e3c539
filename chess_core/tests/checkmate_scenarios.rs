use chess_core::engine::eval::MaterialEvaluator;
use chess_core::engine::Evaluator;
use chess_core::logic::board::{Board, Color, PieceKind, Square};
use chess_core::logic::generator::MoveGenerator;
use chess_core::logic::rules::{is_in_check, is_in_checkmate};

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

fn board_from_fen(fen: &str) -> Board {
    Board::from_fen(fen).expect("Invalid FEN")
}

#[test]
fn test_boxed_in_king_is_mated() {
    // White king h1 walled in by its own pawns, black queen checks along the rank.
    let board = board_from_fen("4k3/8/8/8/8/8/6PP/q6K w");

    assert_eq!(is_in_check(&board, Color::White).unwrap(), Some(sq("a1")));
    assert!(is_in_checkmate(&board, Color::White).unwrap());
    assert!(MoveGenerator::new()
        .generate_moves(&board, Color::White)
        .unwrap()
        .is_empty());

    // The side delivering mate is unaffected.
    assert!(!is_in_checkmate(&board, Color::Black).unwrap());
    assert!(!MoveGenerator::new()
        .generate_moves(&board, Color::Black)
        .unwrap()
        .is_empty());
}

#[test]
fn test_mate_built_square_by_square() {
    let mut board = Board::empty();
    board.add_piece(sq("h8"), PieceKind::King, Color::Black);
    board.add_piece(sq("g7"), PieceKind::Pawn, Color::Black);
    board.add_piece(sq("h7"), PieceKind::Pawn, Color::Black);
    board.add_piece(sq("d8"), PieceKind::Rook, Color::White);
    board.add_piece(sq("g1"), PieceKind::King, Color::White);
    board.turn = Color::Black;

    assert!(is_in_checkmate(&board, Color::Black).unwrap());
    assert!(MoveGenerator::new()
        .generate_moves(&board, Color::Black)
        .unwrap()
        .is_empty());
}

#[test]
fn test_check_with_escape_is_not_mate() {
    // Same rank check, but the h2 pawn has moved so h2 is free.
    let board = board_from_fen("4k3/8/8/8/8/7P/6P1/q6K w");

    assert!(is_in_check(&board, Color::White).unwrap().is_some());
    assert!(!is_in_checkmate(&board, Color::White).unwrap());

    let moves = MoveGenerator::new()
        .generate_moves(&board, Color::White)
        .unwrap();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from, sq("h1"));
    assert_eq!(moves[0].to, sq("h2"));
}

#[test]
fn test_kings_only_evaluates_to_zero() {
    let board = board_from_fen("4k3/8/8/8/8/8/8/4K3 w");
    let evaluator = MaterialEvaluator::new();

    assert_eq!(evaluator.evaluate(&board, Color::White), 0);
    assert_eq!(evaluator.evaluate(&board, Color::Black), 0);
    assert!(!is_in_checkmate(&board, Color::White).unwrap());
    assert!(!is_in_checkmate(&board, Color::Black).unwrap());
}
