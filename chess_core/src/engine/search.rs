use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, Move, SearchStats};
use crate::error::ChessError;
use crate::logic::board::{Board, Color};
use crate::logic::generator::MoveGenerator;
use crate::logic::simulation::SimulationBoard;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Instant;

/// Bound used for the alpha-beta window and for nodes with no moves.
pub const INFINITY: i32 = 1_000_000;

/// Depth-limited minimax with alpha-beta pruning, searching on behalf of
/// one fixed color.
///
/// Every node works on its own `SimulationBoard`: a child is a fresh copy of
/// its parent with one move applied, so sibling branches never observe each
/// other's moves. Nothing is cached between nodes or between decisions.
pub struct AlphaBetaEngine {
    color: Color,
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    generator: MoveGenerator,
    rng: StdRng,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    pub fn new(color: Color, config: Arc<EngineConfig>, rng: StdRng) -> Self {
        Self {
            color,
            generator: MoveGenerator::from_config(&config),
            evaluator: MaterialEvaluator::new(),
            config,
            rng,
            nodes_searched: 0,
        }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    fn order_moves(&mut self, moves: &mut [Move]) {
        if self.config.shuffle_moves {
            moves.shuffle(&mut self.rng);
        }
    }

    /// Score for a node whose side to move has lost its king.
    fn king_loss_score(&self, board: &Board, loser: Color) -> i32 {
        let material = self.evaluator.evaluate(board, self.color);
        if loser == self.color {
            material.saturating_sub(self.config.king_capture_value)
        } else {
            material.saturating_add(self.config.king_capture_value)
        }
    }

    /// Minimax value of `board` seen from the engine's color.
    ///
    /// `maximizing` selects whose move it is: the engine's own color when
    /// true, the opponent's otherwise. With `alpha_beta` disabled in the
    /// config the window is ignored and the full tree is visited.
    pub fn search(
        &mut self,
        board: &SimulationBoard,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, ChessError> {
        self.nodes_searched += 1;

        if depth == 0 {
            return Ok(self.evaluator.evaluate(board, self.color));
        }

        let color = if maximizing {
            self.color
        } else {
            self.color.opposite()
        };

        // Reachable because moves are pseudo-legal: the game is already lost.
        if board.king_square(color).is_none() {
            return Ok(self.king_loss_score(board, color));
        }

        let mut moves = self.generator.generate_moves(board, color)?;
        self.order_moves(&mut moves);

        if maximizing {
            let mut max_eval = -INFINITY;
            for mv in &moves {
                let mut child = board.branch();
                child.apply_move(mv.from, mv.to)?;
                let eval = self.search(&child, depth - 1, alpha, beta, false)?;
                max_eval = max_eval.max(eval);
                if self.config.alpha_beta {
                    alpha = alpha.max(eval);
                    if beta <= alpha {
                        break; // Beta cut-off
                    }
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = INFINITY;
            for mv in &moves {
                let mut child = board.branch();
                child.apply_move(mv.from, mv.to)?;
                let eval = self.search(&child, depth - 1, alpha, beta, true)?;
                min_eval = min_eval.min(eval);
                if self.config.alpha_beta {
                    beta = beta.min(eval);
                    if beta <= alpha {
                        break; // Alpha cut-off
                    }
                }
            }
            Ok(min_eval)
        }
    }

    /// Picks the root move with the strictly greatest value; among equal
    /// values the first one seen after shuffling wins.
    ///
    /// Returns `Ok(None)` only when the engine's color has no candidates.
    pub fn best_move(
        &mut self,
        board: &Board,
    ) -> Result<Option<(Move, i32, SearchStats)>, ChessError> {
        let start = Instant::now();
        self.nodes_searched = 0;

        let root = SimulationBoard::from_board(board);
        let mut moves = self.generator.generate_moves(&root, self.color)?;
        self.order_moves(&mut moves);

        let depth = self.config.search_depth.saturating_sub(1);
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let mut child = root.branch();
            child.apply_move(mv.from, mv.to)?;
            let value = self.search(&child, depth, -INFINITY, INFINITY, false)?;
            let improves = match best {
                Some((_, best_value)) => value > best_value,
                None => true,
            };
            if improves {
                best = Some((mv, value));
            }
        }

        let stats = SearchStats {
            depth: self.config.search_depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        Ok(best.map(|(mv, value)| (mv, value, stats)))
    }
}
