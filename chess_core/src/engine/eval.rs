use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};

/// Material count: own pieces add their value, enemy pieces subtract it.
/// Kings contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub const fn new() -> Self {
        Self
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, perspective: Color) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| {
                let value = piece.kind.material_value();
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}
