use engine::{GameResult, BISHOP, BLACK, KNIGHT, PAWN, QUEEN, ROOK, WHITE};

use crate::config::{PieceValues, SearchConfig, TerminalScale};
use crate::rules::Rules;
use crate::types::*;

const COUNTED_PIECES: [u8; 5] = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN];

/// Scores positions from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    piece_values: PieceValues,
    normalization: Score,
    terminal_scale: TerminalScale,
}

impl Evaluator {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            piece_values: config.piece_values,
            normalization: config.normalization,
            terminal_scale: config.terminal_scale,
        }
    }

    /// Outcome score for a finished game, normalized material otherwise.
    pub fn evaluate<R: Rules>(&self, position: &R) -> Score {
        self.evaluate_with_outcome(position, position.outcome())
    }

    pub(crate) fn evaluate_with_outcome<R: Rules>(&self, position: &R, outcome: Option<GameResult>) -> Score {
        match outcome {
            Some(result) => self.terminal_scale.score(result),
            None => self.material_balance(position) / self.normalization,
        }
    }

    /// White material minus Black material, kings excluded.
    pub fn material_balance<R: Rules>(&self, position: &R) -> Score {
        COUNTED_PIECES
            .iter()
            .map(|&piece_type| {
                let difference = position.piece_count(WHITE, piece_type) as Score
                    - position.piece_count(BLACK, piece_type) as Score;
                difference * self.piece_values.value(piece_type)
            })
            .sum()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
