use engine::Color;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchOutcome};
use crate::evaluation::Evaluator;
use crate::rules::Rules;
use crate::types::*;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Turns of `maximizing_color` take the maximum over their children, the
/// other side's turns take the minimum. The engine holds no per-search state:
/// the root move travels back through the return value and node counts go to
/// a caller-owned [`SearchStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEngine {
    evaluator: Evaluator,
    maximizing_color: Color,
    max_depth: u32,
}

impl SearchEngine {
    pub fn new(config: &SearchConfig) -> SearchOutcome<Self> {
        config.validate()?;
        Ok(Self {
            evaluator: Evaluator::new(config),
            maximizing_color: config.maximizing_color,
            max_depth: config.max_depth,
        })
    }

    /// Same engine with a different depth limit.
    pub fn with_max_depth(&self, max_depth: u32) -> Self {
        Self {
            max_depth,
            ..self.clone()
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn maximizing_color(&self) -> Color {
        self.maximizing_color
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Search `position` with the widest bounds.
    pub fn search<R: Rules>(&self, position: &R, stats: &mut SearchStats) -> SearchOutcome<(Score, Option<R::Move>)> {
        self.min_max(position, 0, Score::NEG_INFINITY, Score::INFINITY, stats)
    }

    /// Score `position`, reached `depth` plies below the root, within
    /// `[alpha, beta]`.
    ///
    /// Fail-hard on cutoffs: the value returned when a bound is crossed is the
    /// best found so far, not an exact score. The move is `Some` only at depth
    /// 0, and only if a child strictly improved the root's bound.
    pub fn min_max<R: Rules>(
        &self,
        position: &R,
        depth: u32,
        alpha: Score,
        beta: Score,
        stats: &mut SearchStats,
    ) -> SearchOutcome<(Score, Option<R::Move>)> {
        stats.nodes += 1;

        if depth > self.max_depth {
            return Err(SearchError::invariant(
                depth,
                format!("depth exceeds the limit of {}", self.max_depth),
            ));
        }
        // Also rejects NaN bounds
        if !(alpha <= beta) {
            return Err(SearchError::invariant(depth, format!("alpha {} above beta {}", alpha, beta)));
        }

        let outcome = position.outcome();
        if outcome.is_some() || depth == self.max_depth {
            return Ok((self.evaluator.evaluate_with_outcome(position, outcome), None));
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::invariant(depth, "no legal moves in a position that is not over"));
        }

        if position.side_to_move() == self.maximizing_color {
            self.maximize(position, moves, depth, alpha, beta, stats)
        } else {
            self.minimize(position, moves, depth, alpha, beta, stats)
        }
    }

    fn maximize<R: Rules>(
        &self,
        position: &R,
        moves: Vec<R::Move>,
        depth: u32,
        mut alpha: Score,
        beta: Score,
        stats: &mut SearchStats,
    ) -> SearchOutcome<(Score, Option<R::Move>)> {
        let mut value = Score::NEG_INFINITY;
        let mut best_move = None;

        for mv in moves {
            let child = position.apply(mv);
            let (child_score, _) = self.min_max(&child, depth + 1, alpha, beta, stats)?;

            if child_score > value {
                value = child_score;
            }
            if child_score >= beta {
                stats.cutoffs += 1;
                trace!(depth, %mv, child_score, beta, "beta cutoff");
                return Ok((value, best_move));
            }
            if child_score > alpha {
                alpha = child_score;
                if depth == 0 {
                    debug!(%mv, score = child_score, "new root move");
                    best_move = Some(mv);
                }
            }
        }

        Ok((value, best_move))
    }

    fn minimize<R: Rules>(
        &self,
        position: &R,
        moves: Vec<R::Move>,
        depth: u32,
        alpha: Score,
        mut beta: Score,
        stats: &mut SearchStats,
    ) -> SearchOutcome<(Score, Option<R::Move>)> {
        let mut value = Score::INFINITY;
        let mut best_move = None;

        for mv in moves {
            let child = position.apply(mv);
            let (child_score, _) = self.min_max(&child, depth + 1, alpha, beta, stats)?;

            if child_score < value {
                value = child_score;
            }
            if child_score <= alpha {
                stats.cutoffs += 1;
                trace!(depth, %mv, child_score, alpha, "alpha cutoff");
                return Ok((value, best_move));
            }
            if child_score < beta {
                beta = child_score;
                if depth == 0 {
                    debug!(%mv, score = child_score, "new root move");
                    best_move = Some(mv);
                }
            }
        }

        Ok((value, best_move))
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            evaluator: Evaluator::default(),
            maximizing_color: engine::WHITE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
