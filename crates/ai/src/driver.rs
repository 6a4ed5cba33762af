use engine::{GameResult, Position};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchOutcome};
use crate::rules::Rules;
use crate::search::SearchEngine;
use crate::types::*;

/// Pick a move for the side to move with the default settings, searching
/// depth limits `1..=max_depth`.
pub fn select_move<R: Rules>(position: &R, max_depth: u32) -> SearchOutcome<SearchResult<R::Move>> {
    let config = SearchConfig::default().with_max_depth(max_depth);
    select_move_with_config(position, &config)
}

/// Iterative deepening up to `config.max_depth`.
///
/// Every iteration starts from the widest bounds and nothing carries over
/// between iterations; only the deepest iteration's move and score are
/// returned.
pub fn select_move_with_config<R: Rules>(position: &R, config: &SearchConfig) -> SearchOutcome<SearchResult<R::Move>> {
    let engine = SearchEngine::new(config)?;

    if position.is_terminal() {
        return Err(SearchError::NoMoveAvailable);
    }

    let mut result = None;
    for depth in 1..=config.max_depth {
        let mut stats = SearchStats::default();
        let (score, best_move) = engine.with_max_depth(depth).search(position, &mut stats)?;

        debug!(
            depth,
            score,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            best_move = %best_move.map(|mv| mv.to_string()).unwrap_or_else(|| "-".to_string()),
            "iteration complete"
        );

        let best_move = best_move.ok_or_else(|| {
            SearchError::invariant(0, format!("iteration {} recorded no root move", depth))
        })?;
        result = Some(SearchResult {
            best_move,
            score,
            depth,
            nodes_searched: stats.nodes,
        });
    }

    result.ok_or(SearchError::NoMoveAvailable)
}

/// Engine-versus-engine game from a starting position.
#[derive(Debug, Clone)]
pub struct GameRecord<R: Rules> {
    /// One search result per ply, in play order
    pub plies: Vec<SearchResult<R::Move>>,
    pub final_position: R,
    /// `None` when the ply limit was reached first
    pub result: Option<GameResult>,
}

/// Let the engine choose moves for both sides until the game ends or
/// `max_plies` moves have been played.
pub fn play_game<R: Rules>(position: R, config: &SearchConfig, max_plies: u32) -> SearchOutcome<GameRecord<R>> {
    config.validate()?;

    let mut position = position;
    let mut plies = Vec::new();
    while plies.len() < max_plies as usize && !position.is_terminal() {
        let result = select_move_with_config(&position, config)?;
        info!(ply = plies.len() + 1, best_move = %result.best_move, score = result.score, "move played");
        position = position.apply(result.best_move);
        plies.push(result);
    }

    let result = position.outcome();
    Ok(GameRecord {
        plies,
        final_position: position,
        result,
    })
}

/// Parse `fen` and select a move for it.
pub fn select_move_from_fen(fen: &str, config: &SearchConfig) -> SearchOutcome<SearchResult> {
    let position = Position::from_fen(fen)?;
    select_move_with_config(&position, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Color, Move, WHITE};
    use std::cell::Cell;

    /// Reports play continuing on the first query only, so the root looks
    /// live to the driver and finished to the search.
    struct FinishesAfterFirstLook {
        looks: Cell<u32>,
    }

    impl Rules for FinishesAfterFirstLook {
        type Move = Move;

        fn legal_moves(&self) -> Vec<Move> {
            Position::new().legal_moves()
        }

        fn apply(&self, _mv: Move) -> Self {
            Self { looks: Cell::new(0) }
        }

        fn side_to_move(&self) -> Color {
            WHITE
        }

        fn outcome(&self) -> Option<GameResult> {
            let looks = self.looks.get();
            self.looks.set(looks + 1);
            if looks == 0 {
                None
            } else {
                Some(GameResult::Draw)
            }
        }

        fn piece_count(&self, _color: Color, _piece_type: u8) -> u32 {
            0
        }
    }

    #[test]
    fn iteration_without_a_root_move_is_an_invariant_violation() {
        let position = FinishesAfterFirstLook { looks: Cell::new(0) };
        let err = select_move(&position, 2).unwrap_err();
        assert!(matches!(err, SearchError::InvariantViolation { depth: 0, .. }));
    }

    #[test]
    fn zero_depth_is_a_configuration_error() {
        let err = select_move(&Position::new(), 0).unwrap_err();
        assert!(matches!(err, SearchError::Configuration { .. }));
    }

    #[test]
    fn configuration_is_checked_before_terminal_root() {
        let mate = Position::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(matches!(select_move(&mate, 0), Err(SearchError::Configuration { .. })));
        assert_eq!(select_move(&mate, 3).unwrap_err(), SearchError::NoMoveAvailable);
    }

    #[test]
    fn stalemate_root_has_no_move() {
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(select_move(&stalemate, 2).unwrap_err(), SearchError::NoMoveAvailable);
    }

    #[test]
    fn depth_one_from_start() {
        let position = Position::new();
        let result = select_move(&position, 1).unwrap();
        assert!(position.legal_moves().contains(&result.best_move));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.depth, 1);
        assert_eq!(result.nodes_searched, 21);
    }

    #[test]
    fn result_reports_the_deepest_iteration() {
        let result = select_move(&Position::new(), 2).unwrap();
        assert_eq!(result.depth, 2);
        let (mv, score): (Move, Score) = result.into();
        assert_eq!(mv, result.best_move);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn bad_fen_is_a_parse_error() {
        let err = select_move_from_fen("not a fen", &SearchConfig::default()).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn fen_entry_point_finds_mate() {
        let config = SearchConfig::default().with_max_depth(2);
        let result = select_move_from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", &config).unwrap();
        assert_eq!(result.best_move.to_string(), "a1a8");
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn self_play_stops_at_mate() {
        let position = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let config = SearchConfig::default().with_max_depth(2);
        let record = play_game(position, &config, 10).unwrap();
        assert_eq!(record.plies.len(), 1);
        assert_eq!(record.plies[0].best_move.to_string(), "a1a8");
        assert_eq!(record.result, Some(GameResult::WhiteWin));
        assert!(record.final_position.is_checkmate());
    }

    #[test]
    fn self_play_respects_the_ply_limit() {
        let start = Position::from_fen("4k3/8/3p4/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let config = SearchConfig::default().with_max_depth(2);
        let record = play_game(start.clone(), &config, 6).unwrap();
        assert_eq!(record.plies.len(), 6);
        assert_eq!(record.result, None);

        // Every move replays legally from the start
        let mut replay = start;
        for ply in &record.plies {
            replay = replay.try_apply(ply.best_move).unwrap();
        }
        assert_eq!(replay, record.final_position);
    }

    #[test]
    fn self_play_with_no_plies_leaves_the_position() {
        let record = play_game(Position::new(), &SearchConfig::default(), 0).unwrap();
        assert!(record.plies.is_empty());
        assert_eq!(record.final_position, Position::new());
        assert!(matches!(
            play_game(Position::new(), &SearchConfig::default().with_max_depth(0), 4),
            Err(SearchError::Configuration { .. })
        ));
    }
}
