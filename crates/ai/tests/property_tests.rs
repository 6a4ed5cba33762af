use ai::*;
use engine::{Position, WHITE};
use proptest::prelude::*;

const SEEDS: [&str; 3] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "4k3/2p5/8/3P4/8/2n5/4P3/R3K3 w Q - 0 1",
];

/// Play random legal moves from a seed position, stopping early if the game
/// ends.
fn random_position(seed: usize, choices: &[usize]) -> Position {
    let mut position = Position::from_fen(SEEDS[seed]).unwrap();
    for &choice in choices {
        if position.is_terminal() {
            break;
        }
        let moves = position.legal_moves();
        position = position.apply(moves[choice % moves.len()]);
    }
    position
}

/// Plain minimax without pruning, with White maximizing.
fn exhaustive(evaluator: &Evaluator, position: &Position, plies_left: u32) -> (Score, Option<engine::Move>) {
    if position.is_terminal() || plies_left == 0 {
        return (evaluator.evaluate(position), None);
    }

    let maximizing = position.side_to_move() == WHITE;
    let mut best: Option<(Score, engine::Move)> = None;
    for mv in position.legal_moves() {
        let (score, _) = exhaustive(evaluator, &position.apply(mv), plies_left - 1);
        let improves = match best {
            None => true,
            Some((best_score, _)) if maximizing => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, mv));
        }
    }

    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (evaluator.evaluate(position), None),
    }
}

fn position_strategy() -> impl Strategy<Value = Position> {
    (0..SEEDS.len(), prop::collection::vec(any::<usize>(), 0..24))
        .prop_map(|(seed, choices)| random_position(seed, &choices))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn bounds_stay_ordered(position in position_strategy(), depth in 1u32..=4) {
        // Depth four only on the sparse seeds
        let depth = if position.piece_count(WHITE, engine::PAWN) > 4 { depth.min(3) } else { depth };
        let engine = SearchEngine::default().with_max_depth(depth);
        let result = engine.search(&position, &mut SearchStats::default());
        prop_assert!(result.is_ok(), "{:?} in {}", result, position.to_fen());
    }

    #[test]
    fn pruning_matches_exhaustive_minimax(position in position_strategy(), depth in 1u32..=3) {
        prop_assume!(!position.is_terminal());
        let engine = SearchEngine::default().with_max_depth(depth);
        let (score, best_move) = engine.search(&position, &mut SearchStats::default()).unwrap();
        let (expected_score, expected_move) = exhaustive(engine.evaluator(), &position, depth);
        prop_assert_eq!(score, expected_score);
        prop_assert_eq!(best_move, expected_move);
    }

    #[test]
    fn selection_is_deterministic(position in position_strategy(), depth in 1u32..=2) {
        prop_assume!(!position.is_terminal());
        let first = select_move(&position, depth).unwrap();
        let second = select_move(&position, depth).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn mirrored_material_is_negated(position in position_strategy()) {
        prop_assume!(!position.is_terminal());
        let evaluator = Evaluator::default();
        prop_assert_eq!(evaluator.evaluate(&position.mirror()), -evaluator.evaluate(&position));
    }

    #[test]
    fn mirrored_search_is_negated_on_the_centered_scale(position in position_strategy(), depth in 1u32..=2) {
        prop_assume!(!position.is_terminal());
        let config = SearchConfig::default()
            .with_max_depth(depth)
            .with_terminal_scale(TerminalScale::Centered);
        let score = select_move_with_config(&position, &config).unwrap().score;
        let mirrored = select_move_with_config(&position.mirror(), &config).unwrap().score;
        prop_assert_eq!(mirrored, -score);
    }

    #[test]
    fn best_move_reproduces_the_score(position in position_strategy(), depth in 1u32..=3) {
        prop_assume!(!position.is_terminal());
        let result = select_move(&position, depth).unwrap();
        let child = position.apply(result.best_move);
        let engine = SearchEngine::default().with_max_depth(depth - 1);
        let (score, _) = engine.search(&child, &mut SearchStats::default()).unwrap();
        prop_assert_eq!(score, result.score);
    }
}
