use engine::Move;

/// Position score from White's point of view.
pub type Score = f64;

/// Default piece values, pawn through queen.
pub const PIECE_VALUES: [Score; 5] = [1.0, 3.0, 3.0, 5.0, 9.0];

/// Material of one side's full starting army.
pub const MATERIAL_NORMALIZATION: Score = 39.0;

/// Terminal magnitude on the centered scale, beyond any material balance.
pub const CENTERED_WIN: Score = 100.0;

pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Best root move of a completed search iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<M = Move> {
    pub best_move: M,
    pub score: Score,
    pub depth: u32,
    pub nodes_searched: u64,
}

impl<M> From<SearchResult<M>> for (M, Score) {
    fn from(result: SearchResult<M>) -> Self {
        (result.best_move, result.score)
    }
}

/// Counters filled in by a single search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}
