use engine::{Color, GameResult, BISHOP, BLACK, KNIGHT, PAWN, QUEEN, ROOK, WHITE};

use crate::error::{SearchError, SearchOutcome};
use crate::types::*;

/// Material value per piece type. Kings are never counted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceValues {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
}

impl PieceValues {
    pub fn value(&self, piece_type: u8) -> Score {
        match piece_type {
            PAWN => self.pawn,
            KNIGHT => self.knight,
            BISHOP => self.bishop,
            ROOK => self.rook,
            QUEEN => self.queen,
            _ => 0.0,
        }
    }

    fn all(&self) -> [Score; 5] {
        [self.pawn, self.knight, self.bishop, self.rook, self.queen]
    }

    /// Largest material balance any legal position can reach: fifteen of
    /// the most valuable piece against a bare king.
    pub fn max_balance(&self) -> Score {
        MAX_NON_KING_PIECES * self.all().iter().copied().fold(0.0, Score::max)
    }
}

const MAX_NON_KING_PIECES: Score = 15.0;

impl Default for PieceValues {
    fn default() -> Self {
        let [pawn, knight, bishop, rook, queen] = PIECE_VALUES;
        Self { pawn, knight, bishop, rook, queen }
    }
}

/// How decided games are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalScale {
    /// White win 1, draw 0.5, Black win 0. Not on the material axis.
    #[default]
    Legacy,
    /// White win `CENTERED_WIN`, draw 0, Black win `-CENTERED_WIN`.
    Centered,
}

impl TerminalScale {
    pub fn score(self, result: GameResult) -> Score {
        match (self, result) {
            (TerminalScale::Legacy, GameResult::WhiteWin) => 1.0,
            (TerminalScale::Legacy, GameResult::BlackWin) => 0.0,
            (TerminalScale::Legacy, GameResult::Draw) => 0.5,
            (TerminalScale::Centered, GameResult::WhiteWin) => CENTERED_WIN,
            (TerminalScale::Centered, GameResult::BlackWin) => -CENTERED_WIN,
            (TerminalScale::Centered, GameResult::Draw) => 0.0,
        }
    }
}

/// Settings for evaluation and search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub piece_values: PieceValues,
    /// Material balance is divided by this
    pub normalization: Score,
    /// Side whose turns take the maximum
    pub maximizing_color: Color,
    pub max_depth: u32,
    pub terminal_scale: TerminalScale,
}

impl SearchConfig {
    pub fn with_piece_values(mut self, piece_values: PieceValues) -> Self {
        self.piece_values = piece_values;
        self
    }

    pub fn with_normalization(mut self, normalization: Score) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_maximizing_color(mut self, color: Color) -> Self {
        self.maximizing_color = color;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_terminal_scale(mut self, terminal_scale: TerminalScale) -> Self {
        self.terminal_scale = terminal_scale;
        self
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> SearchOutcome<()> {
        if self.max_depth < 1 {
            return Err(SearchError::configuration(format!(
                "max_depth must be at least 1, got {}",
                self.max_depth
            )));
        }
        if !self.normalization.is_finite() || self.normalization <= 0.0 {
            return Err(SearchError::configuration(format!(
                "normalization must be a positive finite number, got {}",
                self.normalization
            )));
        }
        if self.piece_values.all().iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(SearchError::configuration("piece values must be finite and non-negative"));
        }
        if self.terminal_scale == TerminalScale::Centered {
            let max_score = self.piece_values.max_balance() / self.normalization;
            if max_score >= CENTERED_WIN {
                return Err(SearchError::configuration(format!(
                    "material can reach {} on the centered scale, at or above the win score {}",
                    max_score, CENTERED_WIN
                )));
            }
        }
        if self.maximizing_color != WHITE && self.maximizing_color != BLACK {
            return Err(SearchError::configuration(format!(
                "unknown maximizing color {}",
                self.maximizing_color
            )));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            piece_values: PieceValues::default(),
            normalization: MATERIAL_NORMALIZATION,
            maximizing_color: WHITE,
            max_depth: DEFAULT_MAX_DEPTH,
            terminal_scale: TerminalScale::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.piece_values.value(QUEEN), 9.0);
        assert_eq!(config.piece_values.value(engine::KING), 0.0);
        assert_eq!(config.normalization, 39.0);
        assert_eq!(config.maximizing_color, WHITE);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.terminal_scale, TerminalScale::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_depth() {
        let err = SearchConfig::default().with_max_depth(0).validate().unwrap_err();
        assert!(matches!(err, SearchError::Configuration { .. }));
    }

    #[test]
    fn rejects_bad_normalization() {
        for normalization in [0.0, -39.0, Score::NAN, Score::INFINITY] {
            let config = SearchConfig::default().with_normalization(normalization);
            assert!(matches!(config.validate(), Err(SearchError::Configuration { .. })));
        }
    }

    #[test]
    fn rejects_negative_piece_values() {
        let values = PieceValues { pawn: -1.0, ..PieceValues::default() };
        let config = SearchConfig::default().with_piece_values(values);
        assert!(matches!(config.validate(), Err(SearchError::Configuration { .. })));
    }

    #[test]
    fn centered_wins_stay_above_material() {
        assert_eq!(PieceValues::default().max_balance(), 135.0);

        let centered = SearchConfig::default().with_terminal_scale(TerminalScale::Centered);
        assert!(centered.validate().is_ok());

        // An extra queen would be worth 900 against a win of 100
        let inflated = centered.clone().with_normalization(0.01);
        assert!(matches!(inflated.validate(), Err(SearchError::Configuration { .. })));

        // The same normalization is fine on the legacy scale
        let legacy = SearchConfig::default().with_normalization(0.01);
        assert!(legacy.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_color() {
        let config = SearchConfig::default().with_maximizing_color(3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn terminal_scales() {
        assert_eq!(TerminalScale::Legacy.score(GameResult::WhiteWin), 1.0);
        assert_eq!(TerminalScale::Legacy.score(GameResult::Draw), 0.5);
        assert_eq!(TerminalScale::Legacy.score(GameResult::BlackWin), 0.0);
        assert_eq!(TerminalScale::Centered.score(GameResult::BlackWin), -CENTERED_WIN);
        assert_eq!(TerminalScale::Centered.score(GameResult::Draw), 0.0);
    }
}
