use std::fmt;

use engine::{Color, GameResult, Move, Position};

/// What the search needs to know about a game.
pub trait Rules: Sized {
    type Move: Copy + PartialEq + fmt::Debug + fmt::Display;

    /// Legal moves in a fixed order; the search visits them in this order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// The position after `mv`, with the other side to move.
    fn apply(&self, mv: Self::Move) -> Self;

    fn side_to_move(&self) -> Color;

    /// Result of a finished game, `None` while play continues.
    fn outcome(&self) -> Option<GameResult>;

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    fn piece_count(&self, color: Color, piece_type: u8) -> u32;
}

impl Rules for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn apply(&self, mv: Move) -> Self {
        Position::apply(self, mv)
    }

    fn side_to_move(&self) -> Color {
        Position::side_to_move(self)
    }

    fn outcome(&self) -> Option<GameResult> {
        Position::outcome(self).map(|outcome| outcome.result)
    }

    fn piece_count(&self, color: Color, piece_type: u8) -> u32 {
        Position::piece_count(self, color, piece_type)
    }
}
