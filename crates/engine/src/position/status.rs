use super::Position;
use crate::bitboard::*;
use crate::types::*;

impl Position {
    /// How the game ended in this position, if it has.
    ///
    /// Checked in order: checkmate, insufficient material, stalemate, the
    /// seventy-five-move rule and fivefold repetition.
    pub fn outcome(&self) -> Option<Outcome> {
        let has_moves = self.has_legal_move();

        if !has_moves && self.is_in_check() {
            return Some(Outcome::checkmate(opposite_color(self.side_to_move)));
        }
        if self.is_insufficient_material() {
            return Some(Outcome::draw(Termination::InsufficientMaterial));
        }
        if !has_moves {
            return Some(Outcome::draw(Termination::Stalemate));
        }
        if self.is_seventyfive_moves() {
            return Some(Outcome::draw(Termination::SeventyFiveMoves));
        }
        if self.is_fivefold_repetition() {
            return Some(Outcome::draw(Termination::FivefoldRepetition));
        }
        None
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_move()
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        self.has_insufficient_material(WHITE) && self.has_insufficient_material(BLACK)
    }

    /// `color` cannot deliver mate by any sequence of legal moves.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let ours = self.pieces_of(color);
        let heavy = self.pieces(color, PAWN) | self.pieces(color, ROOK) | self.pieces(color, QUEEN);
        if heavy != BITBOARD_EMPTY {
            return false;
        }

        if self.pieces(color, KNIGHT) != BITBOARD_EMPTY {
            // A lone knight mates only against a blocking piece that is not a queen
            let theirs = self.pieces_of(opposite_color(color));
            let their_blockers = theirs & !self.pieces_of_type(KING) & !self.pieces_of_type(QUEEN);
            return count_bits(ours) <= 2 && their_blockers == BITBOARD_EMPTY;
        }

        if self.pieces(color, BISHOP) != BITBOARD_EMPTY {
            let bishops = self.pieces_of_type(BISHOP);
            let same_color = bishops & DARK_SQUARES == BITBOARD_EMPTY || bishops & LIGHT_SQUARES == BITBOARD_EMPTY;
            let no_pawns_or_knights = self.pieces_of_type(PAWN) == BITBOARD_EMPTY && self.pieces_of_type(KNIGHT) == BITBOARD_EMPTY;
            return same_color && no_pawns_or_knights;
        }

        true
    }

    /// 150 half-moves without a capture or pawn move.
    pub fn is_seventyfive_moves(&self) -> bool {
        self.half_move_clock >= 150 && self.has_legal_move()
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// How often the current position has occurred since the last
    /// irreversible move, this occurrence included.
    pub fn repetition_count(&self) -> usize {
        match self.repetition_keys.last() {
            Some(current) => self.repetition_keys.iter().filter(|&key| key == current).count(),
            None => 1,
        }
    }
}
