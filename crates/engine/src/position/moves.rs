use super::Position;
use crate::bitboard::*;
use crate::error::{EngineError, EngineResult};
use crate::types::*;

impl Position {
    /// Generate all legal moves for the side to move.
    ///
    /// The order is fixed: pieces other than pawns by descending from-square
    /// (each with descending to-squares), castling kingside then queenside,
    /// pawn captures, single pushes and double pushes by descending square,
    /// then en-passant captures. Promotions expand as queen, rook, bishop,
    /// knight. When in check the king's moves come first.
    pub fn legal_moves(&self) -> Vec<Move> {
        let in_check = self.is_in_check();
        let mut moves: Vec<Move> = self
            .pseudo_legal_moves(!in_check)
            .into_iter()
            .filter(|&mv| self.is_safe(mv))
            .collect();

        if in_check {
            let (king_moves, others): (Vec<Move>, Vec<Move>) = moves
                .into_iter()
                .partition(|mv| piece_type(self.get_piece(mv.from)) == KING);
            moves = king_moves;
            moves.extend(others);
        }

        moves
    }

    /// Whether the side to move has at least one legal move.
    pub fn has_legal_move(&self) -> bool {
        let in_check = self.is_in_check();
        self.pseudo_legal_moves(!in_check).into_iter().any(|mv| self.is_safe(mv))
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Resolve UCI text against this position's legal moves.
    pub fn parse_uci(&self, text: &str) -> EngineResult<Move> {
        let mv = Move::from_uci(text)?;
        if self.is_legal(mv) {
            Ok(mv)
        } else {
            Err(EngineError::IllegalMove {
                mv: text.to_string(),
                fen: self.to_fen(),
            })
        }
    }

    fn pseudo_legal_moves(&self, allow_castling: bool) -> Vec<Move> {
        let us = self.side_to_move;
        let our_pieces = self.pieces_of(us);
        let their_pieces = self.pieces_of(opposite_color(us));
        let occupied = our_pieces | their_pieces;
        let pawns = self.pieces(us, PAWN);
        let mut moves = Vec::with_capacity(64);

        for from in iterate_bits_reversed(our_pieces & !pawns) {
            let targets = self.attacks_from(from, occupied) & !our_pieces;
            for to in iterate_bits_reversed(targets) {
                moves.push(Move::new(from, to));
            }
        }

        if allow_castling {
            self.push_castling_moves(&mut moves);
        }

        if pawns == BITBOARD_EMPTY {
            return moves;
        }

        for from in iterate_bits_reversed(pawns) {
            for to in iterate_bits_reversed(pawn_attacks(us, from) & their_pieces) {
                push_pawn_move(&mut moves, from, to);
            }
        }

        let forward = if us == WHITE { 1 } else { -1 };
        let double_rank = if us == WHITE { 3 } else { 4 };
        let mut single_pushes = BITBOARD_EMPTY;
        for from in iterate_bits(pawns) {
            if let Some(to) = from.offset(0, forward) {
                if !get_bit(occupied, to) {
                    single_pushes |= square_to_bitboard(to);
                }
            }
        }
        let mut double_pushes = BITBOARD_EMPTY;
        for via in iterate_bits(single_pushes) {
            if let Some(to) = via.offset(0, forward) {
                if to.rank() == double_rank && !get_bit(occupied, to) {
                    double_pushes |= square_to_bitboard(to);
                }
            }
        }

        for to in iterate_bits_reversed(single_pushes) {
            if let Some(from) = to.offset(0, -forward) {
                push_pawn_move(&mut moves, from, to);
            }
        }
        for to in iterate_bits_reversed(double_pushes) {
            if let Some(from) = to.offset(0, -2 * forward) {
                moves.push(Move::new(from, to));
            }
        }

        moves.extend(self.en_passant_moves());
        moves
    }

    /// Pseudo-legal en-passant captures, by descending from-square.
    pub(crate) fn en_passant_moves(&self) -> Vec<Move> {
        let target = match self.en_passant_target {
            Some(target) => target,
            None => return Vec::new(),
        };
        if !is_empty(self.get_piece(target)) {
            return Vec::new();
        }

        let us = self.side_to_move;
        let capture_rank = if us == WHITE { 4 } else { 3 };
        let capturers = self.pieces(us, PAWN) & pawn_attacks(opposite_color(us), target);
        iterate_bits_reversed(capturers)
            .filter(|from| from.rank() == capture_rank)
            .map(|from| Move::new(from, target))
            .collect()
    }

    fn push_castling_moves(&self, moves: &mut Vec<Move>) {
        let us = self.side_to_move;
        let (kingside, queenside) = if us == WHITE {
            (WHITE_KINGSIDE, WHITE_QUEENSIDE)
        } else {
            (BLACK_KINGSIDE, BLACK_QUEENSIDE)
        };
        if self.can_castle(us, kingside, true) {
            let rank = self.back_rank(us);
            moves.push(Move::new(Square::new(4, rank), Square::new(6, rank)));
        }
        if self.can_castle(us, queenside, false) {
            let rank = self.back_rank(us);
            moves.push(Move::new(Square::new(4, rank), Square::new(2, rank)));
        }
    }

    fn back_rank(&self, color: Color) -> u8 {
        if color == WHITE {
            0
        } else {
            7
        }
    }

    /// Check if castling is possible for a given color and side. The king
    /// must not be in check, which callers establish beforehand.
    fn can_castle(&self, color: Color, right: u8, kingside: bool) -> bool {
        if !has_castling_right(self.castling_rights, right) {
            return false;
        }

        let rank = self.back_rank(color);
        let king_start = Square::new(4, rank);
        let rook_start = Square::new(if kingside { 7 } else { 0 }, rank);
        if self.get_piece(king_start) != make_piece(KING, color) || self.get_piece(rook_start) != make_piece(ROOK, color) {
            return false;
        }

        let between: &[u8] = if kingside { &[5, 6] } else { &[1, 2, 3] };
        if between.iter().any(|&file| !is_empty(self.get_piece(Square::new(file, rank)))) {
            return false;
        }

        // King may not pass through or land on an attacked square
        let king_path: [u8; 2] = if kingside { [5, 6] } else { [3, 2] };
        let opponent = opposite_color(color);
        !king_path.iter().any(|&file| self.is_square_attacked(Square::new(file, rank), opponent))
    }
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square) {
    if to.rank() == 0 || to.rank() == 7 {
        for &promotion in &PROMOTION_PIECES {
            moves.push(Move::new_promotion(from, to, promotion));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
