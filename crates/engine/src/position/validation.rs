use super::Position;
use crate::bitboard::*;
use crate::types::*;

/// Whether any piece of `by_color` attacks `square` on the given board.
pub(crate) fn is_attacked_on(squares: &[Piece; 64], square: Square, by_color: Color) -> bool {
    let holds = |target: Square, piece_type: u8| squares[target.0 as usize] == make_piece(piece_type, by_color);

    // A pawn attacks us from wherever one of our own pawns would attack it
    if iterate_bits(pawn_attacks(opposite_color(by_color), square)).any(|target| holds(target, PAWN)) {
        return true;
    }
    if iterate_bits(knight_attacks(square)).any(|target| holds(target, KNIGHT)) {
        return true;
    }
    if iterate_bits(king_attacks(square)).any(|target| holds(target, KING)) {
        return true;
    }

    slider_attacks_on(squares, square, by_color, &ROOK_DIRECTIONS, ROOK)
        || slider_attacks_on(squares, square, by_color, &BISHOP_DIRECTIONS, BISHOP)
}

fn slider_attacks_on(squares: &[Piece; 64], square: Square, by_color: Color, directions: &[(i8, i8)], slider: u8) -> bool {
    for &(df, dr) in directions {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            let piece = squares[next.0 as usize];
            if !is_empty(piece) {
                if piece_color(piece) == by_color && (piece_type(piece) == slider || piece_type(piece) == QUEEN) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

impl Position {
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        is_attacked_on(&self.squares, square, by_color)
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        match self.king_square(self.side_to_move) {
            Some(king) => self.is_square_attacked(king, opposite_color(self.side_to_move)),
            None => false,
        }
    }

    /// Squares the piece on `from` attacks, given the current occupancy.
    pub(crate) fn attacks_from(&self, from: Square, occupied: Bitboard) -> Bitboard {
        let piece = self.get_piece(from);
        match piece_type(piece) {
            PAWN => pawn_attacks(piece_color(piece), from),
            KNIGHT => knight_attacks(from),
            BISHOP => sliding_attacks(from, occupied, &BISHOP_DIRECTIONS),
            ROOK => sliding_attacks(from, occupied, &ROOK_DIRECTIONS),
            QUEEN => {
                sliding_attacks(from, occupied, &BISHOP_DIRECTIONS) | sliding_attacks(from, occupied, &ROOK_DIRECTIONS)
            }
            KING => king_attacks(from),
            _ => BITBOARD_EMPTY,
        }
    }

    /// Whether a pseudo-legal move leaves the mover's king safe. Castling
    /// moves are checked for attacked transit squares during generation, so
    /// only the king's final square matters here.
    pub(crate) fn is_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let moving = self.get_piece(mv.from);
        let mut squares = self.squares;

        if piece_type(moving) == PAWN && Some(mv.to) == self.en_passant_target && mv.from.file() != mv.to.file() {
            let captured = Square::new(mv.to.file(), mv.from.rank());
            squares[captured.0 as usize] = EMPTY;
        }
        squares[mv.to.0 as usize] = moving;
        squares[mv.from.0 as usize] = EMPTY;

        let king = if piece_type(moving) == KING {
            Some(mv.to)
        } else {
            self.king_square(us)
        };

        match king {
            Some(king) => !is_attacked_on(&squares, king, opposite_color(us)),
            None => true,
        }
    }

    /// An en-passant capture is available and legal right now.
    pub fn has_legal_en_passant(&self) -> bool {
        self.en_passant_moves().into_iter().any(|mv| self.is_safe(mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_attacks_by_each_piece_type() {
        let position = Position::from_fen("4k3/8/8/3q4/8/5N2/2P5/4K3 w - - 0 1").unwrap();
        // black queen on d5 hits d1 and a2, white knight on f3 hits e5
        assert!(position.is_square_attacked(Square::new(3, 0), BLACK));
        assert!(position.is_square_attacked(Square::new(0, 1), BLACK));
        assert!(position.is_square_attacked(Square::new(4, 4), WHITE));
        // white pawn on c2 covers b3 and d3
        assert!(position.is_square_attacked(Square::new(1, 2), WHITE));
        assert!(position.is_square_attacked(Square::new(3, 2), WHITE));
        assert!(!position.is_square_attacked(Square::new(2, 2), WHITE));
    }

    #[test]
    fn blocked_slider_does_not_attack() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(!position.is_in_check());
        assert!(position.is_square_attacked(Square::new(4, 1), BLACK));
    }

    #[test]
    fn check_detection() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(position.is_in_check());
    }
}
