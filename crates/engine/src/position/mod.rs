use std::fmt;

use crate::bitboard::*;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub mod fen;
pub mod moves;
pub mod state;
pub mod status;
pub mod validation;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A chess position. Treated as a value: moves are applied with
/// [`Position::apply`], which returns a new position and leaves this one
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) squares: [Piece; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: u8,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) half_move_clock: u16,
    pub(crate) full_move_number: u16,
    // Keys of every position since the last irreversible move, current one last
    pub(crate) repetition_keys: Vec<u64>,
}

impl Position {
    pub fn new() -> Self {
        let mut position = Self::empty();
        position.castling_rights = ALL_CASTLING_RIGHTS;

        let back_rank = [ROOK, KNIGHT, BISHOP, QUEEN, KING, BISHOP, KNIGHT, ROOK];
        for (file, &piece) in back_rank.iter().enumerate() {
            let file = file as u8;
            position.set_piece(Square::new(file, 0), make_piece(piece, WHITE));
            position.set_piece(Square::new(file, 1), make_piece(PAWN, WHITE));
            position.set_piece(Square::new(file, 6), make_piece(PAWN, BLACK));
            position.set_piece(Square::new(file, 7), make_piece(piece, BLACK));
        }

        position.reset_repetition_history();
        position
    }

    pub(crate) fn empty() -> Self {
        Self {
            squares: [EMPTY; 64],
            side_to_move: WHITE,
            castling_rights: 0,
            en_passant_target: None,
            half_move_clock: 0,
            full_move_number: 1,
            repetition_keys: Vec::new(),
        }
    }

    pub fn get_piece(&self, square: Square) -> Piece {
        self.squares[square.0 as usize]
    }

    pub(crate) fn set_piece(&mut self, square: Square, piece: Piece) {
        self.squares[square.0 as usize] = piece;
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> u8 {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }

    pub fn full_move_number(&self) -> u16 {
        self.full_move_number
    }

    pub fn occupied(&self) -> Bitboard {
        self.squares
            .iter()
            .enumerate()
            .filter(|&(_, &piece)| !is_empty(piece))
            .fold(BITBOARD_EMPTY, |acc, (index, _)| acc | (1u64 << index))
    }

    /// All squares holding a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> Bitboard {
        self.squares
            .iter()
            .enumerate()
            .filter(|&(_, &piece)| is_piece_color(piece, color))
            .fold(BITBOARD_EMPTY, |acc, (index, _)| acc | (1u64 << index))
    }

    /// All squares holding a `piece_type` of `color`.
    pub fn pieces(&self, color: Color, piece_type: u8) -> Bitboard {
        let wanted = make_piece(piece_type, color);
        self.squares
            .iter()
            .enumerate()
            .filter(|&(_, &piece)| piece == wanted)
            .fold(BITBOARD_EMPTY, |acc, (index, _)| acc | (1u64 << index))
    }

    /// Squares holding `piece_type` of either color.
    pub fn pieces_of_type(&self, piece_type: u8) -> Bitboard {
        self.pieces(WHITE, piece_type) | self.pieces(BLACK, piece_type)
    }

    pub fn piece_count(&self, color: Color, piece_type: u8) -> u32 {
        count_bits(self.pieces(color, piece_type))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        iterate_bits(self.pieces(color, KING)).next()
    }

    /// The same position seen from the other side: ranks flipped and
    /// colors swapped, with the other side to move.
    pub fn mirror(&self) -> Self {
        let mut mirrored = Self::empty();
        for (index, &piece) in self.squares.iter().enumerate() {
            if !is_empty(piece) {
                let square = Square(index as u8).flip_rank();
                mirrored.set_piece(square, make_piece(piece_type(piece), opposite_color(piece_color(piece))));
            }
        }
        mirrored.side_to_move = opposite_color(self.side_to_move);
        mirrored.castling_rights = mirror_castling_rights(self.castling_rights);
        mirrored.en_passant_target = self.en_passant_target.map(|square| square.flip_rank());
        mirrored.half_move_clock = self.half_move_clock;
        mirrored.full_move_number = self.full_move_number;
        mirrored.reset_repetition_history();
        mirrored
    }

    /// Hash identifying this position for repetition purposes.
    pub fn repetition_key(&self) -> u64 {
        let en_passant_file = if self.has_legal_en_passant() {
            self.en_passant_target.map(|square| square.file())
        } else {
            None
        };
        ZOBRIST.hash(&self.squares, self.side_to_move, self.castling_rights, en_passant_file)
    }

    pub(crate) fn reset_repetition_history(&mut self) {
        self.repetition_keys.clear();
        let key = self.repetition_key();
        self.repetition_keys.push(key);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let piece = self.get_piece(Square::new(file, rank));
                write!(f, "{} ", piece_to_char(piece))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_layout() {
        let position = Position::new();
        assert_eq!(position.get_piece(Square::new(4, 0)), make_piece(KING, WHITE));
        assert_eq!(position.get_piece(Square::new(3, 7)), make_piece(QUEEN, BLACK));
        assert_eq!(position.piece_count(WHITE, PAWN), 8);
        assert_eq!(position.piece_count(BLACK, KNIGHT), 2);
        assert_eq!(count_bits(position.occupied()), 32);
        assert_eq!(position.side_to_move(), WHITE);
        assert_eq!(position.to_fen(), STARTING_FEN);
    }

    #[test]
    fn mirror_swaps_colors_and_ranks() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3Q4/4K3 w - - 0 1").unwrap();
        let mirrored = position.mirror();
        assert_eq!(mirrored.get_piece(Square::new(3, 6)), make_piece(QUEEN, BLACK));
        assert_eq!(mirrored.get_piece(Square::new(4, 7)), make_piece(KING, BLACK));
        assert_eq!(mirrored.side_to_move(), BLACK);
        assert_eq!(mirrored.mirror(), position);
    }

    #[test]
    fn display_shows_board_and_fen() {
        let text = Position::new().to_string();
        assert!(text.starts_with("8 r n b q k b n r"));
        assert!(text.ends_with(STARTING_FEN));
    }
}
