use crate::types::*;

pub type Bitboard = u64;

pub const BITBOARD_EMPTY: Bitboard = 0;

pub const RANK_1: Bitboard = 0x00000000000000FF;
pub const RANK_8: Bitboard = 0xFF00000000000000;

pub const LIGHT_SQUARES: Bitboard = 0x55AA55AA55AA55AA;
pub const DARK_SQUARES: Bitboard = 0xAA55AA55AA55AA55;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
const KING_OFFSETS: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

// Attack masks for the leaping pieces, built at compile time
pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(KNIGHT_OFFSETS);
pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(KING_OFFSETS);

const fn leaper_table(offsets: [(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut square = 0;
    while square < 64 {
        let file = (square % 8) as i8;
        let rank = (square / 8) as i8;
        let mut i = 0;
        while i < 8 {
            let (df, dr) = offsets[i];
            let new_file = file + df;
            let new_rank = rank + dr;
            if new_file >= 0 && new_file < 8 && new_rank >= 0 && new_rank < 8 {
                table[square] |= 1u64 << (new_rank * 8 + new_file);
            }
            i += 1;
        }
        square += 1;
    }
    table
}

pub fn square_to_bitboard(square: Square) -> Bitboard {
    1u64 << square.0
}

pub fn get_bit(bitboard: Bitboard, square: Square) -> bool {
    bitboard & square_to_bitboard(square) != 0
}

pub fn count_bits(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

pub fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.0 as usize]
}

pub fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.0 as usize]
}

/// Squares a pawn of `color` on `square` attacks.
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    let dr = if color == WHITE { 1 } else { -1 };
    [-1, 1]
        .iter()
        .filter_map(|&df| square.offset(df, dr))
        .fold(BITBOARD_EMPTY, |acc, target| acc | square_to_bitboard(target))
}

/// Ray attacks from `square` along `directions`, stopping at the first
/// occupied square (which is included).
pub fn sliding_attacks(square: Square, occupied: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut attacks = BITBOARD_EMPTY;
    for &(df, dr) in directions {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            attacks |= square_to_bitboard(next);
            if get_bit(occupied, next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

// Pop LSB (remove and return the least significant bit)
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<Square> {
    if *bitboard == 0 {
        None
    } else {
        let lsb = bitboard.trailing_zeros() as u8;
        *bitboard &= *bitboard - 1;
        Some(Square(lsb))
    }
}

// Pop MSB (remove and return the most significant bit)
pub fn pop_msb(bitboard: &mut Bitboard) -> Option<Square> {
    if *bitboard == 0 {
        None
    } else {
        let msb = 63 - bitboard.leading_zeros() as u8;
        *bitboard &= !(1u64 << msb);
        Some(Square(msb))
    }
}

/// Ascending square order (a1 first).
pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        pop_lsb(&mut self.bitboard)
    }
}

/// Descending square order (h8 first). Move generation walks boards this way.
pub struct ReverseBitboardIterator {
    bitboard: Bitboard,
}

impl Iterator for ReverseBitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        pop_msb(&mut self.bitboard)
    }
}

pub fn iterate_bits(bitboard: Bitboard) -> BitboardIterator {
    BitboardIterator { bitboard }
}

pub fn iterate_bits_reversed(bitboard: Bitboard) -> ReverseBitboardIterator {
    ReverseBitboardIterator { bitboard }
}
