use crate::types::*;

/// Zobrist hash keys for position hashing
pub struct ZobristKeys {
    pieces: [[u64; 64]; 12], // [piece index][square]
    side_to_move: u64,
    castling_rights: [u64; 16],
    en_passant: [u64; 8], // by file
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate();

const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    const fn generate() -> Self {
        let mut keys = ZobristKeys {
            pieces: [[0; 64]; 12],
            side_to_move: 0,
            castling_rights: [0; 16],
            en_passant: [0; 8],
        };
        let mut state = 0x2545F4914F6CDD1D;

        let mut piece = 0;
        while piece < 12 {
            let mut square = 0;
            while square < 64 {
                let (next, key) = splitmix64(state);
                keys.pieces[piece][square] = key;
                state = next;
                square += 1;
            }
            piece += 1;
        }

        let (next, key) = splitmix64(state);
        keys.side_to_move = key;
        state = next;

        let mut i = 0;
        while i < 16 {
            let (next, key) = splitmix64(state);
            keys.castling_rights[i] = key;
            state = next;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            let (next, key) = splitmix64(state);
            keys.en_passant[i] = key;
            state = next;
            i += 1;
        }

        keys
    }

    /// Hash of piece placement, side to move, castling rights and the
    /// en-passant file (pass `None` unless the capture is actually playable).
    pub fn hash(&self, squares: &[Piece; 64], side_to_move: Color, castling_rights: u8, en_passant_file: Option<u8>) -> u64 {
        let mut hash = 0u64;

        for (index, &piece) in squares.iter().enumerate() {
            if !is_empty(piece) {
                let piece_index = (piece_type(piece) - 1) as usize + if piece_color(piece) == WHITE { 0 } else { 6 };
                hash ^= self.pieces[piece_index][index];
            }
        }

        if side_to_move == BLACK {
            hash ^= self.side_to_move;
        }

        hash ^= self.castling_rights[castling_rights as usize & 15];

        if let Some(file) = en_passant_file {
            hash ^= self.en_passant[file as usize & 7];
        }

        hash
    }
}
