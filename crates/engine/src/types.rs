use std::fmt;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Same file, rank seen from the other side of the board.
    pub fn flip_rank(&self) -> Self {
        Self::new(self.file(), 7 - self.rank())
    }

    /// Shift by a file/rank delta, or `None` when that leaves the board.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(text: &str) -> Result<Self, EngineError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::InvalidSquare(text.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file >= 8 || rank >= 8 {
            return Err(EngineError::InvalidSquare(text.to_string()));
        }
        Ok(Self::new(file, rank))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

// 4-bit piece representation
// Bits 0-2: piece type (0=empty, 1=pawn, 2=knight, 3=bishop, 4=rook, 5=queen, 6=king)
// Bit 3: color (0=black, 1=white)
pub type Piece = u8;
pub type Color = u8;

pub const EMPTY: u8 = 0;

// Piece types (bits 0-2)
pub const PAWN: u8 = 1;
pub const KNIGHT: u8 = 2;
pub const BISHOP: u8 = 3;
pub const ROOK: u8 = 4;
pub const QUEEN: u8 = 5;
pub const KING: u8 = 6;

// Colors (bit 3)
pub const BLACK: u8 = 0;
pub const WHITE: u8 = 8;

pub const PROMOTION_PIECES: [u8; 4] = [QUEEN, ROOK, BISHOP, KNIGHT];

pub fn make_piece(piece_type: u8, color: Color) -> Piece {
    piece_type | color
}

pub fn piece_type(piece: Piece) -> u8 {
    piece & 7
}

pub fn piece_color(piece: Piece) -> Color {
    piece & 8
}

pub fn is_empty(piece: Piece) -> bool {
    piece == EMPTY
}

pub fn opposite_color(color: Color) -> Color {
    color ^ WHITE
}

pub fn is_piece_color(piece: Piece, color: Color) -> bool {
    !is_empty(piece) && piece_color(piece) == color
}

pub fn color_name(color: Color) -> &'static str {
    if color == WHITE {
        "white"
    } else {
        "black"
    }
}

pub fn piece_to_char(piece: Piece) -> char {
    let ch = match piece_type(piece) {
        PAWN => 'p',
        KNIGHT => 'n',
        BISHOP => 'b',
        ROOK => 'r',
        QUEEN => 'q',
        KING => 'k',
        _ => '.',
    };
    if piece_color(piece) == WHITE {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

pub fn char_to_piece(ch: char) -> Option<Piece> {
    let piece_type = match ch.to_ascii_lowercase() {
        'p' => PAWN,
        'n' => KNIGHT,
        'b' => BISHOP,
        'r' => ROOK,
        'q' => QUEEN,
        'k' => KING,
        _ => return None,
    };
    let color = if ch.is_ascii_uppercase() { WHITE } else { BLACK };
    Some(make_piece(piece_type, color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<u8>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn new_promotion(from: Square, to: Square, promotion: u8) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Parse UCI long algebraic notation (`e2e4`, `e7e8q`).
    pub fn from_uci(text: &str) -> Result<Self, EngineError> {
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(EngineError::InvalidUci(text.to_string()));
        }
        let from = Square::from_algebraic(&text[0..2])
            .map_err(|_| EngineError::InvalidUci(text.to_string()))?;
        let to = Square::from_algebraic(&text[2..4])
            .map_err(|_| EngineError::InvalidUci(text.to_string()))?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some('q') => Some(QUEEN),
            Some('r') => Some(ROOK),
            Some('b') => Some(BISHOP),
            Some('n') => Some(KNIGHT),
            Some(_) => return Err(EngineError::InvalidUci(text.to_string())),
        };
        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            let ch = piece_to_char(make_piece(promotion, BLACK));
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Who won, from White's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    pub result: GameResult,
}

impl Outcome {
    pub fn draw(termination: Termination) -> Self {
        Self {
            termination,
            result: GameResult::Draw,
        }
    }

    pub fn checkmate(winner: Color) -> Self {
        let result = if winner == WHITE {
            GameResult::WhiteWin
        } else {
            GameResult::BlackWin
        };
        Self {
            termination: Termination::Checkmate,
            result,
        }
    }

    /// PGN-style result string.
    pub fn result_str(&self) -> &'static str {
        match self.result {
            GameResult::WhiteWin => "1-0",
            GameResult::BlackWin => "0-1",
            GameResult::Draw => "1/2-1/2",
        }
    }
}

// Castling rights bitfield constants
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING_RIGHTS: u8 = 0b1111;

pub fn has_castling_right(castling_rights: u8, right: u8) -> bool {
    castling_rights & right != 0
}

pub fn remove_castling_right(castling_rights: &mut u8, right: u8) {
    *castling_rights &= !right;
}

/// Swap each white right with the matching black one.
pub fn mirror_castling_rights(castling_rights: u8) -> u8 {
    ((castling_rights & 0b0011) << 2) | ((castling_rights & 0b1100) >> 2)
}
