use super::Position;
use crate::error::{EngineError, EngineResult};
use crate::types::*;

impl Position {
    /// Parse a FEN string. The halfmove clock and fullmove number may be
    /// omitted, in which case they default to `0 1`.
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 4 && parts.len() != 6 {
            return Err(EngineError::fen(fen, "expected 4 or 6 fields"));
        }

        let mut position = Self::empty();

        position.parse_piece_placement(fen, parts[0])?;

        position.side_to_move = match parts[1] {
            "w" => WHITE,
            "b" => BLACK,
            other => return Err(EngineError::fen(fen, format!("invalid active color '{}'", other))),
        };

        position.parse_castling_rights(fen, parts[2])?;
        position.parse_en_passant(fen, parts[3])?;

        if parts.len() == 6 {
            position.half_move_clock = parts[4]
                .parse()
                .map_err(|_| EngineError::fen(fen, "invalid halfmove clock"))?;
            position.full_move_number = parts[5]
                .parse()
                .map_err(|_| EngineError::fen(fen, "invalid fullmove number"))?;
            if position.full_move_number == 0 {
                return Err(EngineError::fen(fen, "fullmove number starts at 1"));
            }
        }

        position.validate(fen)?;
        position.reset_repetition_history();
        Ok(position)
    }

    fn parse_piece_placement(&mut self, fen: &str, placement: &str) -> EngineResult<()> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::fen(fen, "piece placement must have 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            // FEN starts from rank 8
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;

            for ch in rank_str.chars() {
                if let Some(empty_squares) = ch.to_digit(10) {
                    if !(1..=8).contains(&empty_squares) {
                        return Err(EngineError::fen(fen, format!("invalid empty run '{}'", ch)));
                    }
                    file += empty_squares as u8;
                } else {
                    let piece = char_to_piece(ch)
                        .ok_or_else(|| EngineError::fen(fen, format!("unknown piece '{}'", ch)))?;
                    if file >= 8 {
                        return Err(EngineError::fen(fen, format!("too many squares on rank {}", rank + 1)));
                    }
                    self.set_piece(Square::new(file, rank), piece);
                    file += 1;
                }

                if file > 8 {
                    return Err(EngineError::fen(fen, format!("too many squares on rank {}", rank + 1)));
                }
            }

            if file != 8 {
                return Err(EngineError::fen(fen, format!("incomplete rank {}", rank + 1)));
            }
        }

        Ok(())
    }

    fn parse_castling_rights(&mut self, fen: &str, castling_str: &str) -> EngineResult<()> {
        if castling_str == "-" {
            self.castling_rights = 0;
            return Ok(());
        }

        for ch in castling_str.chars() {
            match ch {
                'K' => self.castling_rights |= WHITE_KINGSIDE,
                'Q' => self.castling_rights |= WHITE_QUEENSIDE,
                'k' => self.castling_rights |= BLACK_KINGSIDE,
                'q' => self.castling_rights |= BLACK_QUEENSIDE,
                _ => return Err(EngineError::fen(fen, format!("invalid castling right '{}'", ch))),
            }
        }

        // Rights without the king and rook in place cannot be used
        let home = [
            (WHITE_KINGSIDE, WHITE, 0, 7),
            (WHITE_QUEENSIDE, WHITE, 0, 0),
            (BLACK_KINGSIDE, BLACK, 7, 7),
            (BLACK_QUEENSIDE, BLACK, 7, 0),
        ];
        for (right, color, rank, rook_file) in home {
            let king_home = self.get_piece(Square::new(4, rank)) == make_piece(KING, color);
            let rook_home = self.get_piece(Square::new(rook_file, rank)) == make_piece(ROOK, color);
            if !(king_home && rook_home) {
                remove_castling_right(&mut self.castling_rights, right);
            }
        }

        Ok(())
    }

    fn parse_en_passant(&mut self, fen: &str, en_passant_str: &str) -> EngineResult<()> {
        if en_passant_str == "-" {
            self.en_passant_target = None;
            return Ok(());
        }

        let target = Square::from_algebraic(en_passant_str)
            .map_err(|_| EngineError::fen(fen, format!("invalid en passant square '{}'", en_passant_str)))?;

        // The target sits behind a pawn that just moved two squares
        let expected_rank = if self.side_to_move == WHITE { 5 } else { 2 };
        if target.rank() != expected_rank {
            return Err(EngineError::fen(fen, format!("en passant square '{}' on wrong rank", en_passant_str)));
        }

        self.en_passant_target = Some(target);
        Ok(())
    }

    fn validate(&self, fen: &str) -> EngineResult<()> {
        for color in [WHITE, BLACK] {
            if self.piece_count(color, KING) != 1 {
                return Err(EngineError::fen(fen, format!("{} must have exactly one king", color_name(color))));
            }
        }

        let back_ranks = crate::bitboard::RANK_1 | crate::bitboard::RANK_8;
        if self.pieces_of_type(PAWN) & back_ranks != 0 {
            return Err(EngineError::fen(fen, "pawns on the first or last rank"));
        }

        let opponent_king = self.king_square(opposite_color(self.side_to_move));
        if let Some(king) = opponent_king {
            if self.is_square_attacked(king, self.side_to_move) {
                return Err(EngineError::fen(fen, "side not to move is in check"));
            }
        }

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let piece = self.get_piece(Square::new(file, rank));
                if is_empty(piece) {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece_to_char(piece));
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = if self.side_to_move == WHITE { "w" } else { "b" };

        let mut castling = String::new();
        for (right, ch) in [(WHITE_KINGSIDE, 'K'), (WHITE_QUEENSIDE, 'Q'), (BLACK_KINGSIDE, 'k'), (BLACK_QUEENSIDE, 'q')] {
            if has_castling_right(self.castling_rights, right) {
                castling.push(ch);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        // Only written when the capture can actually be played
        let en_passant = match self.en_passant_target {
            Some(square) if self.has_legal_en_passant() => square.to_string(),
            _ => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement, side, castling, en_passant, self.half_move_clock, self.full_move_number
        )
    }
}
