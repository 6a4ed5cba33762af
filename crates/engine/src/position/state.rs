use super::Position;
use crate::error::EngineResult;
use crate::types::*;

impl Position {
    /// Play `mv` and return the resulting position. The move is assumed to
    /// come from [`Position::legal_moves`]; use [`Position::try_apply`] for
    /// moves from outside.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        let us = self.side_to_move;
        let moving_piece = self.get_piece(mv.from);
        let captured_piece = self.get_piece(mv.to);
        let moving_type = piece_type(moving_piece);

        let is_en_passant = moving_type == PAWN
            && Some(mv.to) == self.en_passant_target
            && mv.from.file() != mv.to.file()
            && is_empty(captured_piece);
        let is_castling = moving_type == KING && mv.from.file() == 4 && mv.from.rank() == mv.to.rank() && (mv.to.file() == 6 || mv.to.file() == 2);

        next.en_passant_target = None;

        if is_en_passant {
            next.set_piece(Square::new(mv.to.file(), mv.from.rank()), EMPTY);
        }

        match mv.promotion {
            Some(promotion) => next.set_piece(mv.to, make_piece(promotion, us)),
            None => next.set_piece(mv.to, moving_piece),
        }
        next.set_piece(mv.from, EMPTY);

        if is_castling {
            let rank = mv.from.rank();
            let (rook_from, rook_to) = if mv.to.file() == 6 { (7, 5) } else { (0, 3) };
            next.set_piece(Square::new(rook_to, rank), make_piece(ROOK, us));
            next.set_piece(Square::new(rook_from, rank), EMPTY);
        }

        next.update_castling_rights(mv, moving_piece);

        if moving_type == PAWN && (mv.to.rank() as i8 - mv.from.rank() as i8).abs() == 2 {
            let between = (mv.from.rank() + mv.to.rank()) / 2;
            next.en_passant_target = Some(Square::new(mv.from.file(), between));
        }

        let is_capture = !is_empty(captured_piece) || is_en_passant;
        if moving_type == PAWN || is_capture {
            next.half_move_clock = 0;
        } else {
            next.half_move_clock = next.half_move_clock.saturating_add(1);
        }

        if us == BLACK {
            next.full_move_number = next.full_move_number.saturating_add(1);
        }
        next.side_to_move = opposite_color(us);

        // Positions before an irreversible move can never recur
        if moving_type == PAWN || is_capture || next.castling_rights != self.castling_rights {
            next.repetition_keys.clear();
        }
        let key = next.repetition_key();
        next.repetition_keys.push(key);

        next
    }

    /// Validate `mv` against the legal moves, then play it.
    pub fn try_apply(&self, mv: Move) -> EngineResult<Position> {
        let text = mv.to_string();
        let mv = self.parse_uci(&text)?;
        Ok(self.apply(mv))
    }

    /// Parse and play a UCI move.
    pub fn apply_uci(&self, text: &str) -> EngineResult<Position> {
        let mv = self.parse_uci(text)?;
        Ok(self.apply(mv))
    }

    fn update_castling_rights(&mut self, mv: Move, moving_piece: Piece) {
        if piece_type(moving_piece) == KING {
            if piece_color(moving_piece) == WHITE {
                remove_castling_right(&mut self.castling_rights, WHITE_KINGSIDE | WHITE_QUEENSIDE);
            } else {
                remove_castling_right(&mut self.castling_rights, BLACK_KINGSIDE | BLACK_QUEENSIDE);
            }
        }

        // A rook leaving or being captured on its corner loses that right
        for square in [mv.from, mv.to] {
            match (square.file(), square.rank()) {
                (0, 0) => remove_castling_right(&mut self.castling_rights, WHITE_QUEENSIDE),
                (7, 0) => remove_castling_right(&mut self.castling_rights, WHITE_KINGSIDE),
                (0, 7) => remove_castling_right(&mut self.castling_rights, BLACK_QUEENSIDE),
                (7, 7) => remove_castling_right(&mut self.castling_rights, BLACK_KINGSIDE),
                _ => {}
            }
        }
    }
}
