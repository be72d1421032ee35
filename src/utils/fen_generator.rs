//! Position-to-FEN serializer.
//!
//! `generate_fen` is the byte-exact inverse of the parser. The repetition key
//! drops the two clock fields so positions that differ only in move counters
//! compare equal.

use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(board: &Board, state: &BoardState) -> String {
    format!(
        "{} {} {}",
        generate_repetition_key(board, state),
        state.halfmove_clock,
        state.fullmove_number
    )
}

/// Placement, side to move, castling rights, and en-passant target.
pub fn generate_repetition_key(board: &Board, state: &BoardState) -> String {
    let side_to_move = match state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{} {} {} {}",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(state.castling_rights),
        generate_en_passant_field(state.en_passant_square)
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            if let Some(piece) = board.piece_at(rank * 8 + file) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if (rights & CASTLE_LIGHT_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_LIGHT_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_DARK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_DARK_QUEENSIDE) != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    match square {
        Some(square) => square_to_algebraic(square),
        None => "-".to_owned(),
    }
}
