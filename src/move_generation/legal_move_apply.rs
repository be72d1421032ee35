//! Move execution and reversal on a placement plus its rule state.
//!
//! `apply_move` checks every invariant it relies on before touching the
//! board, so an `Err` always leaves the position as it was. Undo replays the
//! recorded `UndoState` in reverse.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{
    DARK_KING_SIDE_ROOK_HOME, DARK_QUEEN_SIDE_ROOK_HOME, LIGHT_KING_SIDE_ROOK_HOME,
    LIGHT_QUEEN_SIDE_ROOK_HOME,
};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoState;
use crate::moves::chess_move::ChessMove;

/// Placement changes made by one move, needed to reverse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub captured_square: Option<Square>,
}

/// Play `mv` on `board` and return the rule state of the resulting position.
///
/// The returned state has its derived data and result cleared; the caller
/// is expected to regenerate legal moves for it.
pub fn apply_move(
    board: &mut Board,
    state: &BoardState,
    mv: &ChessMove,
) -> ChessResult<(BoardState, AppliedMove)> {
    let moved_piece = board
        .piece_at(mv.from)
        .ok_or_else(|| ChessErrors::EmptyFromSquare(mv.to_string()))?;

    let (captured_piece, captured_square) = find_capture(board, state, mv, moved_piece)?;

    if let Some(square) = captured_square {
        board.take(square);
    }
    board.take(mv.from);
    let placed = match mv.promotion {
        Some(kind) => Piece::new(kind, moved_piece.color),
        None => moved_piece,
    };
    board.set(mv.to, Some(placed));

    if let Some((rook_from, rook_to)) = mv.rook_move {
        let rook = board.take(rook_from);
        board.set(rook_to, rook);
    }

    let mut next = state.successor_base();
    update_castling_rights(&mut next, mv, moved_piece);

    let double_push = moved_piece.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16;
    next.en_passant_square = if double_push {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }

    next.side_to_move = moved_piece.color.opposite();
    if next.side_to_move == Color::Light {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    Ok((
        next,
        AppliedMove {
            moved_piece,
            captured_piece,
            captured_square,
        },
    ))
}

/// Captured piece and its square, including the pawn taken en passant.
fn find_capture(
    board: &Board,
    state: &BoardState,
    mv: &ChessMove,
    moved_piece: Piece,
) -> ChessResult<(Option<Piece>, Option<Square>)> {
    if let Some(taken) = board.piece_at(mv.to) {
        if taken.kind == PieceKind::King {
            return Err(ChessErrors::KingCapture(mv.to_string()));
        }
        return Ok((Some(taken), Some(mv.to)));
    }

    let is_en_passant = moved_piece.kind == PieceKind::Pawn
        && state.en_passant_square == Some(mv.to)
        && file_of(mv.from) != file_of(mv.to);
    if !is_en_passant {
        return Ok((None, None));
    }

    let captured_square = match moved_piece.color {
        Color::Light => mv.to - 8,
        Color::Dark => mv.to + 8,
    };
    match board.piece_at(captured_square) {
        Some(taken) if taken.kind == PieceKind::Pawn && taken.color != moved_piece.color => {
            Ok((Some(taken), Some(captured_square)))
        }
        _ => Err(ChessErrors::EnPassantNonPawn(mv.to_string())),
    }
}

fn update_castling_rights(state: &mut BoardState, mv: &ChessMove, moved_piece: Piece) {
    if moved_piece.kind == PieceKind::King {
        state.revoke_castling(castling_flags_for(moved_piece.color));
    }

    if moved_piece.kind == PieceKind::Rook {
        state.revoke_castling(rook_home_flag(mv.from));
    }

    // Capturing a rook on its home corner also removes the right.
    state.revoke_castling(rook_home_flag(mv.to));
}

fn rook_home_flag(square: Square) -> CastlingRights {
    match square {
        LIGHT_QUEEN_SIDE_ROOK_HOME => CASTLE_LIGHT_QUEENSIDE,
        LIGHT_KING_SIDE_ROOK_HOME => CASTLE_LIGHT_KINGSIDE,
        DARK_QUEEN_SIDE_ROOK_HOME => CASTLE_DARK_QUEENSIDE,
        DARK_KING_SIDE_ROOK_HOME => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

/// Restore the placement recorded in `undo`.
pub fn revert_move(board: &mut Board, undo: &UndoState) {
    let applied = AppliedMove {
        moved_piece: undo.moved_piece,
        captured_piece: undo.captured_piece,
        captured_square: undo.captured_square,
    };
    revert_applied(board, &undo.mv, &applied);
}

/// Reverse the placement changes `apply_move` reported for `mv`.
pub fn revert_applied(board: &mut Board, mv: &ChessMove, applied: &AppliedMove) {
    if let Some((rook_from, rook_to)) = mv.rook_move {
        let rook = board.take(rook_to);
        board.set(rook_from, rook);
    }

    board.take(mv.to);
    board.set(mv.from, Some(applied.moved_piece));

    if let (Some(square), Some(piece)) = (applied.captured_square, applied.captured_piece) {
        board.set(square, Some(piece));
    }
}
