//! Self-check filter for pseudo-legal moves.
//!
//! Decides, from the opponent attack map, the pin table, and the recorded
//! check paths, whether a move would leave the mover's king attacked. No
//! move is ever played on a scratch board to find out.

use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// True when playing `mv` would leave the mover's own king in check.
///
/// Expects `state` to carry the opponent pass of the current ply: the
/// opponent attack map and check paths, and the pins on the mover's pieces.
pub fn would_be_in_check(board: &Board, state: &BoardState, mv: &ChessMove) -> bool {
    let Some(piece) = board.piece_at(mv.from) else {
        return true;
    };
    let opponent = state.side(piece.color.opposite());

    if piece.kind == PieceKind::King {
        return opponent.attacks(mv.to);
    }

    if !state.pinned.allows(mv.from, mv.to) {
        return true;
    }

    let attackers = state
        .side(piece.color)
        .king_square
        .map(|king| opponent.attackers_of(king))
        .unwrap_or(EMPTY_SET);

    if attackers != EMPTY_SET {
        if attackers.count_ones() > 1 {
            return true;
        }
        if set_contains(attackers, mv.to) {
            return false;
        }
        if piece.kind == PieceKind::Pawn
            && state.en_passant_square == Some(mv.to)
            && captures_checker_en_passant(board, attackers, mv.to)
        {
            return false;
        }
    }

    let paths = &opponent.paths_to_opponent_king;
    let blocks_every_path = !paths.is_empty() && paths.iter().all(|path| set_contains(*path, mv.to));
    if blocks_every_path {
        return false;
    }

    attackers != EMPTY_SET
}

/// The lone checker is the pawn that just double-pushed past `en_passant`.
fn captures_checker_en_passant(board: &Board, attackers: SquareSet, en_passant: Square) -> bool {
    let checker = attackers.trailing_zeros() as Square;
    if board.piece_at(checker).map(|p| p.kind) != Some(PieceKind::Pawn) {
        return false;
    }

    let expected_rank = if rank_of(en_passant) == 2 { 3 } else { 4 };
    rank_of(checker) == expected_rank && file_of(checker) == file_of(en_passant)
}
