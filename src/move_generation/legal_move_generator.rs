//! Full legal move generation pipeline.
//!
//! Runs two scans per ply. The opponent pass (no self-check filtering) builds
//! the opponent attack map, the pins on the mover's pieces, and the paths of
//! any checks. The own pass then generates the mover's pseudo-legal moves and
//! keeps those `would_be_in_check` accepts. Pieces are visited in square
//! order, so the resulting list order is deterministic.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::board_state::{BoardState, PinnedPieces, SideData};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::would_be_in_check;
use crate::move_generation::legal_move_shared::{generate_ray_moves, SideScan};
use crate::move_generation::legal_moves_king::{generate_king_moves, CastlingContext};
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::{
    ALL_DIRECTIONS, BISHOP_DIRECTIONS, KNIGHT_DIRECTIONS, ROOK_DIRECTIONS,
};

struct ScanOutput {
    moves: Vec<ChessMove>,
    data: SideData,
    pinned: PinnedPieces,
}

fn scan_side(
    board: &Board,
    color: Color,
    en_passant_square: Option<Square>,
    castling: Option<&CastlingContext<'_>>,
) -> ScanOutput {
    let mut scan = SideScan::new(board, color, en_passant_square);

    for (from, piece) in board.occupied() {
        if piece.color != color {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(&mut scan, from),
            PieceKind::Knight => generate_ray_moves(&mut scan, from, &KNIGHT_DIRECTIONS, true),
            PieceKind::Bishop => generate_ray_moves(&mut scan, from, &BISHOP_DIRECTIONS, false),
            PieceKind::Rook => generate_ray_moves(&mut scan, from, &ROOK_DIRECTIONS, false),
            PieceKind::Queen => generate_ray_moves(&mut scan, from, &ALL_DIRECTIONS, false),
            PieceKind::King => generate_king_moves(&mut scan, from, castling),
        }
    }

    ScanOutput {
        moves: scan.moves,
        data: scan.data,
        pinned: scan.pinned,
    }
}

/// Legal moves for the side to move.
///
/// Rebuilds `state.side_data` and `state.pinned` for the position as a side
/// effect. The side to move must have a king; the opponent's is optional.
pub fn generate_legal_moves(board: &Board, state: &mut BoardState) -> ChessResult<Vec<ChessMove>> {
    let mover = state.side_to_move;
    let opponent = mover.opposite();
    let mover_king = board.king_square(mover).ok_or(ChessErrors::MissingKing(mover))?;
    let opponent_king = board.king_square(opponent);

    let opponent_scan = scan_side(board, opponent, state.en_passant_square, None);
    let in_check = opponent_scan.data.attacks(mover_king);

    state.pinned = opponent_scan.pinned;
    state.side_data[opponent.index()] = SideData {
        king_square: opponent_king,
        ..opponent_scan.data
    };

    let own_scan = {
        let castling = CastlingContext {
            rights: state.castling_rights,
            in_check,
            opponent: state.side(opponent),
        };
        scan_side(board, mover, state.en_passant_square, Some(&castling))
    };

    // Set only when a malformed position leaves the side not to move in check.
    state.side_data[opponent.index()].in_check =
        opponent_king.is_some_and(|king| own_scan.data.attacks(king));
    state.side_data[mover.index()] = SideData {
        in_check,
        king_square: Some(mover_king),
        ..own_scan.data
    };

    let legal = own_scan
        .moves
        .into_iter()
        .filter(|mv| !would_be_in_check(board, state, mv))
        .collect();

    Ok(legal)
}
