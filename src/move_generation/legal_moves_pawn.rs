use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::SideScan;
use crate::moves::chess_move::ChessMove;

/// Captures first (toward the a-file, then the h-file), then the single and
/// double pushes. Diagonals are recorded as attacked whether or not a capture
/// is available.
pub fn generate_pawn_moves(scan: &mut SideScan<'_>, from: Square) {
    let color = scan.color;
    let rank = rank_of(from) as i8;
    let file = file_of(from) as i8;
    let ahead = rank + color.forward();

    for file_delta in [-1i8, 1] {
        let Some(to) = square_at(ahead, file + file_delta) else {
            continue;
        };
        scan.data.record_attack(from, to);

        let enemy_on_target = scan
            .board
            .piece_at(to)
            .is_some_and(|piece| piece.color != color);
        if enemy_on_target || scan.en_passant_square == Some(to) {
            push_pawn_move(scan, from, to);
        }
    }

    let Some(one_step) = square_at(ahead, file) else {
        return;
    };
    if scan.board.is_occupied(one_step) {
        return;
    }
    push_pawn_move(scan, from, one_step);

    if rank_of(from) != color.pawn_start_rank() {
        return;
    }
    if let Some(two_step) = square_at(ahead + color.forward(), file) {
        if !scan.board.is_occupied(two_step) {
            scan.moves.push(ChessMove::new(from, two_step));
        }
    }
}

/// Expand a move onto the last rank into one move per promotion piece.
fn push_pawn_move(scan: &mut SideScan<'_>, from: Square, to: Square) {
    if rank_of(to) == scan.color.promotion_rank() {
        for kind in PROMOTION_PIECES {
            scan.moves.push(ChessMove::promoting(from, to, kind));
        }
    } else {
        scan.moves.push(ChessMove::new(from, to));
    }
}
