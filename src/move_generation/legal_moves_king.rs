use crate::game_state::board_state::SideData;
use crate::game_state::chess_rules::{KING_HOME_FILE, KING_SIDE_ROOK_FILE, QUEEN_SIDE_ROOK_FILE};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_ray_moves, SideScan};
use crate::moves::chess_move::ChessMove;
use crate::moves::directions::ALL_DIRECTIONS;

/// What castling needs to know about the position beyond the placement.
pub struct CastlingContext<'a> {
    pub rights: CastlingRights,
    pub in_check: bool,
    pub opponent: &'a SideData,
}

/// One step in every direction, then king-side and queen-side castling when
/// `castling` is given and the king stands on its home square.
pub fn generate_king_moves(
    scan: &mut SideScan<'_>,
    from: Square,
    castling: Option<&CastlingContext<'_>>,
) {
    generate_ray_moves(scan, from, &ALL_DIRECTIONS, true);

    let Some(castling) = castling else {
        return;
    };
    if rank_of(from) != scan.color.home_rank() || file_of(from) != KING_HOME_FILE {
        return;
    }

    for king_side in [true, false] {
        if let Some(mv) = castling_move(scan, from, castling, king_side) {
            scan.moves.push(mv);
        }
    }
}

fn castling_move(
    scan: &SideScan<'_>,
    king_from: Square,
    castling: &CastlingContext<'_>,
    king_side: bool,
) -> Option<ChessMove> {
    let color = scan.color;
    if castling.rights & castling_flag(color, king_side) == 0 || castling.in_check {
        return None;
    }

    let rank = color.home_rank() as i8;
    let (rook_file, step) = if king_side {
        (KING_SIDE_ROOK_FILE as i8, 1i8)
    } else {
        (QUEEN_SIDE_ROOK_FILE as i8, -1i8)
    };

    let rook_from = square_at(rank, rook_file)?;
    if scan.board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
        return None;
    }

    let king_file = KING_HOME_FILE as i8;
    let mut file = king_file + step;
    let mut steps = 1;
    while file != rook_file {
        let square = square_at(rank, file)?;
        if scan.board.is_occupied(square) {
            return None;
        }
        // The king crosses and lands on the first two squares only.
        if steps <= 2 && castling.opponent.attacks(square) {
            return None;
        }
        file += step;
        steps += 1;
    }

    Some(ChessMove::castling(
        king_from,
        square_at(rank, king_file + 2 * step)?,
        rook_from,
        square_at(rank, king_file + step)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn castles(fen: &str, in_check: bool, attacked: &[Square]) -> Vec<String> {
        let (board, state) = parse_fen(fen).expect("FEN should parse");
        let color = state.side_to_move;
        let from = board.king_square(color).expect("king should exist");

        let mut opponent = SideData::default();
        for &square in attacked {
            opponent.record_attack(63, square);
        }
        let context = CastlingContext {
            rights: state.castling_rights,
            in_check,
            opponent: &opponent,
        };

        let mut scan = SideScan::new(&board, color, None);
        generate_king_moves(&mut scan, from, Some(&context));
        scan.moves
            .iter()
            .filter(|mv| mv.is_castling())
            .map(ChessMove::to_string)
            .collect()
    }

    #[test]
    fn both_sides_available_when_clear() {
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", false, &[]),
            vec!["e1g1", "e1c1"]
        );
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", false, &[]),
            vec!["e8g8", "e8c8"]
        );
    }

    #[test]
    fn castling_move_carries_rook_relocation() {
        let (board, _) = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let opponent = SideData::default();
        let context = CastlingContext {
            rights: CASTLE_LIGHT_KINGSIDE,
            in_check: false,
            opponent: &opponent,
        };
        let mut scan = SideScan::new(&board, Color::Light, None);
        generate_king_moves(&mut scan, 4, Some(&context));

        assert!(scan.moves.contains(&ChessMove::castling(4, 6, 7, 5)));
    }

    #[test]
    fn no_castling_out_of_or_through_check() {
        assert!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", true, &[]).is_empty());
        assert_eq!(
            castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", false, &[5]),
            vec!["e1c1"]
        );
        // b1 may be attacked; the king never crosses it.
        assert_eq!(
            castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", false, &[1]),
            vec!["e1g1", "e1c1"]
        );
    }

    #[test]
    fn castling_requires_rights_empty_path_and_rook() {
        assert!(castles("4k3/8/8/8/8/8/8/R3K2R w - - 0 1", false, &[]).is_empty());
        assert_eq!(
            castles("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1", false, &[]),
            vec!["e1g1"]
        );
        assert_eq!(
            castles("4k3/8/8/8/8/8/8/R3K2N w KQ - 0 1", false, &[]),
            vec!["e1c1"]
        );
    }
}
