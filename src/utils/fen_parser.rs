//! FEN-to-position parser.
//!
//! Builds placement and rule state from a Forsyth-Edwards Notation string:
//! placement, side to move, castling rights, en-passant target, and clocks.
//! Input is validated completely before anything is written to the target.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

/// Parse a FEN string into a fresh board and state.
pub fn parse_fen(fen: &str) -> ChessResult<(Board, BoardState)> {
    let mut board = Board::new_empty();
    let mut state = BoardState::default();
    parse_fen_into(&mut board, &mut state, fen)?;
    Ok((board, state))
}

/// Populate an empty `board` and its `state` from `fen`.
///
/// Fails with `BoardAlreadyPopulated` if `board` already holds a piece. On
/// any error neither target is modified.
pub fn parse_fen_into(board: &mut Board, state: &mut BoardState, fen: &str) -> ChessResult<()> {
    if !board.is_empty() {
        return Err(ChessErrors::BoardAlreadyPopulated);
    }

    let mut parts = fen.split_whitespace();
    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut parsed_board = Board::new_empty();
    parse_board(board_part, &mut parsed_board)?;
    for color in [Color::Light, Color::Dark] {
        if parsed_board.count_kings(color) > 1 {
            return Err(invalid(&format!("more than one {color:?} king")));
        }
    }

    let side_to_move = parse_side_to_move(side_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    if let Some(square) = en_passant_square {
        check_en_passant_square(&parsed_board, side_to_move, square, en_passant_part)?;
    }

    let parsed_state = BoardState {
        side_to_move,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square,
        halfmove_clock: halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?,
        fullmove_number: fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?,
        ..BoardState::default()
    };

    *board = parsed_board;
    *state = parsed_state;
    Ok(())
}

fn invalid(what: &str) -> ChessErrors {
    ChessErrors::InvalidFen(what.to_owned())
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessErrors::InvalidPieceChar(ch))?;
            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            board.set(board_rank * 8 + file, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("side-to-move field '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(&format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    // Only the squares skipped by a two-step push qualify.
    if rank_of(square) != 2 && rank_of(square) != 5 {
        return Err(invalid(&format!("en-passant square '{en_passant_part}'")));
    }
    Ok(Some(square))
}

/// The target must sit behind a pawn of the side that just moved, on the
/// rank that side skipped with its two-step push.
fn check_en_passant_square(
    board: &Board,
    side_to_move: Color,
    square: Square,
    en_passant_part: &str,
) -> ChessResult<()> {
    let pushed = side_to_move.opposite();
    let (expected_rank, pawn_square) = match pushed {
        Color::Light => (2, square + 8),
        Color::Dark => (5, square.wrapping_sub(8)),
    };

    if rank_of(square) != expected_rank
        || board.piece_at(pawn_square) != Some(Piece::new(PieceKind::Pawn, pushed))
    {
        return Err(invalid(&format!(
            "en-passant square '{en_passant_part}' with {side_to_move:?} to move"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn parse_starting_fen() {
        let (board, state) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(state.side_to_move, Color::Light);
        assert_eq!(state.fullmove_number, 1);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.castling_rights, 0b1111);
        assert_eq!(state.en_passant_square, None);
        assert_eq!(board.piece_at(4), Some(Piece::new(PieceKind::King, Color::Light)));
        assert_eq!(board.piece_at(59), Some(Piece::new(PieceKind::Queen, Color::Dark)));
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn parse_reads_en_passant_and_clocks() {
        let (_, state) =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 3 41").expect("FEN should parse");
        assert_eq!(state.en_passant_square, Some(43));
        assert_eq!(state.halfmove_clock, 3);
        assert_eq!(state.fullmove_number, 41);
        assert_eq!(state.castling_rights, 0);
    }

    #[test]
    fn parse_rejects_unknown_piece_letter() {
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/4X2K w - - 0 1").map(|_| ()),
            Err(ChessErrors::InvalidPieceChar('X'))
        );
    }

    #[test]
    fn parse_rejects_malformed_fields() {
        assert!(parse_fen("4k3/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1").is_err());
    }

    #[test]
    fn parse_rejects_en_passant_target_without_pushed_pawn() {
        for fen in [
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
            "4k3/8/8/3P4/8/8/8/4K3 w - d6 0 1",
            "4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1",
            "4k3/8/8/3p4/8/8/8/4K3 b - d6 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessErrors::InvalidFen(_))),
                "{fen} should be rejected"
            );
        }

        let (_, state) =
            parse_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_eq!(state.en_passant_square, Some(20));
    }

    #[test]
    fn parse_rejects_second_king_but_allows_a_missing_one() {
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(ChessErrors::InvalidFen(_))
        ));

        let (board, _) = parse_fen("8/4q3/8/8/8/4R3/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(board.count_kings(Color::Dark), 0);
    }

    #[test]
    fn parse_into_populated_board_fails_and_leaves_it_untouched() {
        let (mut board, mut state) =
            parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let before = board.clone();

        let err = parse_fen_into(&mut board, &mut state, "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(err, Err(ChessErrors::BoardAlreadyPopulated));
        assert_eq!(board, before);
    }
}
