//! Move text in long algebraic form: `<from><to>[<promotion>]`, e.g. `e2e4`
//! or `e7e8q`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{PieceKind, PROMOTION_PIECES};
use crate::moves::chess_move::ChessMove;
use crate::utils::algebraic::algebraic_to_square_at;

/// Parse move text without reference to a position.
///
/// The result never carries a castling rook pair; resolve it against a
/// position's legal moves (see `GameState::find_move`) to get the full move.
pub fn parse_long_algebraic(text: &str) -> ChessResult<ChessMove> {
    let invalid = || ChessErrors::InvalidLongAlgebraic(text.to_owned());

    if text.len() != 4 && text.len() != 5 {
        return Err(invalid());
    }

    let from = algebraic_to_square_at(text, 0).map_err(|_| invalid())?;
    let to = algebraic_to_square_at(text, 2).map_err(|_| invalid())?;

    match text.as_bytes().get(4) {
        None => Ok(ChessMove::new(from, to)),
        Some(&letter) => {
            let promotion = char_to_promotion(char::from(letter)).ok_or_else(invalid)?;
            Ok(ChessMove::promoting(from, to, promotion))
        }
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    PROMOTION_PIECES
        .into_iter()
        .find(|kind| kind.short_name() == ch)
}
