//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and square
//! indices, reused by the FEN codec, move text, and diagnostics.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, Square, SquareSet};

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    if square.len() != 2 {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    }
    algebraic_to_square_at(square, 0)
}

/// Read the two-character coordinate starting at byte `offset` of `text`.
pub fn algebraic_to_square_at(text: &str, offset: usize) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    let (Some(&file), Some(&rank)) = (bytes.get(offset), bytes.get(offset + 1)) else {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    };

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Comma-separated coordinates of every square in `set`, in index order.
pub fn square_set_to_algebraic(set: SquareSet) -> String {
    (0..64u8)
        .filter(|sq| set & (1u64 << sq) != 0)
        .map(square_to_algebraic)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
        for sq in 0..64u8 {
            assert_eq!(algebraic_to_square(&square_to_algebraic(sq)), Ok(sq));
        }
    }

    #[test]
    fn offset_reads_inside_move_text() {
        assert_eq!(algebraic_to_square_at("e2e4", 0), Ok(12));
        assert_eq!(algebraic_to_square_at("e2e4", 2), Ok(28));
        assert!(algebraic_to_square_at("e2e", 2).is_err());
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
        assert!(algebraic_to_square("a1b").is_err());
    }

    #[test]
    fn square_sets_render_in_index_order() {
        assert_eq!(square_set_to_algebraic((1 << 28) | (1 << 0)), "a1,e4");
        assert_eq!(square_set_to_algebraic(0), "");
    }
}
