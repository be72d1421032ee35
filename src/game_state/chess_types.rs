//! Core value types shared by every subsystem.
//!
//! Squares are plain indices (`0 == a1`, `7 == h1`, `63 == h8`), square sets
//! are one-bit-per-square `u64` masks, and pieces are small immutable values
//! that get replaced (never mutated) on promotion.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Board square index (`0..=63`). `None` in an `Option<Square>` is the
/// "no square" sentinel.
pub type Square = u8;

/// Set of squares, one bit per square index.
pub type SquareSet = u64;

pub const EMPTY_SET: SquareSet = 0;
pub const FULL_SET: SquareSet = u64::MAX;

#[inline]
pub const fn square_bit(square: Square) -> SquareSet {
    1u64 << square
}

#[inline]
pub const fn set_contains(set: SquareSet, square: Square) -> bool {
    set & square_bit(square) != 0
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

/// Square index from signed rank/file coordinates, `None` when off the board.
#[inline]
pub const fn square_at(rank: i8, file: i8) -> Option<Square> {
    if rank < 0 || rank > 7 || file < 0 || file > 7 {
        return None;
    }
    Some((rank * 8 + file) as Square)
}

/// Side to move, also used for square colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a pawn step for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Rank index of the back rank (where the king starts).
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase FEN / move-text letter.
    pub const fn short_name(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Inverse of `short_name`, case-insensitive.
    pub fn from_short_name(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Pieces a pawn may promote to, in generation order.
pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for Light, lowercase for Dark.
    pub const fn fen_char(self) -> char {
        let base = self.kind.short_name();
        match self.color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_short_name(ch).map(|kind| Piece::new(kind, color))
    }
}

/// Compact castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

#[inline]
pub const fn castling_flag(color: Color, king_side: bool) -> CastlingRights {
    match (color, king_side) {
        (Color::Light, true) => CASTLE_LIGHT_KINGSIDE,
        (Color::Light, false) => CASTLE_LIGHT_QUEENSIDE,
        (Color::Dark, true) => CASTLE_DARK_KINGSIDE,
        (Color::Dark, false) => CASTLE_DARK_QUEENSIDE,
    }
}

/// Both castling flags of one side.
#[inline]
pub const fn castling_flags_for(color: Color) -> CastlingRights {
    castling_flag(color, true) | castling_flag(color, false)
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Checkmate,
    Stalemate,
    DrawInsufficientMaterial,
    DrawThreefoldRepetition,
    DrawFiftyMoveRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_helpers_agree_on_corners() {
        assert_eq!(square_at(0, 0), Some(0));
        assert_eq!(square_at(7, 7), Some(63));
        assert_eq!(square_at(8, 0), None);
        assert_eq!(square_at(0, -1), None);
        assert_eq!(rank_of(28), 3);
        assert_eq!(file_of(28), 4);
        assert!(set_contains(square_bit(28), 28));
    }

    #[test]
    fn fen_chars_round_trip_through_pieces() {
        for ch in "pnbrqkPNBRQK".chars() {
            let piece = Piece::from_fen_char(ch).expect("valid piece letter");
            assert_eq!(piece.fen_char(), ch);
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn castling_flags_are_distinct_per_side() {
        assert_eq!(
            castling_flags_for(Color::Light) | castling_flags_for(Color::Dark),
            0b1111
        );
        assert_eq!(castling_flags_for(Color::Light) & castling_flags_for(Color::Dark), 0);
    }
}
