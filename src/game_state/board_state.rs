//! Per-ply state snapshot and the derived attack/pin data it carries.
//!
//! `BoardState` holds everything about a position except the placement. The
//! derived parts (`SideData`, `PinnedPieces`) are rebuilt wholesale by the
//! legal move generator on every ply; a snapshot pushed to the history is
//! never modified again.

use crate::game_state::chess_types::*;

/// Attack and check bookkeeping for one side, recomputed every ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideData {
    pub in_check: bool,
    pub king_square: Option<Square>,
    /// `attacked_by_me[target]` is the set of squares holding pieces of this
    /// side that attack `target`.
    pub attacked_by_me: [SquareSet; 64],
    /// Squares between a checking piece and the opponent king, one set per
    /// unobstructed checking ray. Empty for knights and adjacent checkers.
    pub paths_to_opponent_king: Vec<SquareSet>,
}

impl Default for SideData {
    fn default() -> Self {
        Self {
            in_check: false,
            king_square: None,
            attacked_by_me: [EMPTY_SET; 64],
            paths_to_opponent_king: Vec::new(),
        }
    }
}

impl SideData {
    #[inline]
    pub fn attackers_of(&self, square: Square) -> SquareSet {
        self.attacked_by_me[square as usize]
    }

    #[inline]
    pub fn attacks(&self, square: Square) -> bool {
        self.attackers_of(square) != EMPTY_SET
    }

    #[inline]
    pub fn record_attack(&mut self, from: Square, to: Square) {
        self.attacked_by_me[to as usize] |= square_bit(from);
    }

    /// Attacked squares in index order.
    pub fn attacked_squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..64u8).filter(move |sq| self.attacks(*sq))
    }
}

/// Destination restrictions for pinned pieces of the side to move.
///
/// A pinned piece may carry several restrictions (one per pinning ray plus
/// the en-passant special cases); a move must satisfy all of them, so the
/// table stores their intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedPieces {
    allowed: [SquareSet; 64],
}

impl Default for PinnedPieces {
    fn default() -> Self {
        Self {
            allowed: [FULL_SET; 64],
        }
    }
}

impl PinnedPieces {
    #[inline]
    pub fn restrict(&mut self, pinned: Square, allowed: SquareSet) {
        self.allowed[pinned as usize] &= allowed;
    }

    #[inline]
    pub fn is_pinned(&self, square: Square) -> bool {
        self.allowed[square as usize] != FULL_SET
    }

    #[inline]
    pub fn allows(&self, from: Square, to: Square) -> bool {
        set_contains(self.allowed[from as usize], to)
    }
}

/// Full non-placement state of a position at one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub side_to_move: Color,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub castling_rights: CastlingRights,
    pub side_data: [SideData; 2],
    pub pinned: PinnedPieces,
    pub result: Option<GameResult>,
    pub winner: Option<Color>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            side_to_move: Color::Light,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            castling_rights: 0,
            side_data: [SideData::default(), SideData::default()],
            pinned: PinnedPieces::default(),
            result: None,
            winner: None,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn side(&self, color: Color) -> &SideData {
        &self.side_data[color.index()]
    }

    #[inline]
    pub fn can_castle(&self, color: Color, king_side: bool) -> bool {
        self.castling_rights & castling_flag(color, king_side) != 0
    }

    #[inline]
    pub fn revoke_castling(&mut self, flags: CastlingRights) {
        self.castling_rights &= !flags;
    }

    /// Copy of the rule-relevant fields with derived data and result cleared,
    /// ready to be advanced by one move and re-analysed.
    pub fn successor_base(&self) -> Self {
        Self {
            side_to_move: self.side_to_move,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            castling_rights: self.castling_rights,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_restrictions_intersect() {
        let mut pins = PinnedPieces::default();
        assert!(!pins.is_pinned(12));

        pins.restrict(12, square_bit(20) | square_bit(28));
        pins.restrict(12, square_bit(28) | square_bit(36));

        assert!(pins.is_pinned(12));
        assert!(pins.allows(12, 28));
        assert!(!pins.allows(12, 20));
        assert!(!pins.allows(12, 36));
        assert!(pins.allows(13, 0));
    }

    #[test]
    fn successor_base_drops_derived_data() {
        let mut state = BoardState {
            castling_rights: CASTLE_LIGHT_KINGSIDE,
            halfmove_clock: 7,
            result: Some(GameResult::Stalemate),
            ..BoardState::default()
        };
        state.side_data[0].record_attack(1, 18);
        state.pinned.restrict(3, 0);

        let next = state.successor_base();
        assert_eq!(next.castling_rights, CASTLE_LIGHT_KINGSIDE);
        assert_eq!(next.halfmove_clock, 7);
        assert_eq!(next.result, None);
        assert!(!next.side_data[0].attacks(18));
        assert!(!next.pinned.is_pinned(3));
    }
}
