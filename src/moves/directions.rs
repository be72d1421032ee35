//! Direction vectors as `(rank_delta, file_delta)`.
//!
//! The order of each table is part of the move-generation order.

pub type Direction = (i8, i8);

pub const KNIGHT_DIRECTIONS: [Direction; 8] = [
    (1, -2),
    (2, -1),
    (1, 2),
    (2, 1),
    (-1, -2),
    (-2, -1),
    (-1, 2),
    (-2, 1),
];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ROOK_DIRECTIONS: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

#[inline]
pub const fn is_horizontal(direction: Direction) -> bool {
    direction.0 == 0
}

#[inline]
pub const fn is_diagonal(direction: Direction) -> bool {
    direction.0 != 0 && direction.1 != 0 && (direction.0 == direction.1 || direction.0 == -direction.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_directions_are_bishop_then_rook() {
        assert_eq!(&ALL_DIRECTIONS[..4], &BISHOP_DIRECTIONS[..]);
        assert_eq!(&ALL_DIRECTIONS[4..], &ROOK_DIRECTIONS[..]);
    }

    #[test]
    fn direction_classes() {
        assert!(is_horizontal((0, 1)));
        assert!(!is_horizontal((1, 0)));
        assert!(is_diagonal((-1, 1)));
        assert!(!is_diagonal((1, 2)));
        assert!(!is_diagonal((0, -1)));
    }
}
