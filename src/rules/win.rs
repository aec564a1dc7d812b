//! Win condition checking
//!
//! Five or more stones of one color in a row wins; overlines count.
//! All functions work on a row-major grid so the board and tests can share
//! them.

use crate::board::{Pos, Stone, DIRECTIONS};

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the 4 lines through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(cells: &[Stone], size: usize, pos: Pos, color: Stone) -> bool {
    find_five_line_at_pos(cells, size, pos, color).is_some()
}

/// The run of at least five `color` stones through `pos`, if any.
pub fn find_five_line_at_pos(
    cells: &[Stone],
    size: usize,
    pos: Pos,
    color: Stone,
) -> Option<Vec<Pos>> {
    if color == Stone::Empty || cells[pos.to_index(size)] != color {
        return None;
    }
    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let mut k = 1;
        while let Some(prev) = pos.offset(-dr * k, -dc * k, size) {
            if cells[prev.to_index(size)] != color {
                break;
            }
            line.insert(0, prev);
            k += 1;
        }

        // Extend in positive direction
        let mut k = 1;
        while let Some(next) = pos.offset(dr * k, dc * k, size) {
            if cells[next.to_index(size)] != color {
                break;
            }
            line.push(next);
            k += 1;
        }

        if line.len() >= 5 {
            return Some(line);
        }
    }
    None
}

/// Find the positions of a 5-in-a-row for `stone`, scanning the whole grid.
pub fn find_five_positions(cells: &[Stone], size: usize, stone: Stone) -> Option<Vec<Pos>> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == stone)
        .find_map(|(idx, _)| find_five_line_at_pos(cells, size, Pos::from_index(idx, size), stone))
}

/// Check for a winner by full scan.
///
/// Returns `Some(Stone)` if either color has five in a row, `None` otherwise.
pub fn check_winner(cells: &[Stone], size: usize) -> Option<Stone> {
    Stone::ROLES
        .into_iter()
        .find(|&stone| find_five_positions(cells, size, stone).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize, stones: &[(u8, u8, Stone)]) -> Vec<Stone> {
        let mut cells = vec![Stone::Empty; size * size];
        for &(r, c, s) in stones {
            cells[Pos::new(r, c).to_index(size)] = s;
        }
        cells
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let stones: Vec<_> = (0..5).map(|i| (9, i, Stone::Black)).collect();
        let cells = grid(15, &stones);
        assert_eq!(check_winner(&cells, 15), Some(Stone::Black));
        assert!(find_five_positions(&cells, 15, Stone::White).is_none());
    }

    #[test]
    fn test_five_in_row_diagonals() {
        let diag: Vec<_> = (0..5).map(|i| (i, i, Stone::White)).collect();
        assert_eq!(check_winner(&grid(5, &diag), 5), Some(Stone::White));

        let anti: Vec<_> = (0..5).map(|i| (i, 4 - i, Stone::Black)).collect();
        assert_eq!(check_winner(&grid(5, &anti), 5), Some(Stone::Black));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let stones: Vec<_> = (3..7).map(|i| (i, 7, Stone::Black)).collect();
        let cells = grid(15, &stones);
        assert_eq!(check_winner(&cells, 15), None);
        assert!(!has_five_at_pos(&cells, 15, Pos::new(5, 7), Stone::Black));
    }

    #[test]
    fn test_overline_wins() {
        let stones: Vec<_> = (2..8).map(|i| (4, i, Stone::Black)).collect();
        let cells = grid(15, &stones);
        let line = find_five_line_at_pos(&cells, 15, Pos::new(4, 4), Stone::Black).unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line[0], Pos::new(4, 2));
    }

    #[test]
    fn test_broken_line_is_not_five() {
        let mut stones: Vec<_> = (0..6).map(|i| (1, i, Stone::Black)).collect();
        stones[2].2 = Stone::White;
        let cells = grid(15, &stones);
        assert_eq!(check_winner(&cells, 15), None);
    }
}
