//! Line relations between cells
//!
//! Used by the candidate generator to keep deep-search candidates close to
//! the recent action.

use super::Pos;

/// True when `a` and `b` share a row, column or diagonal and are fewer than
/// `max_distance` cells apart along it.
#[inline]
pub fn is_in_line(a: Pos, b: Pos, max_distance: usize) -> bool {
    let dr = (a.row as i32 - b.row as i32).unsigned_abs() as usize;
    let dc = (a.col as i32 - b.col as i32).unsigned_abs() as usize;
    (dr == 0 && dc < max_distance) || (dc == 0 && dr < max_distance) || (dr == dc && dr < max_distance)
}

/// True when any of `recent` lies in line with `p`.
pub fn has_in_line(p: Pos, recent: &[Pos], max_distance: usize) -> bool {
    recent.iter().any(|&q| is_in_line(p, q, max_distance))
}

/// True when every one of `recent` lies in line with `p`.
pub fn all_in_line(p: Pos, recent: &[Pos], max_distance: usize) -> bool {
    recent.iter().all(|&q| is_in_line(p, q, max_distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_row_within_distance() {
        assert!(is_in_line(Pos::new(3, 3), Pos::new(3, 7), 5));
        assert!(!is_in_line(Pos::new(3, 3), Pos::new(3, 8), 5), "distance 5 is not < 5");
    }

    #[test]
    fn test_diagonals() {
        assert!(is_in_line(Pos::new(2, 2), Pos::new(5, 5), 5));
        assert!(is_in_line(Pos::new(2, 6), Pos::new(5, 3), 5));
        assert!(!is_in_line(Pos::new(2, 2), Pos::new(5, 4), 5), "knight-ish offsets are off-line");
    }

    #[test]
    fn test_has_and_all_in_line() {
        let recent = [Pos::new(7, 7), Pos::new(0, 0)];
        assert!(has_in_line(Pos::new(7, 9), &recent, 5));
        assert!(!all_in_line(Pos::new(7, 9), &recent, 5));
        assert!(all_in_line(Pos::new(7, 9), &recent[..1], 5));
        assert!(!has_in_line(Pos::new(7, 9), &[], 5));
        assert!(all_in_line(Pos::new(7, 9), &[], 5));
    }
}
