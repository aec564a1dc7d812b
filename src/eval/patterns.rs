//! Pattern scores for Gomoku evaluation
//!
//! These constants define the scoring weights for the recognized shapes.
//! A cell's contribution is scored by what a stone there would create, one
//! step down the table (see [`real_shape_score`]).

use super::shape::Shape;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Winning patterns
    /// Five in a row - forced-win threshold
    pub const FIVE: i32 = 10_000_000;
    pub const BLOCK_FIVE: i32 = Self::FIVE;

    // Strong attacking patterns
    /// Open four: _OOOO_
    pub const FOUR: i32 = 100_000;
    /// Two fours through one cell
    pub const FOUR_FOUR: i32 = Self::FOUR;
    /// A four and an open three through one cell
    pub const FOUR_THREE: i32 = Self::FOUR;
    /// Two open threes through one cell
    pub const THREE_THREE: i32 = Self::FOUR / 2;
    /// Closed four: XOOOO_ or a four with one gap
    pub const BLOCK_FOUR: i32 = 1_500;

    // Moderate threats
    /// Open three: _OOO_
    pub const THREE: i32 = 1_000;
    /// Closed three: XOOO_
    pub const BLOCK_THREE: i32 = 150;

    // Building patterns
    pub const TWO_TWO: i32 = 200;
    pub const TWO: i32 = 100;
    pub const BLOCK_TWO: i32 = 15;
    pub const ONE: i32 = 10;
    pub const BLOCK_ONE: i32 = 1;
}

/// Search window bound, well above any reachable evaluation
pub const MAX_SCORE: i32 = 1_000_000_000;

/// Score contributed by an empty cell whose directional shape is `shape`.
///
/// The shape describes the line after a stone is placed, so the cell is
/// worth the next-smaller pattern: a Five point counts as a Four, and so on.
#[must_use]
pub fn real_shape_score(shape: Shape) -> i32 {
    match shape {
        Shape::Five => PatternScore::FOUR,
        Shape::BlockFive => PatternScore::BLOCK_FOUR,
        Shape::Four | Shape::FourFour | Shape::FourThree => PatternScore::THREE,
        Shape::BlockFour => PatternScore::BLOCK_THREE,
        Shape::Three => PatternScore::TWO,
        Shape::ThreeThree => PatternScore::THREE_THREE / 10,
        Shape::BlockThree => PatternScore::BLOCK_TWO,
        Shape::Two => PatternScore::ONE,
        Shape::TwoTwo => PatternScore::TWO_TWO / 10,
        Shape::BlockTwo => PatternScore::BLOCK_ONE,
        Shape::One | Shape::BlockOne | Shape::None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::FOUR);
        assert!(PatternScore::FOUR > PatternScore::THREE_THREE);
        assert!(PatternScore::THREE_THREE > PatternScore::BLOCK_FOUR);
        assert!(PatternScore::BLOCK_FOUR > PatternScore::THREE);
        assert!(PatternScore::THREE > PatternScore::TWO_TWO);
        assert!(PatternScore::TWO_TWO > PatternScore::BLOCK_THREE);
        assert!(PatternScore::BLOCK_THREE > PatternScore::TWO);
        assert!(PatternScore::TWO > PatternScore::BLOCK_TWO);
        assert!(PatternScore::BLOCK_TWO > PatternScore::ONE);
        assert!(PatternScore::ONE > PatternScore::BLOCK_ONE);
    }

    #[test]
    fn test_real_shape_score_steps_down() {
        assert_eq!(real_shape_score(Shape::Five), PatternScore::FOUR);
        assert_eq!(real_shape_score(Shape::Four), PatternScore::THREE);
        assert_eq!(real_shape_score(Shape::Three), PatternScore::TWO);
        assert_eq!(real_shape_score(Shape::ThreeThree), 5_000);
        assert_eq!(real_shape_score(Shape::TwoTwo), 20);
        assert_eq!(real_shape_score(Shape::None), 0);
    }

    #[test]
    fn test_max_score_exceeds_five() {
        assert!(MAX_SCORE > PatternScore::FIVE * 10);
    }
}
