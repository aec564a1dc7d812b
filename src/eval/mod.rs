//! Position evaluation: shape classification, incremental scores and
//! candidate generation

pub mod candidates;
pub mod evaluator;
pub mod patterns;
pub mod shape;

pub use candidates::{Candidates, Tier};
pub use evaluator::Evaluator;
pub use patterns::{real_shape_score, PatternScore, MAX_SCORE};
pub use shape::{classify, line_at, Line, Shape};
