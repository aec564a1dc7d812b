//! Game rules for Gomoku
//!
//! Freestyle rules: five or more in a row wins, no forbidden moves.

pub mod win;

pub use win::{check_winner, find_five_line_at_pos, find_five_positions, has_five_at_pos};
