//! Puzzles solved with the searches in [searcher].
//!
//! Each puzzle exposes a `main` which reads the puzzle input
//! and prints its answers.

pub mod hills;
pub mod labels;
pub mod maze;
