//! Caller-owned game state.
//!
//! ## Key Types
//!
//! - `Location`: a tableau column, free cell, or foundation
//! - `Move`: an accepted move as recorded for undo
//! - `MoveHistory`: stack of accepted moves
//! - `GameState`: the board, mutated only after a rules verdict

pub mod game;
pub mod history;
pub mod location;

pub use game::GameState;
pub use history::MoveHistory;
pub use location::{Location, Move};
