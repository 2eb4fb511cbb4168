//! Core engine types: RNG, configuration, errors.
//!
//! These are shared by every other module and carry no FreeCell rules of
//! their own.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{FreeCellConfig, FOUNDATION_COUNT, MAX_FREE_CELLS, MAX_TABLEAU_COLUMNS};
pub use error::MoveError;
pub use rng::GameRng;
