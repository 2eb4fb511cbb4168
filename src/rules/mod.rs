//! FreeCell rules.
//!
//! The predicates answer "may this card go there" and "may this run move"
//! without touching any state. `RulesEngine` bundles them behind a trait
//! so `GameState` can be driven by alternative rule sets.

pub mod engine;

pub use engine::{
    can_place_on_foundation, can_place_on_free_cell, can_place_on_tableau, is_movable_run, max_run_length,
    RulesEngine, StandardRules,
};
