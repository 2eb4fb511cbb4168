//! Board configuration.
//!
//! `FreeCellConfig` fixes the shape of the board (columns, free cells) and
//! the move policy (super-moves, auto-collect). Foundations are always one
//! per suit.

use serde::{Deserialize, Serialize};

/// Number of foundation piles (one per suit).
pub const FOUNDATION_COUNT: usize = 4;

/// Largest supported tableau width.
pub const MAX_TABLEAU_COLUMNS: usize = 16;

/// Largest supported number of free cells.
pub const MAX_FREE_CELLS: usize = 8;

/// FreeCell board configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeCellConfig {
    /// Number of tableau columns (default: 8).
    pub tableau_columns: usize,

    /// Number of single-card free cells (default: 4).
    pub free_cells: usize,

    /// Allow a run of several cards to move between columns as one move.
    /// When disabled only the tail card of a column can move.
    pub super_moves: bool,

    /// After each accepted move, send every card a foundation accepts
    /// to that foundation.
    pub auto_collect: bool,
}

impl Default for FreeCellConfig {
    fn default() -> Self {
        Self {
            tableau_columns: 8,
            free_cells: 4,
            super_moves: true,
            auto_collect: false,
        }
    }
}

impl FreeCellConfig {
    /// Create the standard configuration (8 columns, 4 cells).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of tableau columns.
    #[must_use]
    pub fn with_tableau_columns(mut self, columns: usize) -> Self {
        assert!(
            (1..=MAX_TABLEAU_COLUMNS).contains(&columns),
            "Tableau must have 1-{MAX_TABLEAU_COLUMNS} columns"
        );
        self.tableau_columns = columns;
        self
    }

    /// Set the number of free cells.
    #[must_use]
    pub fn with_free_cells(mut self, cells: usize) -> Self {
        assert!(cells <= MAX_FREE_CELLS, "At most {MAX_FREE_CELLS} free cells supported");
        self.free_cells = cells;
        self
    }

    /// Enable or disable multi-card super-moves.
    #[must_use]
    pub fn with_super_moves(mut self, enabled: bool) -> Self {
        self.super_moves = enabled;
        self
    }

    /// Enable or disable automatic collection to foundations.
    #[must_use]
    pub fn with_auto_collect(mut self, enabled: bool) -> Self {
        self.auto_collect = enabled;
        self
    }

    /// Number of foundation piles.
    #[must_use]
    pub const fn foundations(&self) -> usize {
        FOUNDATION_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_board() {
        let config = FreeCellConfig::default();

        assert_eq!(config.tableau_columns, 8);
        assert_eq!(config.free_cells, 4);
        assert_eq!(config.foundations(), 4);
        assert!(config.super_moves);
        assert!(!config.auto_collect);
    }

    #[test]
    fn test_builder() {
        let config = FreeCellConfig::new()
            .with_tableau_columns(10)
            .with_free_cells(2)
            .with_super_moves(false)
            .with_auto_collect(true);

        assert_eq!(config.tableau_columns, 10);
        assert_eq!(config.free_cells, 2);
        assert!(!config.super_moves);
        assert!(config.auto_collect);
    }

    #[test]
    #[should_panic(expected = "Tableau must have")]
    fn test_zero_columns() {
        let _ = FreeCellConfig::new().with_tableau_columns(0);
    }

    #[test]
    #[should_panic(expected = "free cells supported")]
    fn test_too_many_cells() {
        let _ = FreeCellConfig::new().with_free_cells(9);
    }

    #[test]
    fn test_config_serde() {
        let config = FreeCellConfig::new().with_free_cells(3);

        let json = serde_json::to_string(&config).unwrap();
        let back: FreeCellConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, back);
    }
}
