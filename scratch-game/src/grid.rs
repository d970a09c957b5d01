//! Symbol grid and its weighted generation
use crate::chooser::choose_symbol;
use crate::config::{CellProbabilities, GameConfig, SymbolWeights};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridShapeError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Rows × columns matrix of symbol names, rows top-to-bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no cells or the rows do not all have
    /// the same length.
    pub fn from_rows(cells: Vec<Vec<String>>) -> Result<Self, GridShapeError> {
        let expected = cells.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridShapeError::Empty);
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(GridShapeError::Ragged {
                row,
                expected,
                found,
            });
        }
        Ok(Self { cells })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    #[must_use]
    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Every cell, row 0 left-to-right first.
    pub fn row_major(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().flatten().map(String::as_str)
    }

    /// Cells of one column, top-to-bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .filter_map(move |cells| cells.get(column))
            .map(String::as_str)
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = GridShapeError;

    fn try_from(cells: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub column: usize,
}

/// A freshly drawn grid plus the cells that needed a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGrid {
    pub grid: Grid,
    /// Cells without a per-cell override; only bonus weights applied.
    pub defaulted_cells: Vec<CellPos>,
    /// Cells whose merged weights summed to zero.
    pub degenerate_cells: Vec<CellPos>,
}

/// Look up the standard-symbol weights for a cell by exact position.
///
/// Returns the weights and whether the empty default was used.
#[must_use]
pub fn resolve_cell_weights(
    overrides: &[CellProbabilities],
    row: usize,
    column: usize,
) -> (Cow<'_, SymbolWeights>, bool) {
    overrides
        .iter()
        .find(|cell| cell.row == row && cell.column == column)
        .map_or_else(
            || (Cow::Owned(SymbolWeights::new()), true),
            |cell| (Cow::Borrowed(&cell.symbols), false),
        )
}

/// Union of both mappings, standard entries first.
///
/// A name present on both sides keeps its standard position and takes the
/// bonus weight.
#[must_use]
pub fn merge_weights(standard: &SymbolWeights, bonus: &SymbolWeights) -> SymbolWeights {
    let mut merged = standard.clone();
    for (symbol, weight) in bonus {
        merged.insert(symbol.clone(), *weight);
    }
    merged
}

/// Draw a `rows` × `columns` grid, one independent pick per cell.
pub fn generate_grid<R>(
    config: &GameConfig,
    columns: usize,
    rows: usize,
    rng: &mut R,
) -> GeneratedGrid
where
    R: Rng + ?Sized,
{
    let overrides = &config.probabilities.standard_symbols;
    let bonus = &config.probabilities.bonus_symbols.symbols;
    let mut defaulted_cells = Vec::new();
    let mut degenerate_cells = Vec::new();

    let mut cells = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut line = Vec::with_capacity(columns);
        for column in 0..columns {
            let pos = CellPos { row, column };
            let (standard, used_default) = resolve_cell_weights(overrides, row, column);
            if used_default {
                log::debug!("default cell configuration used for row {row} column {column}");
                defaulted_cells.push(pos);
            }
            let pick = choose_symbol(&merge_weights(&standard, bonus), rng);
            if pick.used_default {
                log::warn!(
                    "no symbol with positive weight at row {row} column {column}, using {}",
                    pick.symbol
                );
                degenerate_cells.push(pos);
            }
            line.push(pick.symbol);
        }
        cells.push(line);
    }

    GeneratedGrid {
        grid: Grid { cells },
        defaulted_cells,
        degenerate_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BonusProbabilities, Probabilities};
    use crate::constants::DEFAULT_SYMBOL;
    use indexmap::IndexMap;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn weights(entries: &[(&str, u32)]) -> SymbolWeights {
        entries
            .iter()
            .map(|(symbol, weight)| ((*symbol).to_string(), *weight))
            .collect()
    }

    fn config_with(standard: Vec<CellProbabilities>, bonus: SymbolWeights) -> GameConfig {
        GameConfig {
            columns: 3,
            rows: 3,
            probabilities: Probabilities {
                standard_symbols: standard,
                bonus_symbols: BonusProbabilities { symbols: bonus },
            },
            win_combinations: IndexMap::new(),
            symbols: IndexMap::new(),
        }
    }

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| (*s).to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["A".to_string()],
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GridShapeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_grids_are_rejected() {
        assert_eq!(Grid::from_rows(Vec::new()), Err(GridShapeError::Empty));
        assert_eq!(Grid::from_rows(vec![Vec::new()]), Err(GridShapeError::Empty));
    }

    #[test]
    fn iteration_orders_follow_layout() {
        let g = grid(&[&["A", "B"], &["C", "D"], &["E", "F"]]);
        assert_eq!((g.rows(), g.columns()), (3, 2));
        assert_eq!(g.row_major().collect::<Vec<_>>(), ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(g.column(1).collect::<Vec<_>>(), ["B", "D", "F"]);
        assert_eq!(g.get(2, 0), Some("E"));
        assert_eq!(g.get(3, 0), None);
    }

    #[test]
    fn merge_keeps_standard_first_and_bonus_wins_conflicts() {
        let merged = merge_weights(
            &weights(&[("A", 1), ("B", 2)]),
            &weights(&[("10x", 3), ("B", 9)]),
        );
        let entries: Vec<(&str, u32)> = merged.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, [("A", 1), ("B", 9), ("10x", 3)]);
    }

    #[test]
    fn missing_override_reports_default() {
        let overrides = vec![CellProbabilities {
            row: 0,
            column: 1,
            symbols: weights(&[("A", 1)]),
        }];
        let (found, used_default) = resolve_cell_weights(&overrides, 0, 1);
        assert!(!used_default);
        assert_eq!(found.len(), 1);

        let (missing, used_default) = resolve_cell_weights(&overrides, 1, 0);
        assert!(used_default);
        assert!(missing.is_empty());
    }

    #[test]
    fn generated_grid_has_requested_shape_and_known_symbols() {
        let standard = (0..3)
            .flat_map(|row| {
                (0..4).map(move |column| CellProbabilities {
                    row,
                    column,
                    symbols: weights(&[("A", 1), ("B", 2), ("C", 3)]),
                })
            })
            .collect();
        let config = config_with(standard, weights(&[("10x", 1), ("MISS", 1)]));
        let mut rng = SmallRng::seed_from_u64(0x5C2A7C4);

        let generated = generate_grid(&config, 4, 3, &mut rng);
        assert_eq!(generated.grid.rows(), 3);
        assert_eq!(generated.grid.columns(), 4);
        assert!(generated.defaulted_cells.is_empty());
        assert!(generated.degenerate_cells.is_empty());
        for symbol in generated.grid.row_major() {
            assert!(["A", "B", "C", "10x", "MISS"].contains(&symbol));
        }
    }

    #[test]
    fn cells_without_override_draw_bonus_symbols() {
        let config = config_with(Vec::new(), weights(&[("+500", 1)]));
        let mut rng = SmallRng::seed_from_u64(11);
        let generated = generate_grid(&config, 2, 2, &mut rng);
        assert_eq!(generated.defaulted_cells.len(), 4);
        assert!(generated.grid.row_major().all(|symbol| symbol == "+500"));
    }

    #[test]
    fn zero_weight_cells_fall_back_to_default_symbol() {
        let config = config_with(Vec::new(), SymbolWeights::new());
        let mut rng = SmallRng::seed_from_u64(5);
        let generated = generate_grid(&config, 3, 1, &mut rng);
        assert_eq!(generated.degenerate_cells.len(), 3);
        assert!(generated.grid.row_major().all(|symbol| symbol == DEFAULT_SYMBOL));
    }
}
