//! Centralized defaults for the scratch-game engine.
//!
//! Values that shape how a round is generated when the configuration is
//! silent live here, so the fallback behaviour is reviewed in one place
//! rather than scattered across the evaluator.

// Grid shape ---------------------------------------------------------------
pub const DEFAULT_COLUMNS: usize = 3;
pub const DEFAULT_ROWS: usize = 3;

// Symbol selection ---------------------------------------------------------
/// Symbol placed in a cell whose merged weights sum to zero.
pub const DEFAULT_SYMBOL: &str = "defaultSymbol";

// Output formatting --------------------------------------------------------
pub(crate) const COMBINATION_SYMBOL_SEPARATOR: &str = ",";
pub(crate) const BONUS_SYMBOL_SEPARATOR: &str = " ";
