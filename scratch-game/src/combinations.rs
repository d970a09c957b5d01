//! Win combination evaluation
//!
//! Each configured combination scans the grid in declaration order. Rewards
//! from every combination are summed into one total while the credited
//! symbols stay grouped under the combination that credited them.
use crate::config::{GameConfig, MatchMode, SymbolDef, WinCombination};
use crate::grid::Grid;
use crate::numbers::u64_to_f64;
use indexmap::IndexMap;

/// Combination name → credited symbol occurrences, in first-credit order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppliedCombinations(IndexMap<String, Vec<String>>);

impl AppliedCombinations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, combination: &str, symbol: &str) {
        self.0
            .entry(combination.to_string())
            .or_default()
            .push(symbol.to_string());
    }

    #[must_use]
    pub fn get(&self, combination: &str) -> Option<&[String]> {
        self.0.get(combination).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, symbols)| (name.as_str(), symbols.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for AppliedCombinations {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Base reward and matches before any bonus symbol is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinationOutcome {
    pub reward: f64,
    pub applied: AppliedCombinations,
}

/// Running totals for one evaluation call.
#[derive(Debug, Default)]
struct WinAccumulator {
    reward: f64,
    applied: AppliedCombinations,
}

impl WinAccumulator {
    /// Add `amount` once per credited position and record each position.
    fn credit(&mut self, combination: &str, symbol: &str, amount: f64, positions: usize) {
        for _ in 0..positions {
            self.reward += amount;
            self.applied.record(combination, symbol);
        }
        log::debug!("{combination}: credited {symbol} x{positions} at {amount} each");
    }

    fn finish(self) -> CombinationOutcome {
        CombinationOutcome {
            reward: self.reward,
            applied: self.applied,
        }
    }
}

/// Per-position payout for `symbol`, or `None` when it cannot win.
fn position_amount(
    config: &GameConfig,
    symbol: &str,
    combination: &WinCombination,
    bet: f64,
) -> Option<f64> {
    let multiplier = config.symbol(symbol).and_then(SymbolDef::win_multiplier)?;
    Some(bet * multiplier * combination.reward_multiplier)
}

/// Credit every symbol whose total grid count equals the required count.
///
/// Symbols seen more often than required are skipped entirely.
fn credit_same_symbols(
    grid: &Grid,
    config: &GameConfig,
    name: &str,
    combination: &WinCombination,
    bet: f64,
    acc: &mut WinAccumulator,
) {
    let mut occurrences: IndexMap<&str, usize> = IndexMap::new();
    for symbol in grid.row_major() {
        *occurrences.entry(symbol).or_insert(0) += 1;
    }

    for (symbol, seen) in occurrences {
        if seen != combination.count {
            continue;
        }
        if let Some(amount) = position_amount(config, symbol, combination, bet) {
            acc.credit(name, symbol, amount, combination.count);
        }
    }
}

/// Credit disjoint vertical runs of exactly the required length.
///
/// The run counter resets after each credit, so a run of `2 * count` pays
/// twice and a run of `count + 1` pays once.
fn credit_linear_symbols(
    grid: &Grid,
    config: &GameConfig,
    name: &str,
    combination: &WinCombination,
    bet: f64,
    acc: &mut WinAccumulator,
) {
    for column in 0..grid.columns() {
        let mut current: Option<&str> = None;
        let mut run = 0_usize;
        for symbol in grid.column(column) {
            if current == Some(symbol) {
                run += 1;
            } else {
                current = Some(symbol);
                run = 1;
            }

            if run == combination.count {
                if let Some(amount) = position_amount(config, symbol, combination, bet) {
                    acc.credit(name, symbol, amount, combination.count);
                }
                run = 0;
            }
        }
    }
}

/// Evaluate every configured combination against the grid.
#[must_use]
pub fn evaluate_combinations(
    grid: &Grid,
    config: &GameConfig,
    betting_amount: u64,
) -> CombinationOutcome {
    let bet = u64_to_f64(betting_amount);
    let mut acc = WinAccumulator::default();

    for (name, combination) in &config.win_combinations {
        if combination.count == 0 {
            log::debug!("{name}: no required count, skipped");
            continue;
        }
        match combination.when {
            MatchMode::SameSymbols => {
                credit_same_symbols(grid, config, name, combination, bet, &mut acc);
            }
            MatchMode::LinearSymbols => {
                credit_linear_symbols(grid, config, name, combination, bet, &mut acc);
            }
        }
    }

    acc.finish()
}
