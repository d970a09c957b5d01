//! Weighted symbol selection
use crate::config::SymbolWeights;
use crate::constants::DEFAULT_SYMBOL;
use rand::Rng;

/// Outcome of a single weighted draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPick {
    pub symbol: String,
    /// Set when no symbol carried a positive weight and the sentinel was used.
    pub used_default: bool,
}

impl SymbolPick {
    fn fallback() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            used_default: true,
        }
    }
}

/// Pick one symbol with probability `weight / total`.
///
/// The draw lands in `[1, total]` and the weights are walked in declaration
/// order. A zero total yields [`DEFAULT_SYMBOL`] instead of an error.
pub fn choose_symbol<R>(weights: &SymbolWeights, rng: &mut R) -> SymbolPick
where
    R: Rng + ?Sized,
{
    let total: u64 = weights.values().map(|weight| u64::from(*weight)).sum();
    if total == 0 {
        return SymbolPick::fallback();
    }

    let mut roll = rng.gen_range(1..=total);
    for (symbol, weight) in weights {
        let weight = u64::from(*weight);
        if roll <= weight {
            return SymbolPick {
                symbol: symbol.clone(),
                used_default: false,
            };
        }
        roll -= weight;
    }

    // The roll never exceeds the total, so the walk always lands on a symbol.
    SymbolPick::fallback()
}
