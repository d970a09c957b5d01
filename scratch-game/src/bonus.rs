//! Bonus symbol application
use crate::config::{BonusEffect, GameConfig, SymbolDef};
use crate::grid::Grid;
use crate::numbers::u64_to_f64;

/// Reward after bonus effects, plus the bonus symbols applied in scan order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BonusOutcome {
    pub reward: f64,
    pub applied: Vec<String>,
}

/// Apply bonus effects found on the grid to a non-zero base reward.
///
/// Cells are visited row-major and each effect acts on the running total at
/// its position, so `x2` followed by `+50` on 100 yields 250. A zero base
/// reward is returned untouched.
#[must_use]
pub fn apply_bonuses(grid: &Grid, config: &GameConfig, base_reward: f64) -> BonusOutcome {
    let mut outcome = BonusOutcome {
        reward: base_reward,
        applied: Vec::new(),
    };
    if base_reward == 0.0 {
        return outcome;
    }

    for symbol in grid.row_major() {
        let Some(SymbolDef::Bonus(effect)) = config.symbol(symbol) else {
            continue;
        };
        match effect {
            BonusEffect::MultiplyReward { reward_multiplier } => {
                outcome.reward *= reward_multiplier;
            }
            BonusEffect::ExtraBonus { extra } => {
                outcome.reward += u64_to_f64(*extra);
            }
            BonusEffect::Miss | BonusEffect::Other => continue,
        }
        log::debug!("bonus {symbol} applied, reward now {}", outcome.reward);
        outcome.applied.push(symbol.to_string());
    }

    outcome
}
