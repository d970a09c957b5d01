//! Round configuration as loaded from the operator's JSON document.
use crate::constants::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbol name → selection weight, in declaration order.
pub type SymbolWeights = IndexMap<String, u32>;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[from] serde_json::Error),
    #[error("grid must be at least 1x1 (got {columns}x{rows})")]
    InvalidDimensions { columns: usize, rows: usize },
    #[error("{owner} reward multiplier must be finite and non-negative (got {value})")]
    InvalidMultiplier { owner: String, value: f64 },
}

/// Per-cell standard symbol weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProbabilities {
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub symbols: SymbolWeights,
}

/// Weights for bonus symbols, shared by every cell.
///
/// Real configurations carry extra metadata next to `symbols`; the engine
/// only reads the weights.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BonusProbabilities {
    #[serde(default)]
    pub symbols: SymbolWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub standard_symbols: Vec<CellProbabilities>,
    pub bonus_symbols: BonusProbabilities,
}

/// How a combination scans the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Total occurrences of a symbol anywhere on the grid
    SameSymbols,
    /// Consecutive identical symbols down a single column
    LinearSymbols,
}

/// A named winning pattern and its payout multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombination {
    pub when: MatchMode,
    /// Required occurrence count or run length. Zero never matches.
    #[serde(default)]
    pub count: usize,
    pub reward_multiplier: f64,
}

/// Effect a bonus symbol has on the running reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "impact", rename_all = "snake_case")]
pub enum BonusEffect {
    MultiplyReward { reward_multiplier: f64 },
    ExtraBonus { extra: u64 },
    Miss,
    #[serde(other)]
    Other,
}

/// Symbol definition keyed by its `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SymbolDef {
    #[serde(alias = "standard")]
    Normal {
        #[serde(default)]
        reward_multiplier: Option<f64>,
    },
    Bonus(BonusEffect),
}

impl SymbolDef {
    /// Multiplier used when this symbol wins a combination.
    ///
    /// Any symbol carrying a `reward_multiplier` is eligible, including
    /// `multiply_reward` bonus symbols.
    #[must_use]
    pub fn win_multiplier(&self) -> Option<f64> {
        match self {
            Self::Normal { reward_multiplier } => *reward_multiplier,
            Self::Bonus(BonusEffect::MultiplyReward { reward_multiplier }) => {
                Some(*reward_multiplier)
            }
            Self::Bonus(BonusEffect::ExtraBonus { .. } | BonusEffect::Miss | BonusEffect::Other) => {
                None
            }
        }
    }

    #[must_use]
    pub const fn is_bonus(&self) -> bool {
        matches!(self, Self::Bonus(_))
    }
}

/// Complete configuration for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_columns")]
    pub columns: usize,
    #[serde(default = "GameConfig::default_rows")]
    pub rows: usize,
    pub probabilities: Probabilities,
    pub win_combinations: IndexMap<String, WinCombination>,
    pub symbols: IndexMap<String, SymbolDef>,
}

impl GameConfig {
    const fn default_columns() -> usize {
        DEFAULT_COLUMNS
    }

    const fn default_rows() -> usize {
        DEFAULT_ROWS
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, misses a required field, or
    /// fails [`GameConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the evaluator relies on.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty grid or a negative/non-finite multiplier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        for (name, combination) in &self.win_combinations {
            check_multiplier(name, combination.reward_multiplier)?;
        }
        for (name, symbol) in &self.symbols {
            match symbol {
                SymbolDef::Normal {
                    reward_multiplier: Some(value),
                }
                | SymbolDef::Bonus(BonusEffect::MultiplyReward {
                    reward_multiplier: value,
                }) => check_multiplier(name, *value)?,
                SymbolDef::Normal {
                    reward_multiplier: None,
                }
                | SymbolDef::Bonus(
                    BonusEffect::ExtraBonus { .. } | BonusEffect::Miss | BonusEffect::Other,
                ) => {}
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn symbol(&self, name: &str) -> Option<&SymbolDef> {
        self.symbols.get(name)
    }
}

fn check_multiplier(owner: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier {
            owner: owner.to_string(),
            value,
        })
    }
}
