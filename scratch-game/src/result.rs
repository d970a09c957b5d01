//! Output shape of a scored round
use crate::combinations::AppliedCombinations;
use crate::constants::{BONUS_SYMBOL_SEPARATOR, COMBINATION_SYMBOL_SEPARATOR};
use crate::grid::Grid;
use crate::numbers::truncate_f64_to_u64;
use crate::round::Evaluation;
use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Packaged result of one round, serialized as the public JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchResult {
    pub matrix: Grid,
    pub reward: u64,
    pub applied_winning_combinations: AppliedCombinations,
    pub applied_bonus_symbol: String,
}

impl ScratchResult {
    /// Package a grid and its evaluation. The reward is truncated here.
    #[must_use]
    pub fn assemble(grid: Grid, evaluation: Evaluation) -> Self {
        Self {
            matrix: grid,
            reward: truncate_f64_to_u64(evaluation.reward),
            applied_winning_combinations: evaluation.applied_combinations,
            applied_bonus_symbol: evaluation
                .applied_bonus_symbols
                .join(BONUS_SYMBOL_SEPARATOR)
                .trim()
                .to_string(),
        }
    }

    /// Serialize to the compact single-line JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Serialized as `[{"name": "sym1,sym2"}, ...]`, one object per combination.
impl Serialize for AppliedCombinations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (name, symbols) in self.iter() {
            let entry = IndexMap::from([(name, symbols.join(COMBINATION_SYMBOL_SEPARATOR))]);
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for AppliedCombinations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<IndexMap<String, String>>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .flatten()
            .map(|(name, joined)| {
                let symbols = joined
                    .split(COMBINATION_SYMBOL_SEPARATOR)
                    .filter(|symbol| !symbol.is_empty())
                    .map(str::to_string)
                    .collect();
                (name, symbols)
            })
            .collect())
    }
}
