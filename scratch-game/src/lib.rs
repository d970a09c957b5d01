//! Scratch Game Engine
//!
//! Platform-agnostic reward evaluation for one round of a grid-based scratch
//! card: weighted grid generation, win combination matching and ordered
//! bonus effects. This crate performs no I/O; callers supply configuration
//! through a [`ConfigLoader`] and randomness through any [`rand::Rng`].

pub mod bonus;
pub mod chooser;
pub mod combinations;
pub mod config;
pub mod constants;
pub mod grid;
pub mod numbers;
pub mod result;
pub mod round;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::convert::Infallible;
use thiserror::Error;

// Re-export commonly used types
pub use bonus::{BonusOutcome, apply_bonuses};
pub use chooser::{SymbolPick, choose_symbol};
pub use combinations::{AppliedCombinations, CombinationOutcome, evaluate_combinations};
pub use config::{
    BonusEffect, BonusProbabilities, CellProbabilities, ConfigError, GameConfig, MatchMode,
    Probabilities, SymbolDef, SymbolWeights, WinCombination,
};
pub use constants::{DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_SYMBOL};
pub use grid::{
    CellPos, GeneratedGrid, Grid, GridShapeError, generate_grid, merge_weights,
    resolve_cell_weights,
};
pub use result::ScratchResult;
pub use round::{Evaluation, RoundOutcome, evaluate_grid, play_round};

/// Trait for abstracting configuration loading
/// Platform-specific implementations should provide this
pub trait ConfigLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the round configuration from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// An already parsed configuration loads as itself.
impl ConfigLoader for GameConfig {
    type Error = Infallible;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        Ok(self.clone())
    }
}

/// Errors surfaced by [`ScratchEngine`].
#[derive(Debug, Error)]
pub enum EngineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("failed to load configuration")]
    Load(#[source] E),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Main engine for playing rounds against a loaded configuration
pub struct ScratchEngine<L>
where
    L: ConfigLoader,
{
    loader: L,
}

impl<L> ScratchEngine<L>
where
    L: ConfigLoader,
{
    /// Create a new engine with the provided configuration loader
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Load and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the configuration is invalid.
    pub fn load_config(&self) -> Result<GameConfig, EngineError<L::Error>> {
        let config = self.loader.load_config().map_err(EngineError::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Play one round using the supplied random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn play_with_rng<R>(
        &self,
        betting_amount: u64,
        rng: &mut R,
    ) -> Result<ScratchResult, EngineError<L::Error>>
    where
        R: Rng + ?Sized,
    {
        let config = self.load_config()?;
        Ok(play_round(&config, betting_amount, rng).into_result())
    }

    /// Play one reproducible round seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn play_seeded(
        &self,
        betting_amount: u64,
        seed: u64,
    ) -> Result<ScratchResult, EngineError<L::Error>> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        self.play_with_rng(betting_amount, &mut rng)
    }

    /// Play one round seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn play(&self, betting_amount: u64) -> Result<ScratchResult, EngineError<L::Error>> {
        let mut rng = ChaCha20Rng::from_entropy();
        self.play_with_rng(betting_amount, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt;

    const CONFIG: &str = r#"{
        "columns": 4,
        "rows": 2,
        "symbols": {
            "A": { "type": "normal", "reward_multiplier": 2 },
            "+1000": { "type": "bonus", "impact": "extra_bonus", "extra": 1000 }
        },
        "probabilities": {
            "standard_symbols": [],
            "bonus_symbols": { "symbols": { "A": 1 } }
        },
        "win_combinations": {
            "same_symbol_8_times": { "when": "same_symbols", "count": 8, "reward_multiplier": 10 }
        }
    }"#;

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "source unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    #[derive(Default)]
    struct FixtureLoader {
        fail: bool,
        loads: Cell<u32>,
    }

    impl ConfigLoader for FixtureLoader {
        type Error = Unavailable;

        fn load_config(&self) -> Result<GameConfig, Self::Error> {
            self.loads.set(self.loads.get() + 1);
            if self.fail {
                return Err(Unavailable);
            }
            Ok(GameConfig::from_json(CONFIG).unwrap())
        }
    }

    #[test]
    fn engine_plays_seeded_round_through_loader() {
        let engine = ScratchEngine::new(FixtureLoader::default());
        let result = engine.play_seeded(5, 0xC0FFEE).unwrap();
        assert_eq!(result.matrix.rows(), 2);
        assert_eq!(result.matrix.columns(), 4);
        // every cell is A: 8 positions * 5 bet * 2 symbol * 10 combination
        assert_eq!(result.reward, 800);
        assert_eq!(
            result.applied_winning_combinations.get("same_symbol_8_times").map(<[String]>::len),
            Some(8)
        );
        assert_eq!(result.applied_bonus_symbol, "");
        assert_eq!(engine.loader.loads.get(), 1);
    }

    #[test]
    fn loader_failure_is_reported_as_load_error() {
        let engine = ScratchEngine::new(FixtureLoader {
            fail: true,
            ..FixtureLoader::default()
        });
        let err = engine.play_seeded(5, 1).unwrap_err();
        assert!(matches!(err, EngineError::Load(Unavailable)));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("source unavailable"));
    }

    #[test]
    fn invalid_config_is_rejected_before_play() {
        let mut config = GameConfig::from_json(CONFIG).unwrap();
        config.columns = 0;
        let engine = ScratchEngine::new(config);
        let err = engine.play(10).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfig(ConfigError::InvalidDimensions { .. })
        ));
    }
}
