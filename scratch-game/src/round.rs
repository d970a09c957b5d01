//! One scratch round: draw a grid, then score it.
use crate::bonus::apply_bonuses;
use crate::combinations::{AppliedCombinations, evaluate_combinations};
use crate::config::GameConfig;
use crate::grid::{GeneratedGrid, Grid, generate_grid};
use crate::result::ScratchResult;
use rand::Rng;

/// Scoring of a single grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// Reward from win combinations alone
    pub base_reward: f64,
    /// Reward after bonus effects, before truncation
    pub reward: f64,
    pub applied_combinations: AppliedCombinations,
    pub applied_bonus_symbols: Vec<String>,
}

/// Score an existing grid. Deterministic for a given grid, config and bet.
#[must_use]
pub fn evaluate_grid(grid: &Grid, config: &GameConfig, betting_amount: u64) -> Evaluation {
    let wins = evaluate_combinations(grid, config, betting_amount);
    let bonus = apply_bonuses(grid, config, wins.reward);
    Evaluation {
        base_reward: wins.reward,
        reward: bonus.reward,
        applied_combinations: wins.applied,
        applied_bonus_symbols: bonus.applied,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub generated: GeneratedGrid,
    pub evaluation: Evaluation,
}

impl RoundOutcome {
    #[must_use]
    pub fn into_result(self) -> ScratchResult {
        ScratchResult::assemble(self.generated.grid, self.evaluation)
    }
}

/// Generate a grid with the configured shape and evaluate it.
pub fn play_round<R>(config: &GameConfig, betting_amount: u64, rng: &mut R) -> RoundOutcome
where
    R: Rng + ?Sized,
{
    let generated = generate_grid(config, config.columns, config.rows, rng);
    let evaluation = evaluate_grid(&generated.grid, config, betting_amount);
    log::debug!(
        "round scored: base {} final {} ({} combinations, {} bonuses)",
        evaluation.base_reward,
        evaluation.reward,
        evaluation.applied_combinations.len(),
        evaluation.applied_bonus_symbols.len()
    );
    RoundOutcome {
        generated,
        evaluation,
    }
}
