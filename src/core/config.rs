//! Game configuration.
//!
//! The rule set itself is fixed; `GameConfig` only controls how a game is
//! run: when it ends, how it is seeded, and how patient the engine is with
//! decision providers.

use serde::{Deserialize, Serialize};

use super::error::{LudoError, LudoResult};
use super::team::TeamId;

/// Per-game settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Placements required before the game is over (1 = first to finish wins).
    pub teams_to_finish: usize,

    /// Seed for seating and, unless another dice source is supplied, dice.
    pub seed: u64,

    /// Force the first acting team instead of drawing one at random.
    pub starting_team: Option<TeamId>,

    /// Times a provider may return an index outside the legal list before
    /// the engine gives up with `IllegalMove`.
    pub max_selection_attempts: u32,

    /// Turn cap (0 = unlimited).
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            teams_to_finish: 1,
            seed: 42,
            starting_team: None,
            max_selection_attempts: 8,
            max_turns: 0,
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many teams must finish before the game ends.
    pub fn with_teams_to_finish(mut self, count: usize) -> Self {
        self.teams_to_finish = count;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Force the starting team.
    pub fn with_starting_team(mut self, team: TeamId) -> Self {
        self.starting_team = Some(team);
        self
    }

    /// Set how many bad selections are tolerated per decision.
    pub fn with_max_selection_attempts(mut self, attempts: u32) -> Self {
        self.max_selection_attempts = attempts;
        self
    }

    /// Set the turn cap.
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Check the config against a validated seating.
    pub fn validate(&self, seated: &[TeamId]) -> LudoResult<()> {
        if self.teams_to_finish == 0 || self.teams_to_finish > seated.len() {
            return Err(LudoError::InvalidConfig {
                reason: format!(
                    "teams_to_finish must be between 1 and {}, got {}",
                    seated.len(),
                    self.teams_to_finish
                ),
            });
        }
        if let Some(team) = self.starting_team {
            if !seated.contains(&team) {
                return Err(LudoError::InvalidConfig {
                    reason: format!("starting team {team} is not seated"),
                });
            }
        }
        if self.max_selection_attempts == 0 {
            return Err(LudoError::InvalidConfig {
                reason: "max_selection_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
