//! Turn state machine.
//!
//! ```text
//! AwaitingRoll(team)
//!     │ record_roll (legal moves found)      │ record_roll (nothing can move)
//!     ▼                                      │
//! AwaitingMove(team, roll, legal)            │
//!     │ record_move                          │
//!     ▼                                      ▼
//! Resolved(team, roll) ── advance ──► AwaitingRoll(same team)   globe rolled
//!                                 ├─► AwaitingRoll(next team)   otherwise
//!                                 └─► GameOver                  enough placements
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Board, LudoError, LudoResult, PieceIndex, TeamId};
use crate::dice::DiceRoll;
use crate::rules::LegalMoves;

/// Where the current turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for `team` to roll.
    AwaitingRoll(TeamId),
    /// Waiting for `team` to pick one of `legal`.
    AwaitingMove {
        /// Acting team.
        team: TeamId,
        /// Roll being played.
        roll: DiceRoll,
        /// Pieces that may move.
        legal: LegalMoves,
    },
    /// The roll has been played (or forfeited).
    Resolved {
        /// Acting team.
        team: TeamId,
        /// Roll that was played.
        roll: DiceRoll,
    },
    /// Enough teams have finished.
    GameOver,
}

impl TurnPhase {
    /// Short description used in phase errors.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll(_) => "awaiting a roll",
            TurnPhase::AwaitingMove { .. } => "awaiting a move",
            TurnPhase::Resolved { .. } => "resolved",
            TurnPhase::GameOver => "game over",
        }
    }
}

/// Result of leaving the `Resolved` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Play passes to another team.
    NextTurn(TeamId),
    /// The same team rolls again.
    ExtraTurn(TeamId),
    /// The placement threshold was reached.
    GameOver,
}

/// Turn order, placements, and the current phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    order: Vec<TeamId>,
    placements: Vec<TeamId>,
    teams_to_finish: usize,
    phase: TurnPhase,
    turns_completed: u32,
}

impl TurnState {
    /// Start a sequence with `first` to act.
    ///
    /// `seated` is taken in ascending slot order and rotated so that
    /// `first` leads.
    pub fn new(seated: &[TeamId], first: TeamId, teams_to_finish: usize) -> LudoResult<Self> {
        let mut order = seated.to_vec();
        order.sort_unstable();
        let lead = order
            .iter()
            .position(|&t| t == first)
            .ok_or_else(|| LudoError::InvalidSeating {
                reason: format!("{first} is not seated"),
            })?;
        order.rotate_left(lead);

        if teams_to_finish == 0 || teams_to_finish > order.len() {
            return Err(LudoError::InvalidConfig {
                reason: format!(
                    "teams_to_finish must be between 1 and {}, got {teams_to_finish}",
                    order.len()
                ),
            });
        }

        Ok(Self {
            order,
            placements: Vec::new(),
            teams_to_finish,
            phase: TurnPhase::AwaitingRoll(first),
            turns_completed: 0,
        })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Team whose turn it is, `None` once the game is over.
    #[must_use]
    pub fn current_team(&self) -> Option<TeamId> {
        match &self.phase {
            TurnPhase::AwaitingRoll(team)
            | TurnPhase::AwaitingMove { team, .. }
            | TurnPhase::Resolved { team, .. } => Some(*team),
            TurnPhase::GameOver => None,
        }
    }

    /// Play order, starting with the first team to act.
    #[must_use]
    pub fn order(&self) -> &[TeamId] {
        &self.order
    }

    /// Finished teams in finishing order.
    #[must_use]
    pub fn placements(&self) -> &[TeamId] {
        &self.placements
    }

    /// Teams still racing, in play order.
    pub fn teams_in_play(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|t| !self.placements.contains(t))
    }

    /// Placements needed to end the game.
    #[must_use]
    pub fn teams_to_finish(&self) -> usize {
        self.teams_to_finish
    }

    /// Turns completed so far, extra turns included.
    #[must_use]
    pub fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Record the roll for the current team.
    ///
    /// With no legal moves the turn is forfeited and goes straight to
    /// `Resolved`.
    pub fn record_roll(&mut self, roll: DiceRoll, legal: LegalMoves) -> LudoResult<()> {
        let TurnPhase::AwaitingRoll(team) = self.phase else {
            return Err(self.out_of_phase("roll"));
        };
        self.phase = if legal.is_empty() {
            TurnPhase::Resolved { team, roll }
        } else {
            TurnPhase::AwaitingMove { team, roll, legal }
        };
        Ok(())
    }

    /// Record that `piece` was moved, producing `board`.
    ///
    /// Returns the teams that finished with this move, already appended to
    /// the placements.
    pub fn record_move(&mut self, piece: PieceIndex, board: &Board) -> LudoResult<Vec<TeamId>> {
        let TurnPhase::AwaitingMove { team, roll, legal } = &self.phase else {
            return Err(self.out_of_phase("move"));
        };
        let (team, roll) = (*team, *roll);
        if !legal.contains(&piece) {
            return Err(LudoError::IllegalMove {
                team,
                piece,
                roll: roll.value(),
            });
        }
        self.phase = TurnPhase::Resolved { team, roll };

        let finished: Vec<TeamId> = self
            .teams_in_play()
            .filter(|&t| board.all_finished(t))
            .collect();
        self.placements.extend(finished.iter().copied());
        Ok(finished)
    }

    /// Leave `Resolved`: extra turn on a globe, otherwise the next team
    /// still in play, or game over once enough teams have finished.
    pub fn advance(&mut self) -> LudoResult<Transition> {
        let TurnPhase::Resolved { team, roll } = self.phase else {
            return Err(self.out_of_phase("advance"));
        };
        self.turns_completed += 1;

        if self.placements.len() >= self.teams_to_finish {
            self.phase = TurnPhase::GameOver;
            return Ok(Transition::GameOver);
        }

        if roll.is_globe() && !self.placements.contains(&team) {
            self.phase = TurnPhase::AwaitingRoll(team);
            return Ok(Transition::ExtraTurn(team));
        }

        let next = self.next_after(team);
        self.phase = TurnPhase::AwaitingRoll(next);
        Ok(Transition::NextTurn(next))
    }

    fn next_after(&self, team: TeamId) -> TeamId {
        let at = self.order.iter().position(|&t| t == team).unwrap_or(0);
        let len = self.order.len();
        (1..=len)
            .map(|step| self.order[(at + step) % len])
            .find(|t| !self.placements.contains(t))
            .unwrap_or(team)
    }

    fn out_of_phase(&self, action: &'static str) -> LudoError {
        LudoError::OutOfPhase {
            action,
            phase: self.phase.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(i: u8) -> TeamId {
        TeamId::new(i).unwrap()
    }

    fn roll(v: u8) -> DiceRoll {
        DiceRoll::new(v).unwrap()
    }

    fn one_legal() -> LegalMoves {
        LegalMoves::from_slice(&[PieceIndex::ALL[0]])
    }

    #[test]
    fn test_order_rotates_to_first_team() {
        let state = TurnState::new(&[team(3), team(0), team(2)], team(2), 1).unwrap();
        assert_eq!(state.order(), &[team(2), team(3), team(0)]);
        assert_eq!(state.current_team(), Some(team(2)));
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        assert!(TurnState::new(&[team(0), team(1)], team(2), 1).is_err());
        assert!(TurnState::new(&[team(0), team(1)], team(0), 3).is_err());
        assert!(TurnState::new(&[team(0), team(1)], team(0), 0).is_err());
    }

    #[test]
    fn test_ordinary_roll_passes_turn() {
        let board = Board::new(&[team(0), team(1)]);
        let mut state = TurnState::new(&[team(0), team(1)], team(0), 1).unwrap();

        state.record_roll(roll(4), one_legal()).unwrap();
        assert!(matches!(state.phase(), TurnPhase::AwaitingMove { .. }));
        assert!(state.record_move(PieceIndex::ALL[0], &board).unwrap().is_empty());
        assert_eq!(state.advance().unwrap(), Transition::NextTurn(team(1)));
        assert_eq!(state.phase(), &TurnPhase::AwaitingRoll(team(1)));
        assert_eq!(state.turns_completed(), 1);
    }

    #[test]
    fn test_globe_grants_extra_turn_repeatedly() {
        let board = Board::new(&[team(0), team(1)]);
        let mut state = TurnState::new(&[team(0), team(1)], team(1), 1).unwrap();

        for _ in 0..3 {
            state.record_roll(roll(5), one_legal()).unwrap();
            state.record_move(PieceIndex::ALL[0], &board).unwrap();
            assert_eq!(state.advance().unwrap(), Transition::ExtraTurn(team(1)));
        }
    }

    #[test]
    fn test_forfeit_skips_move_phase() {
        let mut state = TurnState::new(&[team(0), team(1)], team(0), 1).unwrap();

        state.record_roll(roll(2), LegalMoves::new()).unwrap();
        assert_eq!(state.phase(), &TurnPhase::Resolved { team: team(0), roll: roll(2) });
        assert_eq!(state.advance().unwrap(), Transition::NextTurn(team(1)));

        // A forfeited globe still rolls again.
        state.record_roll(roll(5), LegalMoves::new()).unwrap();
        assert_eq!(state.advance().unwrap(), Transition::ExtraTurn(team(1)));
    }

    #[test]
    fn test_out_of_phase_calls() {
        let board = Board::new(&[team(0), team(1)]);
        let mut state = TurnState::new(&[team(0), team(1)], team(0), 1).unwrap();

        assert!(matches!(state.advance(), Err(LudoError::OutOfPhase { action: "advance", .. })));
        assert!(state.record_move(PieceIndex::ALL[0], &board).is_err());

        state.record_roll(roll(4), one_legal()).unwrap();
        assert!(state.record_roll(roll(4), one_legal()).is_err());
        assert!(matches!(
            state.record_move(PieceIndex::ALL[1], &board),
            Err(LudoError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_finished_team_is_placed_once_and_skipped() {
        let seated = [team(0), team(1), team(2)];
        let done = Board::from_positions(&seated, [[57; 4], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut state = TurnState::new(&seated, team(0), 2).unwrap();

        state.record_roll(roll(5), one_legal()).unwrap();
        assert_eq!(state.record_move(PieceIndex::ALL[0], &done).unwrap(), vec![team(0)]);
        // A finished team gets no extra turn, even on a globe.
        assert_eq!(state.advance().unwrap(), Transition::NextTurn(team(1)));

        state.record_roll(roll(2), one_legal()).unwrap();
        assert!(state.record_move(PieceIndex::ALL[0], &done).unwrap().is_empty());
        assert_eq!(state.placements(), &[team(0)]);
        assert_eq!(state.advance().unwrap(), Transition::NextTurn(team(2)));

        state.record_roll(roll(2), LegalMoves::new()).unwrap();
        assert_eq!(state.advance().unwrap(), Transition::NextTurn(team(1)));
        assert_eq!(state.teams_in_play().collect::<Vec<_>>(), vec![team(1), team(2)]);
    }

    #[test]
    fn test_game_over_at_threshold() {
        let seated = [team(0), team(1)];
        let done = Board::from_positions(&seated, [[0; 4], [57; 4], [0; 4], [0; 4]]).unwrap();
        let mut state = TurnState::new(&seated, team(1), 1).unwrap();

        state.record_roll(roll(1), one_legal()).unwrap();
        state.record_move(PieceIndex::ALL[0], &done).unwrap();
        assert_eq!(state.advance().unwrap(), Transition::GameOver);
        assert!(state.is_over());
        assert_eq!(state.current_team(), None);
        assert_eq!(state.placements(), &[team(1)]);
        assert!(state.record_roll(roll(1), one_legal()).is_err());
    }
}
