//! The game engine: owns the board and the turn state for one game.
//!
//! ## Driving a game
//!
//! ```
//! use ludo_engine::core::{GameConfig, TeamId};
//! use ludo_engine::game::Game;
//! use ludo_engine::players::FirstLegal;
//!
//! let teams = [TeamId::ALL[0], TeamId::ALL[2]];
//! let mut game = Game::new(&teams, GameConfig::default().with_seed(7)).unwrap();
//!
//! let placements = game.run_to_completion(&mut FirstLegal).unwrap();
//! assert_eq!(placements.len(), 1);
//! assert!(game.board().all_finished(placements[0]));
//! ```
//!
//! For step-by-step control (a UI waiting on a human, or a binding), use
//! [`Game::roll`], [`Game::move_piece`] and [`Game::end_turn`] directly.

use im::Vector;

use crate::core::{Board, GameConfig, GameRng, LudoError, LudoResult, PieceIndex, TeamId, TEAM_COUNT};
use crate::dice::{roll_dice, DiceRoll, DiceSource};
use crate::players::{MoveContext, MoveSelector};
use crate::rules::{legal_moves, resolve_move, LegalMoves, MoveOutcome};
use crate::turn::{Transition, TurnPhase, TurnState};

use super::history::{TurnAction, TurnRecord};

/// A roll waiting to be played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rolled {
    /// Acting team.
    pub team: TeamId,
    /// Roll drawn.
    pub roll: DiceRoll,
    /// Pieces that may move; empty means the roll is forfeited.
    pub legal: LegalMoves,
}

/// Resolution waiting for `end_turn` to be logged.
#[derive(Clone, Debug)]
struct Pending {
    team: TeamId,
    roll: DiceRoll,
    action: TurnAction,
    finished: Vec<TeamId>,
}

/// One game of Ludo.
///
/// Generic over the dice source so tests and replays can script rolls; by
/// default dice come from a seeded [`GameRng`].
#[derive(Clone, Debug)]
pub struct Game<D = GameRng> {
    config: GameConfig,
    board: Board,
    turn: TurnState,
    dice: D,
    history: Vector<TurnRecord>,
    pending: Option<Pending>,
}

impl Game<GameRng> {
    /// Seat `teams` with dice drawn from the config seed.
    pub fn new(teams: &[TeamId], config: GameConfig) -> LudoResult<Self> {
        let dice = GameRng::new(config.seed).for_context("dice");
        Self::with_dice(teams, config, dice)
    }
}

impl<D: DiceSource> Game<D> {
    /// Seat `teams` with an explicit dice source.
    ///
    /// Requires 2-4 distinct teams. The first team is `config.starting_team`
    /// or a uniform draw from the seated teams; play then follows ascending
    /// slot order from there.
    pub fn with_dice(teams: &[TeamId], config: GameConfig, dice: D) -> LudoResult<Self> {
        let seated = validate_seating(teams)?;
        Self::from_board(Board::new(&seated), config, dice)
    }

    /// Resume from a board already in progress.
    ///
    /// Seating comes from the board. No seated team may already be finished.
    pub fn from_board(board: Board, config: GameConfig, dice: D) -> LudoResult<Self> {
        let seated = validate_seating(&board.seated_teams().collect::<Vec<_>>())?;
        config.validate(&seated)?;
        if let Some(done) = seated.iter().find(|&&t| board.all_finished(t)) {
            return Err(LudoError::InvalidConfig {
                reason: format!("{done} has already finished"),
            });
        }

        let first = match config.starting_team {
            Some(team) => team,
            None => GameRng::new(config.seed)
                .for_context("seating")
                .choose(&seated)
                .copied()
                .ok_or_else(|| LudoError::InvalidSeating {
                    reason: "no teams seated".to_string(),
                })?,
        };
        let turn = TurnState::new(&seated, first, config.teams_to_finish)?;

        Ok(Self {
            config,
            board,
            turn,
            dice,
            history: Vector::new(),
            pending: None,
        })
    }

    // === Read access ===

    /// Current board snapshot.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Turn order, phase and placements.
    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    /// Team to act, `None` once the game is over.
    #[must_use]
    pub fn current_team(&self) -> Option<TeamId> {
        self.turn.current_team()
    }

    /// Finished teams in finishing order.
    #[must_use]
    pub fn placements(&self) -> &[TeamId] {
        self.turn.placements()
    }

    /// Whether enough teams have finished.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.turn.is_over()
    }

    /// Every roll played so far.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    // === Step API ===

    /// Roll for the team to act and compute its legal moves.
    ///
    /// An empty legal list means the roll is forfeited; call
    /// [`end_turn`](Self::end_turn) next.
    pub fn roll(&mut self) -> LudoResult<Rolled> {
        let team = match self.turn.phase() {
            TurnPhase::AwaitingRoll(team) => *team,
            TurnPhase::GameOver => return Err(LudoError::GameOver),
            other => {
                return Err(LudoError::OutOfPhase {
                    action: "roll",
                    phase: other.label(),
                })
            }
        };
        if self.config.max_turns > 0 && self.turn.turns_completed() >= self.config.max_turns {
            return Err(LudoError::TurnLimitExceeded {
                limit: self.config.max_turns,
            });
        }

        let roll = roll_dice(&self.board, team, &mut self.dice)?;
        let legal = legal_moves(&self.board, team, roll);
        self.turn.record_roll(roll, legal.clone())?;
        if legal.is_empty() {
            self.pending = Some(Pending {
                team,
                roll,
                action: TurnAction::Forfeit,
                finished: Vec::new(),
            });
        }
        Ok(Rolled { team, roll, legal })
    }

    /// Move `piece` with the pending roll.
    ///
    /// `chosen_by` names the provider for the history. The board is only
    /// replaced once the move has fully resolved.
    pub fn move_piece(&mut self, piece: PieceIndex, chosen_by: &str) -> LudoResult<MoveOutcome> {
        let (team, roll) = match self.turn.phase() {
            TurnPhase::AwaitingMove { team, roll, .. } => (*team, *roll),
            TurnPhase::GameOver => return Err(LudoError::GameOver),
            other => {
                return Err(LudoError::OutOfPhase {
                    action: "move",
                    phase: other.label(),
                })
            }
        };

        let outcome = resolve_move(&self.board, team, roll, piece)?;
        let finished = self.turn.record_move(piece, &outcome.board)?;
        self.board = outcome.board;
        self.pending = Some(Pending {
            team,
            roll,
            action: TurnAction::Moved {
                piece,
                from: outcome.from,
                to: outcome.landed,
                effect: outcome.effect.clone(),
                chosen_by: chosen_by.to_string(),
            },
            finished,
        });
        Ok(outcome)
    }

    /// Close the resolved roll and pass play on.
    pub fn end_turn(&mut self) -> LudoResult<Transition> {
        let transition = self.turn.advance()?;
        if let Some(pending) = self.pending.take() {
            self.history.push_back(TurnRecord {
                turn: self.turn.turns_completed() - 1,
                team: pending.team,
                roll: pending.roll,
                action: pending.action,
                finished: pending.finished,
                transition,
            });
        }
        Ok(transition)
    }

    // === Driving with a provider ===

    /// Play a single roll: roll, ask `selector`, move, close.
    pub fn play_roll<S: MoveSelector + ?Sized>(&mut self, selector: &mut S) -> LudoResult<Transition> {
        let rolled = self.roll()?;
        if !rolled.legal.is_empty() {
            let piece = self.select(selector, &rolled)?;
            let name = selector.name_for(rolled.team).to_string();
            self.move_piece(piece, &name)?;
        }
        self.end_turn()
    }

    /// Play one full turn, including any extra turns earned by globes.
    ///
    /// Returns the transition that ended it: the next team, or game over.
    pub fn play_turn<S: MoveSelector + ?Sized>(&mut self, selector: &mut S) -> LudoResult<Transition> {
        loop {
            match self.play_roll(selector)? {
                Transition::ExtraTurn(_) => continue,
                done => return Ok(done),
            }
        }
    }

    /// Play until enough teams have finished; returns the placements.
    pub fn run_to_completion<S: MoveSelector + ?Sized>(
        &mut self,
        selector: &mut S,
    ) -> LudoResult<Vec<TeamId>> {
        while !self.is_over() {
            self.play_turn(selector)?;
        }
        Ok(self.placements().to_vec())
    }

    /// Ask `selector` until it names a legal piece or runs out of attempts.
    fn select<S: MoveSelector + ?Sized>(&self, selector: &mut S, rolled: &Rolled) -> LudoResult<PieceIndex> {
        let ctx = MoveContext {
            board: &self.board,
            team: rolled.team,
            roll: rolled.roll,
            legal: &rolled.legal,
        };
        let mut attempts = 0;
        loop {
            let piece = selector.choose(&ctx).ok_or_else(|| LudoError::SelectorAborted {
                team: rolled.team,
                provider: selector.name_for(rolled.team).to_string(),
            })?;
            if rolled.legal.contains(&piece) {
                return Ok(piece);
            }
            attempts += 1;
            if attempts >= self.config.max_selection_attempts {
                return Err(LudoError::IllegalMove {
                    team: rolled.team,
                    piece,
                    roll: rolled.roll.value(),
                });
            }
        }
    }
}

/// Sort and check the requested teams: 2-4, no duplicates.
fn validate_seating(teams: &[TeamId]) -> LudoResult<Vec<TeamId>> {
    let mut seated = teams.to_vec();
    seated.sort_unstable();
    seated.dedup();
    if seated.len() != teams.len() {
        return Err(LudoError::InvalidSeating {
            reason: "a team was requested more than once".to_string(),
        });
    }
    if !(2..=TEAM_COUNT).contains(&seated.len()) {
        return Err(LudoError::InvalidSeating {
            reason: format!("need 2 to {TEAM_COUNT} teams, got {}", seated.len()),
        });
    }
    Ok(seated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::players::{FirstLegal, FnSelector, Scripted};

    fn team(i: u8) -> TeamId {
        TeamId::new(i).unwrap()
    }

    fn two_teams() -> [TeamId; 2] {
        [team(0), team(1)]
    }

    #[test]
    fn test_seating_validation() {
        assert!(matches!(
            Game::new(&[team(0)], GameConfig::default()),
            Err(LudoError::InvalidSeating { .. })
        ));
        assert!(matches!(
            Game::new(&[team(0), team(0)], GameConfig::default()),
            Err(LudoError::InvalidSeating { .. })
        ));
        assert!(Game::new(&TeamId::ALL, GameConfig::default()).is_ok());
    }

    #[test]
    fn test_new_game_board_and_order() {
        let config = GameConfig::default().with_starting_team(team(3));
        let game = Game::new(&[team(3), team(1), team(0)], config).unwrap();

        assert_eq!(game.current_team(), Some(team(3)));
        assert_eq!(game.turn_state().order(), &[team(3), team(0), team(1)]);
        for t in TeamId::ALL {
            assert!(game.board().all_at_start(t));
        }
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_random_start_is_seated_and_seeded() {
        let teams = [team(1), team(2)];
        for seed in 0..20 {
            let a = Game::new(&teams, GameConfig::default().with_seed(seed)).unwrap();
            let b = Game::new(&teams, GameConfig::default().with_seed(seed)).unwrap();
            let first = a.current_team().unwrap();
            assert!(teams.contains(&first));
            assert_eq!(Some(first), b.current_team());
        }
    }

    #[test]
    fn test_step_api() {
        let config = GameConfig::default().with_starting_team(team(0));
        let dice = ScriptedDice::new(&[5, 4]).unwrap();
        let mut game = Game::with_dice(&two_teams(), config, dice).unwrap();

        let rolled = game.roll().unwrap();
        assert_eq!(rolled.roll.value(), 5);
        assert_eq!(rolled.legal.len(), 4);
        assert!(matches!(game.roll(), Err(LudoError::OutOfPhase { .. })));

        let outcome = game.move_piece(PieceIndex::ALL[0], "test").unwrap();
        assert_eq!(outcome.landed.value(), 1);
        assert_eq!(game.end_turn().unwrap(), Transition::ExtraTurn(team(0)));

        let rolled = game.roll().unwrap();
        assert_eq!(rolled.roll.value(), 4);
        game.move_piece(PieceIndex::ALL[0], "test").unwrap();
        assert_eq!(game.end_turn().unwrap(), Transition::NextTurn(team(1)));

        assert_eq!(game.board().team_slice(team(0)), [5, 0, 0, 0]);
        assert_eq!(game.history().len(), 2);
        assert!(game.history()[0].granted_extra_turn());
    }

    #[test]
    fn test_forfeit_logged_without_board_change() {
        let config = GameConfig::default().with_starting_team(team(0));
        // All at start: three non-globe draws and nothing can move.
        let dice = ScriptedDice::new(&[1, 2, 4]).unwrap();
        let mut game = Game::with_dice(&two_teams(), config, dice).unwrap();
        let before = *game.board();

        assert_eq!(game.play_turn(&mut FirstLegal).unwrap(), Transition::NextTurn(team(1)));
        assert_eq!(*game.board(), before);
        assert_eq!(game.history()[0].action, TurnAction::Forfeit);
        assert_eq!(game.history()[0].roll.value(), 4);
    }

    #[test]
    fn test_bad_selection_retried_then_rejected() {
        let config = GameConfig::default()
            .with_starting_team(team(0))
            .with_max_selection_attempts(3);
        let board = Board::from_positions(&two_teams(), [[10, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();

        // Two bad picks, then a good one.
        let dice = ScriptedDice::new(&[2]).unwrap();
        let mut game = Game::from_board(board, config.clone(), dice).unwrap();
        let mut script = Scripted::new(
            "clumsy",
            vec![PieceIndex::ALL[3], PieceIndex::ALL[2], PieceIndex::ALL[0]],
        );
        game.play_roll(&mut script).unwrap();
        assert_eq!(game.board().team_slice(team(0)), [12, 0, 0, 0]);

        // Never a good pick: surfaced as an illegal move, board untouched.
        let dice = ScriptedDice::new(&[2]).unwrap();
        let mut game = Game::from_board(board, config, dice).unwrap();
        let mut stubborn = FnSelector::new("stubborn", |_: &MoveContext<'_>| Some(PieceIndex::ALL[1]));
        assert!(matches!(
            game.play_roll(&mut stubborn),
            Err(LudoError::IllegalMove { roll: 2, .. })
        ));
        assert_eq!(*game.board(), board);
    }

    #[test]
    fn test_selector_abort() {
        let config = GameConfig::default().with_starting_team(team(1));
        let dice = ScriptedDice::new(&[5]).unwrap();
        let mut game = Game::with_dice(&two_teams(), config, dice).unwrap();
        let mut quitter = FnSelector::new("quitter", |_: &MoveContext<'_>| None);

        assert_eq!(
            game.play_turn(&mut quitter),
            Err(LudoError::SelectorAborted {
                team: team(1),
                provider: "quitter".to_string(),
            })
        );
    }

    #[test]
    fn test_turn_limit() {
        let config = GameConfig::default().with_starting_team(team(0)).with_max_turns(3);
        let dice = ScriptedDice::new(&[1]).unwrap();
        let mut game = Game::with_dice(&two_teams(), config, dice).unwrap();

        assert_eq!(
            game.run_to_completion(&mut FirstLegal),
            Err(LudoError::TurnLimitExceeded { limit: 3 })
        );
        assert_eq!(game.turn_state().turns_completed(), 3);
    }

    #[test]
    fn test_from_board_rejects_finished_team() {
        let board = Board::from_positions(&two_teams(), [[57; 4], [0; 4], [0; 4], [0; 4]]).unwrap();
        let dice = ScriptedDice::new(&[1]).unwrap();
        assert!(matches!(
            Game::from_board(board, GameConfig::default(), dice),
            Err(LudoError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_game_over_rejects_further_play() {
        let config = GameConfig::default().with_starting_team(team(0));
        let board = Board::from_positions(&two_teams(), [[57, 57, 57, 56], [0; 4], [0; 4], [0; 4]]).unwrap();
        let dice = ScriptedDice::new(&[1]).unwrap();
        let mut game = Game::from_board(board, config, dice).unwrap();

        assert_eq!(game.run_to_completion(&mut FirstLegal).unwrap(), vec![team(0)]);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].finished, vec![team(0)]);
        assert_eq!(game.roll(), Err(LudoError::GameOver));
    }
}
