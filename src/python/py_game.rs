//! Game bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{GameConfig, GameRng, LudoError, PieceIndex, TeamId, PIECES_PER_TEAM, TEAM_COUNT};
use crate::dice::DiceRoll;
use crate::game::Game;
use crate::players::{MoveContext, MoveSelector};
use crate::rules::legal_moves;
use crate::turn::Transition;

impl From<LudoError> for PyErr {
    fn from(err: LudoError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn teams_from(ids: &[u8]) -> PyResult<Vec<TeamId>> {
    Ok(ids.iter().map(|&i| TeamId::new(i)).collect::<Result<Vec<_>, _>>()?)
}

/// Reshape 16 per-piece values into a `[team][piece]` array.
fn team_grid(py: Python<'_>, flat: Vec<u8>) -> PyResult<Bound<'_, PyArray2<u8>>> {
    PyArray1::from_vec_bound(py, flat)
        .reshape([TEAM_COUNT, PIECES_PER_TEAM])
        .map_err(|e| PyValueError::new_err(format!("{}", e)))
}

fn next_team(transition: Transition) -> Option<u8> {
    match transition {
        Transition::NextTurn(team) | Transition::ExtraTurn(team) => Some(team.raw()),
        Transition::GameOver => None,
    }
}

/// Calls a Python function `(board, team, roll, legal) -> piece`.
///
/// The first Python exception is kept so it can be re-raised once the
/// engine reports the provider gave up.
struct PyCallbackSelector<'a, 'py> {
    callback: &'a Bound<'py, PyAny>,
    error: Option<PyErr>,
}

impl MoveSelector for PyCallbackSelector<'_, '_> {
    fn name(&self) -> &str {
        "python"
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        let board: Vec<Vec<u8>> = ctx.board.to_raw().iter().map(|row| row.to_vec()).collect();
        let legal: Vec<u8> = ctx.legal.iter().map(|p| p.raw()).collect();
        let picked = self
            .callback
            .call1((board, ctx.team.raw(), ctx.roll.value(), legal))
            .and_then(|result| result.extract::<u8>())
            .and_then(|raw| PieceIndex::new(raw).map_err(PyErr::from));
        match picked {
            Ok(piece) => Some(piece),
            Err(err) => {
                self.error = Some(err);
                None
            }
        }
    }
}

impl PyCallbackSelector<'_, '_> {
    /// Prefer the Python exception over the engine's abort error.
    fn surface(&mut self, err: LudoError) -> PyErr {
        match (err, self.error.take()) {
            (LudoError::SelectorAborted { .. }, Some(py_err)) => py_err,
            (err, _) => err.into(),
        }
    }
}

/// Python wrapper for a Ludo game.
///
/// The callback passed to `play_turn` and `run` receives
/// `(board, team, roll, legal)` where `board` is a 4x4 list indexed
/// `[team][piece]`, and must return one of the `legal` piece indices.
#[pyclass(name = "LudoGame")]
pub struct PyLudoGame {
    game: Game<GameRng>,
}

#[pymethods]
impl PyLudoGame {
    /// Create a new game.
    ///
    /// # Arguments
    /// - teams: Team slots to seat (2-4 distinct values in 0..=3)
    /// - seed: RNG seed for seating and dice
    /// - teams_to_finish: Placements needed to end the game
    /// - starting_team: Force the first team to act
    #[new]
    #[pyo3(signature = (teams, seed = 42, teams_to_finish = 1, starting_team = None))]
    fn new(teams: Vec<u8>, seed: u64, teams_to_finish: usize, starting_team: Option<u8>) -> PyResult<Self> {
        let mut config = GameConfig::new()
            .with_seed(seed)
            .with_teams_to_finish(teams_to_finish);
        if let Some(team) = starting_team {
            config = config.with_starting_team(TeamId::new(team)?);
        }
        let game = Game::new(&teams_from(&teams)?, config)?;
        Ok(Self { game })
    }

    /// Roll for the current team.
    ///
    /// Returns `(team, roll, legal)`; an empty `legal` is a forfeit.
    fn roll(&mut self) -> PyResult<(u8, u8, Vec<u8>)> {
        let rolled = self.game.roll()?;
        Ok((
            rolled.team.raw(),
            rolled.roll.value(),
            rolled.legal.iter().map(|p| p.raw()).collect(),
        ))
    }

    /// Legal pieces for the current team with a hypothetical roll.
    fn legal_moves(&self, roll: u8) -> PyResult<Vec<u8>> {
        let Some(team) = self.game.current_team() else {
            return Ok(Vec::new());
        };
        let roll = DiceRoll::new(roll)?;
        Ok(legal_moves(self.game.board(), team, roll)
            .iter()
            .map(|p| p.raw())
            .collect())
    }

    /// Move a piece with the pending roll; returns where it landed.
    fn move_piece(&mut self, piece: u8) -> PyResult<u8> {
        let outcome = self.game.move_piece(PieceIndex::new(piece)?, "python")?;
        Ok(outcome.landed.value())
    }

    /// Close the roll; returns the next team, or None if the game is over.
    fn end_turn(&mut self) -> PyResult<Option<u8>> {
        Ok(next_team(self.game.end_turn()?))
    }

    /// Play one full turn (extra turns included) with a callback.
    fn play_turn(&mut self, callback: &Bound<'_, PyAny>) -> PyResult<Option<u8>> {
        let mut selector = PyCallbackSelector {
            callback,
            error: None,
        };
        match self.game.play_turn(&mut selector) {
            Ok(transition) => Ok(next_team(transition)),
            Err(err) => Err(selector.surface(err)),
        }
    }

    /// Play to the end with a callback; returns the placements.
    fn run(&mut self, callback: &Bound<'_, PyAny>) -> PyResult<Vec<u8>> {
        let mut selector = PyCallbackSelector {
            callback,
            error: None,
        };
        match self.game.run_to_completion(&mut selector) {
            Ok(placements) => Ok(placements.iter().map(|t| t.raw()).collect()),
            Err(err) => Err(selector.surface(err)),
        }
    }

    /// Team-relative positions as a 4x4 array, `[team][piece]`.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let flat: Vec<u8> = self.game.board().to_raw().iter().flatten().copied().collect();
        team_grid(py, flat)
    }

    /// Absolute renderer cells as a 4x4 array, `[team][piece]`.
    fn absolute_board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let flat: Vec<u8> = self
            .game
            .board()
            .to_absolute()
            .iter()
            .flatten()
            .map(|cell| cell.index() as u8)
            .collect();
        team_grid(py, flat)
    }

    /// Team to act, or None once the game is over.
    #[getter]
    fn current_team(&self) -> Option<u8> {
        self.game.current_team().map(TeamId::raw)
    }

    /// Finished teams in finishing order.
    #[getter]
    fn placements(&self) -> Vec<u8> {
        self.game.placements().iter().map(|t| t.raw()).collect()
    }

    /// Whether the game has ended.
    #[getter]
    fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Rolls played so far.
    #[getter]
    fn turns(&self) -> u32 {
        self.game.turn_state().turns_completed()
    }

    fn __repr__(&self) -> String {
        let status = match self.game.current_team() {
            Some(team) => format!("to_move={}", team.raw()),
            None => "finished".to_string(),
        };
        format!(
            "LudoGame(turns={}, {}, placements={:?})",
            self.turns(),
            status,
            self.placements()
        )
    }
}
