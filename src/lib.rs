//! # ludo-engine
//!
//! A rules engine for four-colour Ludo: piece positions for 2-4 teams,
//! legal moves for a roll, captures, extra turns, and finishing order.
//!
//! ## Design Principles
//!
//! 1. **Team-relative positions**: every piece is tracked as progress along
//!    its own team's route (0 start, 1-51 shared ring, 52-56 home stretch,
//!    57 goal). The absolute board is derived only for rendering.
//!
//! 2. **Boards are values**: moves return a new `Board`; nothing outside
//!    the engine can mutate the current one.
//!
//! 3. **Injected decisions and dice**: move choice goes through
//!    `MoveSelector` and dice through `DiceSource`, so the same engine runs
//!    human prompts, scripted strategies, and seeded simulations.
//!
//! ## Modules
//!
//! - `core`: Teams, positions, board, RNG, configuration, errors
//! - `dice`: Roll values and the leave-home re-roll rule
//! - `rules`: Move eligibility and resolution (captures, blocks)
//! - `turn`: Turn sequencing, extra turns, placements
//! - `players`: Decision providers
//! - `game`: The engine tying it together, plus turn history

pub mod core;
pub mod dice;
pub mod game;
pub mod players;
pub mod rules;
pub mod turn;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    AbsoluteCell, Board, GameConfig, GameRng, GameRngState, LudoError, LudoResult, PieceIndex,
    Position, TeamId,
};

pub use crate::dice::{roll_dice, DiceRoll, DiceSource, RollKind, ScriptedDice};

pub use crate::rules::{apply_move, legal_moves, resolve_move, LegalMoves, MoveEffect, MoveOutcome};

pub use crate::turn::{Transition, TurnPhase, TurnState};

pub use crate::players::{
    FirstLegal, FnSelector, MaxProgress, MoveContext, MoveSelector, RandomLegal, Scripted, SeatTable,
};

pub use crate::game::{Game, Rolled, TurnAction, TurnRecord};
