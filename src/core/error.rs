//! Engine error taxonomy.
//!
//! Every fallible engine operation returns [`LudoResult`]. A turn in which no
//! piece can move is not an error; it is reported as a forfeit outcome.

use thiserror::Error;

use super::team::{PieceIndex, TeamId};

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LudoError {
    /// A decision provider picked a piece outside the legal-move list.
    #[error("{piece} of {team} cannot move with a roll of {roll}")]
    IllegalMove {
        /// Acting team.
        team: TeamId,
        /// Rejected piece.
        piece: PieceIndex,
        /// Roll the move was attempted with.
        roll: u8,
    },

    /// A star or globe roll found no further cell ahead of the piece.
    #[error("no target cell after position {from} for a roll of {roll}")]
    NoTarget {
        /// Current position of the piece.
        from: u8,
        /// Roll value.
        roll: u8,
    },

    /// Fewer than 2, more than 4, or duplicate teams requested.
    #[error("invalid seating: {reason}")]
    InvalidSeating {
        /// What was wrong with the requested teams.
        reason: String,
    },

    /// A value outside its legal range reached the engine.
    #[error("invariant violation: {what} = {value} is out of range")]
    InvariantViolation {
        /// Which quantity was out of range.
        what: &'static str,
        /// The offending value.
        value: i64,
    },

    /// Game configuration is inconsistent with the seating.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: String,
    },

    /// The decision provider declined to choose a piece.
    #[error("provider `{provider}` gave up choosing a move for {team}")]
    SelectorAborted {
        /// Acting team.
        team: TeamId,
        /// Name of the provider.
        provider: String,
    },

    /// A turn step was requested in the wrong phase.
    #[error("cannot {action} while {phase}")]
    OutOfPhase {
        /// Requested step.
        action: &'static str,
        /// Phase the turn was in.
        phase: &'static str,
    },

    /// The game has already reached its placement threshold.
    #[error("game is over")]
    GameOver,

    /// The configured turn cap was reached before the game finished.
    #[error("turn limit of {limit} reached before the game finished")]
    TurnLimitExceeded {
        /// Configured limit.
        limit: u32,
    },
}

/// Result alias for engine operations.
pub type LudoResult<T> = Result<T, LudoError>;
