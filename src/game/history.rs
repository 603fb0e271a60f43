//! Per-turn history records.
//!
//! The engine appends one [`TurnRecord`] per roll played, extra turns
//! included. Renderers replay it; statistics drivers use it to attribute
//! decisions to providers.

use serde::{Deserialize, Serialize};

use crate::core::{PieceIndex, Position, TeamId};
use crate::dice::DiceRoll;
use crate::rules::MoveEffect;
use crate::turn::Transition;

/// What the acting team did with its roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// A piece was moved.
    Moved {
        /// Piece moved.
        piece: PieceIndex,
        /// Starting position.
        from: Position,
        /// Final position (start if it bounced).
        to: Position,
        /// Interaction at the target cell.
        effect: MoveEffect,
        /// Provider that chose the piece.
        chosen_by: String,
    },
    /// No piece could move.
    Forfeit,
}

/// One played roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Index of this turn, starting at 0.
    pub turn: u32,
    /// Acting team.
    pub team: TeamId,
    /// Roll played.
    pub roll: DiceRoll,
    /// What happened.
    pub action: TurnAction,
    /// Teams that finished on this turn.
    pub finished: Vec<TeamId>,
    /// Where play went next.
    pub transition: Transition,
}

impl TurnRecord {
    /// Whether this turn sent opponent pieces home.
    #[must_use]
    pub fn captured(&self) -> bool {
        matches!(
            self.action,
            TurnAction::Moved {
                effect: MoveEffect::Captured { .. },
                ..
            }
        )
    }

    /// Whether the same team rolled again afterwards.
    #[must_use]
    pub fn granted_extra_turn(&self) -> bool {
        matches!(self.transition, Transition::ExtraTurn(_))
    }
}
