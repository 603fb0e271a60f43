//! Move eligibility and resolution.
//!
//! ## Eligibility
//!
//! | Roll        | A piece at `p` may move when |
//! |-------------|------------------------------|
//! | star (3)    | `0 < p < 51`                 |
//! | globe (5)   | `p < 48` (start included)    |
//! | ordinary    | `0 < p < 57`                 |
//!
//! ## Resolution
//!
//! The target cell is the next star, the next globe, or `p + roll` clamped
//! to the goal. A target on the shared track is checked against the other
//! seated teams clockwise from the mover; only the first team found
//! occupying the cell takes part. A lone occupant off a protected globe is
//! captured, as is any stack on the mover's own entry cell (1). Anything
//! else sends the mover back to start.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Board, LudoError, LudoResult, PieceIndex, Position, TeamId, GLOBES, GOAL, LAST_TRACK};
use crate::dice::{DiceRoll, RollKind};

/// Pieces that may move, ascending.
pub type LegalMoves = SmallVec<[PieceIndex; 4]>;

/// Pieces of `team` that may move with `roll`, in ascending index order.
///
/// Empty when nothing can move, or when `team` is not seated.
#[must_use]
pub fn legal_moves(board: &Board, team: TeamId, roll: DiceRoll) -> LegalMoves {
    if !board.is_seated(team) {
        return LegalMoves::new();
    }
    PieceIndex::ALL
        .into_iter()
        .filter(|&piece| can_move(board.position(team, piece), roll))
        .collect()
}

fn can_move(pos: Position, roll: DiceRoll) -> bool {
    let p = pos.value();
    match roll.kind() {
        RollKind::Star => p > 0 && p < LAST_TRACK,
        RollKind::Globe => p < GLOBES[GLOBES.len() - 1],
        RollKind::Ordinary => p > 0 && p < GOAL,
    }
}

/// Cell a piece at `from` heads for with `roll`, before any capture.
pub fn target_position(from: Position, roll: DiceRoll) -> LudoResult<Position> {
    let target = match roll.kind() {
        RollKind::Star => from.next_star(),
        RollKind::Globe => from.next_globe(),
        RollKind::Ordinary => Some(from.advanced_by(roll.value())),
    };
    target.ok_or(LudoError::NoTarget {
        from: from.value(),
        roll: roll.value(),
    })
}

/// What happened at the target cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    /// Nobody else was there.
    Advanced,
    /// Opponent pieces on the cell were sent to start.
    Captured {
        /// Team that lost pieces.
        opponent: TeamId,
        /// Pieces sent to start.
        pieces: SmallVec<[PieceIndex; 4]>,
    },
    /// The cell was guarded; the mover went back to start.
    Bounced {
        /// Team guarding the cell.
        opponent: TeamId,
        /// Number of guarding pieces.
        guards: usize,
    },
}

/// Full result of resolving one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Board after the move.
    pub board: Board,
    /// Moving piece.
    pub piece: PieceIndex,
    /// Where it started.
    pub from: Position,
    /// Where it was headed.
    pub target: Position,
    /// Where it ended up (the target, or start if bounced).
    pub landed: Position,
    /// Interaction at the target.
    pub effect: MoveEffect,
}

/// Resolve moving `piece` of `team` with `roll`.
///
/// The input board is left untouched; the outcome carries the new board.
pub fn resolve_move(
    board: &Board,
    team: TeamId,
    roll: DiceRoll,
    piece: PieceIndex,
) -> LudoResult<MoveOutcome> {
    if !legal_moves(board, team, roll).contains(&piece) {
        return Err(LudoError::IllegalMove {
            team,
            piece,
            roll: roll.value(),
        });
    }

    let from = board.position(team, piece);
    let target = target_position(from, roll)?;

    let (next, landed, effect) = match find_occupant(board, team, target) {
        None => (
            board.with_position(team, piece, target),
            target,
            MoveEffect::Advanced,
        ),
        Some((opponent, pieces)) => {
            let captures = target.value() == 1 || (pieces.len() == 1 && !target.is_protected_globe());
            if captures {
                let next = pieces.iter().fold(
                    board.with_position(team, piece, target),
                    |b, &victim| b.with_position(opponent, victim, Position::START),
                );
                (next, target, MoveEffect::Captured { opponent, pieces })
            } else {
                (
                    board.with_position(team, piece, Position::START),
                    Position::START,
                    MoveEffect::Bounced {
                        opponent,
                        guards: pieces.len(),
                    },
                )
            }
        }
    };

    Ok(MoveOutcome {
        board: next,
        piece,
        from,
        target,
        landed,
        effect,
    })
}

/// Apply a move and return only the resulting board.
pub fn apply_move(
    board: &Board,
    team: TeamId,
    roll: DiceRoll,
    piece: PieceIndex,
) -> LudoResult<Board> {
    resolve_move(board, team, roll, piece).map(|outcome| outcome.board)
}

/// First seated opponent, clockwise from `team`, with pieces on `target`.
fn find_occupant(
    board: &Board,
    team: TeamId,
    target: Position,
) -> Option<(TeamId, SmallVec<[PieceIndex; 4]>)> {
    if !target.is_on_shared_track() {
        return None;
    }
    team.opponents_clockwise()
        .filter(|&opponent| board.is_seated(opponent))
        .find_map(|opponent| {
            let there = target.relative_to_opponent(team.steps_to(opponent))?;
            let pieces: SmallVec<[PieceIndex; 4]> = board.pieces_at(opponent, there).collect();
            (!pieces.is_empty()).then_some((opponent, pieces))
        })
}
