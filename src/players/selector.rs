//! The decision-provider seam.
//!
//! The engine never knows who is choosing moves. A human prompt, a scripted
//! strategy, or a Python callback all sit behind [`MoveSelector`].

use crate::core::{Board, PieceIndex, TeamId};
use crate::dice::DiceRoll;

/// Everything a provider sees when asked for a move.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    /// Board snapshot; providers cannot modify the live board.
    pub board: &'a Board,
    /// Acting team.
    pub team: TeamId,
    /// Roll being played.
    pub roll: DiceRoll,
    /// Pieces that may move, ascending. Never empty.
    pub legal: &'a [PieceIndex],
}

/// Chooses one piece to move.
pub trait MoveSelector {
    /// Name used when attributing decisions.
    fn name(&self) -> &str;

    /// Name of whoever decides for `team`.
    ///
    /// Single providers answer with their own name; tables of providers
    /// answer per seat.
    fn name_for(&self, team: TeamId) -> &str {
        let _ = team;
        self.name()
    }

    /// Pick a piece from `ctx.legal`.
    ///
    /// Returning a piece outside the legal list makes the engine ask again;
    /// returning `None` abandons the game with `SelectorAborted`.
    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex>;
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn name_for(&self, team: TeamId) -> &str {
        (**self).name_for(team)
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        (**self).choose(ctx)
    }
}

/// Wraps a closure as a provider.
pub struct FnSelector<F> {
    name: String,
    choose: F,
}

impl<F> FnSelector<F>
where
    F: FnMut(&MoveContext<'_>) -> Option<PieceIndex>,
{
    /// Create a named closure provider.
    pub fn new(name: impl Into<String>, choose: F) -> Self {
        Self {
            name: name.into(),
            choose,
        }
    }
}

impl<F> MoveSelector for FnSelector<F>
where
    F: FnMut(&MoveContext<'_>) -> Option<PieceIndex>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        (self.choose)(ctx)
    }
}

impl<F> std::fmt::Debug for FnSelector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSelector").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_selector() {
        let board = Board::new(&[TeamId::ALL[0], TeamId::ALL[1]]);
        let legal = [PieceIndex::ALL[1], PieceIndex::ALL[3]];
        let ctx = MoveContext {
            board: &board,
            team: TeamId::ALL[0],
            roll: DiceRoll::new(5).unwrap(),
            legal: &legal,
        };

        let mut last = FnSelector::new("last", |ctx: &MoveContext<'_>| ctx.legal.last().copied());
        assert_eq!(last.name(), "last");
        assert_eq!(last.name_for(TeamId::ALL[2]), "last");
        assert_eq!(last.choose(&ctx), Some(PieceIndex::ALL[3]));

        let mut boxed: Box<dyn MoveSelector> = Box::new(last);
        assert_eq!(boxed.choose(&ctx), Some(PieceIndex::ALL[3]));
    }
}
