//! Stock scripted strategies.

use crate::core::{GameRng, PieceIndex};
use crate::rules::resolve_move;

use super::selector::{MoveContext, MoveSelector};

/// Always moves the lowest-numbered legal piece.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn name(&self) -> &str {
        "first-legal"
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        ctx.legal.first().copied()
    }
}

/// Picks uniformly among the legal pieces.
#[derive(Clone, Debug)]
pub struct RandomLegal {
    rng: GameRng,
}

impl RandomLegal {
    /// Create with its own seeded stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Create from an existing stream, e.g. a fork of the game RNG.
    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl MoveSelector for RandomLegal {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        self.rng.choose(ctx.legal).copied()
    }
}

/// Greedy: plays the move that leaves the team's summed positions highest.
///
/// Captures and bounces are accounted for because each candidate is fully
/// resolved. Ties go to the lowest piece index.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxProgress;

impl MoveSelector for MaxProgress {
    fn name(&self) -> &str {
        "max-progress"
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        let mut best: Option<(PieceIndex, u32)> = None;
        for &piece in ctx.legal {
            let Ok(outcome) = resolve_move(ctx.board, ctx.team, ctx.roll, piece) else {
                continue;
            };
            let score = outcome.board.progress(ctx.team);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((piece, score));
            }
        }
        best.map(|(piece, _)| piece)
    }
}

/// Replays a fixed list of choices, then gives up.
#[derive(Clone, Debug)]
pub struct Scripted {
    name: String,
    choices: Vec<PieceIndex>,
    next: usize,
}

impl Scripted {
    /// Create a named script.
    pub fn new(name: impl Into<String>, choices: Vec<PieceIndex>) -> Self {
        Self {
            name: name.into(),
            choices,
            next: 0,
        }
    }

    /// Choices not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.choices.len() - self.next
    }
}

impl MoveSelector for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose(&mut self, _ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        let choice = self.choices.get(self.next).copied()?;
        self.next += 1;
        Some(choice)
    }
}
