//! Where dice values come from, and the leave-home re-roll rule.

use crate::core::{Board, GameRng, LudoError, LudoResult, TeamId};

use super::roll::DiceRoll;

/// Draws made when a team has every piece at start.
pub const HOME_DRAWS: usize = 3;

/// A source of raw die faces.
///
/// The engine rolls through this seam so tests and replays can script the
/// exact sequence of faces.
pub trait DiceSource {
    /// Draw one face in `1..=6`.
    fn draw(&mut self) -> LudoResult<DiceRoll>;
}

impl DiceSource for GameRng {
    fn draw(&mut self) -> LudoResult<DiceRoll> {
        DiceRoll::new(self.roll_die())
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn draw(&mut self) -> LudoResult<DiceRoll> {
        (**self).draw()
    }
}

/// Replays a fixed list of faces, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<DiceRoll>,
    next: usize,
    drawn: usize,
}

impl ScriptedDice {
    /// Create from raw faces; every face must be in `1..=6` and the list
    /// must not be empty.
    pub fn new(faces: &[u8]) -> LudoResult<Self> {
        let faces = faces
            .iter()
            .map(|&f| DiceRoll::new(f))
            .collect::<LudoResult<Vec<_>>>()?;
        if faces.is_empty() {
            return Err(LudoError::InvariantViolation {
                what: "scripted dice length",
                value: 0,
            });
        }
        Ok(Self {
            faces,
            next: 0,
            drawn: 0,
        })
    }

    /// Total faces drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self) -> LudoResult<DiceRoll> {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        self.drawn += 1;
        Ok(face)
    }
}

/// Roll for `team`.
///
/// A team with every piece at start draws up to [`HOME_DRAWS`] times,
/// stopping on the first globe; otherwise the last draw stands. Any other
/// team draws once.
pub fn roll_dice<D: DiceSource + ?Sized>(
    board: &Board,
    team: TeamId,
    dice: &mut D,
) -> LudoResult<DiceRoll> {
    if !board.all_at_start(team) {
        return dice.draw();
    }

    let mut roll = dice.draw()?;
    for _ in 1..HOME_DRAWS {
        if roll.is_globe() {
            break;
        }
        roll = dice.draw()?;
    }
    Ok(roll)
}
