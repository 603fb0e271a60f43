//! Dice: roll values, roll sources, and the leave-home re-roll rule.
//!
//! A 3 is a star roll and a 5 a globe roll; every other face is ordinary.
//! Dice values reach the engine through [`DiceSource`], implemented by the
//! seeded [`GameRng`](crate::core::GameRng) and by [`ScriptedDice`].

pub mod roll;
pub mod source;

pub use roll::{DiceRoll, RollKind, GLOBE_ROLL, STAR_ROLL};
pub use source::{roll_dice, DiceSource, ScriptedDice, HOME_DRAWS};
