//! Dice roll values and their rule interpretation.

use serde::{Deserialize, Serialize};

use crate::core::{LudoError, LudoResult};

/// Roll that jumps a piece to the next star.
pub const STAR_ROLL: u8 = 3;

/// Roll that jumps a piece to the next globe and grants an extra turn.
pub const GLOBE_ROLL: u8 = 5;

/// How the rules treat a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollKind {
    /// Advance by the face value.
    Ordinary,
    /// Jump to the next star.
    Star,
    /// Jump to the next globe; may leave start; extra turn.
    Globe,
}

/// A die face in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// Create a roll, rejecting values outside `1..=6`.
    pub fn new(value: u8) -> LudoResult<Self> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LudoError::InvariantViolation {
                what: "dice roll",
                value: i64::from(value),
            })
        }
    }

    /// Face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Rule interpretation of this face.
    #[must_use]
    pub const fn kind(self) -> RollKind {
        match self.0 {
            STAR_ROLL => RollKind::Star,
            GLOBE_ROLL => RollKind::Globe,
            _ => RollKind::Ordinary,
        }
    }

    /// Shorthand for `kind() == RollKind::Globe`.
    #[must_use]
    pub const fn is_globe(self) -> bool {
        self.0 == GLOBE_ROLL
    }
}

impl TryFrom<u8> for DiceRoll {
    type Error = LudoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiceRoll> for u8 {
    fn from(roll: DiceRoll) -> Self {
        roll.0
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            RollKind::Ordinary => write!(f, "{}", self.0),
            RollKind::Star => write!(f, "{} (star)", self.0),
            RollKind::Globe => write!(f, "{} (globe)", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_range() {
        assert!(DiceRoll::new(0).is_err());
        assert!(DiceRoll::new(7).is_err());
        for v in 1..=6 {
            assert_eq!(DiceRoll::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_roll_kinds() {
        let kinds: Vec<_> = (1..=6).map(|v| DiceRoll::new(v).unwrap().kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RollKind::Ordinary,
                RollKind::Ordinary,
                RollKind::Star,
                RollKind::Ordinary,
                RollKind::Globe,
                RollKind::Ordinary,
            ]
        );
        assert!(DiceRoll::new(5).unwrap().is_globe());
        assert_eq!(format!("{}", DiceRoll::new(3).unwrap()), "3 (star)");
    }
}
