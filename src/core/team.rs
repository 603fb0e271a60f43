//! Team and piece identification.
//!
//! ## TeamId
//!
//! One of the four colour slots on the board, `0..=3`. A game seats 2-4 of
//! them; the slot index also fixes where the team enters the shared ring.
//!
//! ## PieceIndex
//!
//! One of the four pieces a team owns, `0..=3`.

use serde::{Deserialize, Serialize};

use super::error::{LudoError, LudoResult};

/// Number of team slots on the board.
pub const TEAM_COUNT: usize = 4;

/// Number of pieces each team owns.
pub const PIECES_PER_TEAM: usize = 4;

/// Team identifier, `0..=3`.
///
/// Only constructible through [`TeamId::new`] (or the `ALL` table), so any
/// `TeamId` held by the engine is a valid board index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TeamId(u8);

impl TeamId {
    /// All four team slots in ascending order.
    pub const ALL: [TeamId; TEAM_COUNT] = [TeamId(0), TeamId(1), TeamId(2), TeamId(3)];

    /// Create a team ID, rejecting slots outside `0..=3`.
    pub fn new(id: u8) -> LudoResult<Self> {
        if (id as usize) < TEAM_COUNT {
            Ok(Self(id))
        } else {
            Err(LudoError::InvariantViolation {
                what: "team id",
                value: i64::from(id),
            })
        }
    }

    /// Get the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw slot value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Number of quarter turns from `self` to `other`, going clockwise.
    ///
    /// ```
    /// use ludo_engine::core::TeamId;
    ///
    /// let blue = TeamId::ALL[0];
    /// let orange = TeamId::ALL[3];
    /// assert_eq!(blue.steps_to(orange), 3);
    /// assert_eq!(orange.steps_to(blue), 1);
    /// ```
    #[must_use]
    pub const fn steps_to(self, other: TeamId) -> u8 {
        ((other.0 + TEAM_COUNT as u8) - self.0) % TEAM_COUNT as u8
    }

    /// The team slots following `self` clockwise, excluding `self`.
    pub fn opponents_clockwise(self) -> impl Iterator<Item = TeamId> {
        (1..TEAM_COUNT as u8).map(move |k| TeamId((self.0 + k) % TEAM_COUNT as u8))
    }

    /// Colour name used by the classic board.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self.0 {
            0 => "Blue",
            1 => "Red",
            2 => "Green",
            _ => "Orange",
        }
    }
}

impl TryFrom<u8> for TeamId {
    type Error = LudoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for u8 {
    fn from(team: TeamId) -> Self {
        team.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {} ({})", self.0, self.colour())
    }
}

/// Piece index within a team, `0..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PieceIndex(u8);

impl PieceIndex {
    /// All four piece indices in ascending order.
    pub const ALL: [PieceIndex; PIECES_PER_TEAM] =
        [PieceIndex(0), PieceIndex(1), PieceIndex(2), PieceIndex(3)];

    /// Create a piece index, rejecting values outside `0..=3`.
    pub fn new(index: u8) -> LudoResult<Self> {
        if (index as usize) < PIECES_PER_TEAM {
            Ok(Self(index))
        } else {
            Err(LudoError::InvariantViolation {
                what: "piece index",
                value: i64::from(index),
            })
        }
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PieceIndex {
    type Error = LudoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PieceIndex> for u8 {
    fn from(piece: PieceIndex) -> Self {
        piece.0
    }
}

impl std::fmt::Display for PieceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_bounds() {
        assert_eq!(TeamId::new(0).unwrap().index(), 0);
        assert_eq!(TeamId::new(3).unwrap().index(), 3);
        assert!(matches!(
            TeamId::new(4),
            Err(LudoError::InvariantViolation { what: "team id", value: 4 })
        ));
    }

    #[test]
    fn test_piece_index_bounds() {
        assert_eq!(PieceIndex::new(2).unwrap().raw(), 2);
        assert!(PieceIndex::new(4).is_err());
    }

    #[test]
    fn test_opponents_clockwise_wraps() {
        let team = TeamId::ALL[2];
        let order: Vec<_> = team.opponents_clockwise().collect();
        assert_eq!(order, vec![TeamId::ALL[3], TeamId::ALL[0], TeamId::ALL[1]]);

        for (k, opponent) in order.iter().enumerate() {
            assert_eq!(team.steps_to(*opponent) as usize, k + 1);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TeamId::ALL[1]), "Team 1 (Red)");
        assert_eq!(format!("{}", PieceIndex::ALL[3]), "Piece 3");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let json = serde_json::to_string(&TeamId::ALL[2]).unwrap();
        assert_eq!(json, "2");
        assert_eq!(serde_json::from_str::<TeamId>(&json).unwrap(), TeamId::ALL[2]);
        assert!(serde_json::from_str::<TeamId>("9").is_err());
        assert!(serde_json::from_str::<PieceIndex>("4").is_err());
    }
}
