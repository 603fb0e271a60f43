//! The board: every piece's team-relative position.
//!
//! `Board` is a small `Copy` value. Moves never edit a board in place; the
//! move resolver returns a new board and the game engine swaps it in, so a
//! snapshot handed to a renderer or decision provider can never change
//! under it.

use serde::{Deserialize, Serialize};

use super::error::{LudoError, LudoResult};
use super::position::{AbsoluteCell, Position};
use super::team::{PieceIndex, TeamId, PIECES_PER_TEAM, TEAM_COUNT};

/// Positions of all 16 pieces plus which team slots are seated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    positions: [[Position; PIECES_PER_TEAM]; TEAM_COUNT],
    seated: [bool; TEAM_COUNT],
}

impl Board {
    /// Create a board with every piece at start.
    ///
    /// Seating is validated by the game engine; the board only records it.
    #[must_use]
    pub fn new(seated: &[TeamId]) -> Self {
        let mut mask = [false; TEAM_COUNT];
        for team in seated {
            mask[team.index()] = true;
        }
        Self {
            positions: [[Position::START; PIECES_PER_TEAM]; TEAM_COUNT],
            seated: mask,
        }
    }

    /// Build a board from raw relative positions, indexed `[team][piece]`.
    ///
    /// Pieces of unseated teams must be at start.
    pub fn from_positions(
        seated: &[TeamId],
        raw: [[u8; PIECES_PER_TEAM]; TEAM_COUNT],
    ) -> LudoResult<Self> {
        let mut board = Self::new(seated);
        for team in TeamId::ALL {
            for piece in PieceIndex::ALL {
                let pos = Position::new(raw[team.index()][piece.index()])?;
                if !board.is_seated(team) && !pos.is_at_start() {
                    return Err(LudoError::InvariantViolation {
                        what: "unseated team position",
                        value: i64::from(pos.value()),
                    });
                }
                board.positions[team.index()][piece.index()] = pos;
            }
        }
        Ok(board)
    }

    /// Whether a team slot takes part in this game.
    #[must_use]
    pub fn is_seated(&self, team: TeamId) -> bool {
        self.seated[team.index()]
    }

    /// Seated teams in ascending slot order.
    pub fn seated_teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        TeamId::ALL.into_iter().filter(|t| self.is_seated(*t))
    }

    /// Position of one piece.
    #[must_use]
    pub fn position(&self, team: TeamId, piece: PieceIndex) -> Position {
        self.positions[team.index()][piece.index()]
    }

    /// All four positions of a team.
    #[must_use]
    pub fn team_positions(&self, team: TeamId) -> [Position; PIECES_PER_TEAM] {
        self.positions[team.index()]
    }

    /// A team's positions as raw values.
    #[must_use]
    pub fn team_slice(&self, team: TeamId) -> [u8; PIECES_PER_TEAM] {
        self.positions[team.index()].map(Position::value)
    }

    /// Return a copy with one piece moved.
    #[must_use]
    pub fn with_position(mut self, team: TeamId, piece: PieceIndex, pos: Position) -> Self {
        self.positions[team.index()][piece.index()] = pos;
        self
    }

    /// Pieces of `team` currently at `pos`.
    pub fn pieces_at(&self, team: TeamId, pos: Position) -> impl Iterator<Item = PieceIndex> + '_ {
        PieceIndex::ALL
            .into_iter()
            .filter(move |p| self.position(team, *p) == pos)
    }

    /// Every piece of the team is still at start.
    #[must_use]
    pub fn all_at_start(&self, team: TeamId) -> bool {
        self.team_positions(team).iter().all(|p| p.is_at_start())
    }

    /// Every piece of the team has reached the goal.
    #[must_use]
    pub fn all_finished(&self, team: TeamId) -> bool {
        self.team_positions(team).iter().all(|p| p.is_finished())
    }

    /// Sum of the team's relative positions, a crude progress measure.
    #[must_use]
    pub fn progress(&self, team: TeamId) -> u32 {
        self.team_positions(team)
            .iter()
            .map(|p| u32::from(p.value()))
            .sum()
    }

    /// Raw `[team][piece]` snapshot for renderers and bindings.
    #[must_use]
    pub fn to_raw(&self) -> [[u8; PIECES_PER_TEAM]; TEAM_COUNT] {
        self.positions.map(|row| row.map(Position::value))
    }

    /// Absolute cell of every piece, `[team][piece]`.
    #[must_use]
    pub fn to_absolute(&self) -> [[AbsoluteCell; PIECES_PER_TEAM]; TEAM_COUNT] {
        TeamId::ALL.map(|team| {
            PieceIndex::ALL.map(|piece| self.position(team, piece).to_absolute(team))
        })
    }
}
