//! Team-relative piece positions and board topology.
//!
//! Every piece position is expressed relative to its own team's entry point:
//!
//! | Range  | Meaning                                   |
//! |--------|-------------------------------------------|
//! | 0      | At start, not on the board                |
//! | 1-51   | Shared 52-cell ring                       |
//! | 52-56  | The team's private home stretch           |
//! | 57     | Goal                                      |
//!
//! Star and globe cells are fixed sets of shared-track positions. The first
//! globe (position 1) is a team's own entry cell and offers no protection;
//! the rest are safe cells.
//!
//! ## Absolute layout
//!
//! [`Position::to_absolute`] maps onto a single 80-cell index used only by
//! renderers: 0-3 start slots, 4-55 the shared ring beginning at team 0's
//! entry globe, 56-79 the four home arms (six cells each, goal included).

use serde::{Deserialize, Serialize};

use super::error::{LudoError, LudoResult};
use super::team::TeamId;

/// Star cells, ascending.
pub const STARS: [u8; 8] = [6, 12, 19, 25, 32, 38, 45, 51];

/// Globe cells, ascending. `GLOBES[0]` is the unprotected entry globe.
pub const GLOBES: [u8; 8] = [1, 9, 14, 22, 27, 35, 40, 48];

/// Goal position.
pub const GOAL: u8 = 57;

/// Last position on the shared ring.
pub const LAST_TRACK: u8 = 51;

/// First position of the private home stretch.
pub const HOME_START: u8 = 52;

/// Number of cells on the shared ring.
pub const TRACK_LEN: u8 = 52;

/// Ring cells between two adjacent teams' entry points.
pub const TEAM_OFFSET: u8 = 13;

/// Cells per home arm in the absolute layout (52-57 inclusive).
pub const HOME_ARM_LEN: u8 = GOAL - HOME_START + 1;

/// First absolute index of the shared ring.
const ABS_TRACK_BASE: u8 = 4;

/// First absolute index of the home arms.
const ABS_HOME_BASE: u8 = ABS_TRACK_BASE + TRACK_LEN;

/// Total number of absolute cells.
pub const ABSOLUTE_CELLS: usize = ABS_HOME_BASE as usize + 4 * HOME_ARM_LEN as usize;

/// A team-relative piece position in `0..=57`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// At start.
    pub const START: Position = Position(0);

    /// At goal.
    pub const GOAL: Position = Position(GOAL);

    /// Create a position, rejecting values above the goal.
    pub fn new(value: u8) -> LudoResult<Self> {
        if value <= GOAL {
            Ok(Self(value))
        } else {
            Err(LudoError::InvariantViolation {
                what: "position",
                value: i64::from(value),
            })
        }
    }

    /// Get the raw relative value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Piece has not entered the board.
    #[must_use]
    pub const fn is_at_start(self) -> bool {
        self.0 == 0
    }

    /// Piece is on the shared ring.
    #[must_use]
    pub const fn is_on_shared_track(self) -> bool {
        self.0 >= 1 && self.0 <= LAST_TRACK
    }

    /// Piece is on its private home stretch, short of the goal.
    #[must_use]
    pub const fn is_in_home_stretch(self) -> bool {
        self.0 >= HOME_START && self.0 < GOAL
    }

    /// Piece has reached the goal.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.0 == GOAL
    }

    /// Cell is a star.
    #[must_use]
    pub fn is_star(self) -> bool {
        STARS.contains(&self.0)
    }

    /// Cell is any globe, including the unprotected entry globe.
    #[must_use]
    pub fn is_globe(self) -> bool {
        GLOBES.contains(&self.0)
    }

    /// Cell is a globe that shields a lone piece from capture.
    #[must_use]
    pub fn is_protected_globe(self) -> bool {
        GLOBES[1..].contains(&self.0)
    }

    /// First star strictly ahead of this position.
    #[must_use]
    pub fn next_star(self) -> Option<Position> {
        next_after(&STARS, self.0)
    }

    /// First globe strictly ahead of this position.
    #[must_use]
    pub fn next_globe(self) -> Option<Position> {
        next_after(&GLOBES, self.0)
    }

    /// Advance by `steps`, stopping exactly at the goal.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Position {
        Position(self.0.saturating_add(steps).min(GOAL))
    }

    /// Re-express a shared-track cell in the frame of the team `steps`
    /// quarter turns clockwise from the owner.
    ///
    /// Returns `None` when `self` is off the shared track, or when the cell
    /// falls on the one ring cell the other team never occupies (its
    /// relative 52, directly before its entry).
    ///
    /// ```
    /// use ludo_engine::core::Position;
    ///
    /// // Team 0's cell 14 is team 1's cell 1 (their entry globe).
    /// let cell = Position::new(14).unwrap();
    /// assert_eq!(cell.relative_to_opponent(1), Some(Position::new(1).unwrap()));
    /// ```
    #[must_use]
    pub fn relative_to_opponent(self, steps: u8) -> Option<Position> {
        if !self.is_on_shared_track() {
            return None;
        }
        let shift = i32::from(steps) * i32::from(TEAM_OFFSET);
        let translated = (i32::from(self.0) - shift - 1).rem_euclid(i32::from(TRACK_LEN)) + 1;
        let translated = Position(u8::try_from(translated).ok()?);
        translated.is_on_shared_track().then_some(translated)
    }

    /// Map to the renderer's absolute cell for a piece of `team`.
    #[must_use]
    pub fn to_absolute(self, team: TeamId) -> AbsoluteCell {
        let t = team.raw();
        if self.is_at_start() {
            AbsoluteCell::Start(team)
        } else if self.0 >= HOME_START {
            AbsoluteCell::HomeArm {
                team,
                step: self.0 - HOME_START,
            }
        } else {
            let ring = (u16::from(self.0) + u16::from(t) * u16::from(TEAM_OFFSET) - 1)
                % u16::from(TRACK_LEN);
            AbsoluteCell::Track(ring as u8)
        }
    }
}

fn next_after(cells: &[u8], current: u8) -> Option<Position> {
    cells.iter().copied().find(|&c| c > current).map(Position)
}

impl TryFrom<u8> for Position {
    type Error = LudoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell in the renderer's global coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsoluteCell {
    /// The team's start yard.
    Start(TeamId),
    /// Shared ring cell, 0 being team 0's entry globe.
    Track(u8),
    /// Home arm cell; step 5 is the goal.
    HomeArm {
        /// Owner of the arm.
        team: TeamId,
        /// Steps along the arm, 0..=5.
        step: u8,
    },
}

impl AbsoluteCell {
    /// Flat index in `0..80`.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AbsoluteCell::Start(team) => team.index(),
            AbsoluteCell::Track(ring) => usize::from(ABS_TRACK_BASE + ring),
            AbsoluteCell::HomeArm { team, step } => {
                usize::from(ABS_HOME_BASE) + team.index() * usize::from(HOME_ARM_LEN) + usize::from(step)
            }
        }
    }
}
