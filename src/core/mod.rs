//! Core engine types: teams, positions, the board, RNG, configuration, errors.
//!
//! Everything here is rule-agnostic plumbing except the position model,
//! which encodes the board topology every other module relies on.

pub mod board;
pub mod config;
pub mod error;
pub mod position;
pub mod rng;
pub mod team;

pub use board::Board;
pub use config::GameConfig;
pub use error::{LudoError, LudoResult};
pub use position::{AbsoluteCell, Position, GLOBES, GOAL, LAST_TRACK, STARS, TEAM_OFFSET};
pub use rng::{GameRng, GameRngState};
pub use team::{PieceIndex, TeamId, PIECES_PER_TEAM, TEAM_COUNT};
