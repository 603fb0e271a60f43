//! Game engine and turn history.
//!
//! `Game` is the single entry point for collaborators: it owns the board
//! and the turn state, and only mutates them through the move resolver.

mod engine;
mod history;

pub use engine::{Game, Rolled};
pub use history::{TurnAction, TurnRecord};
