//! Move resolver: which pieces may move for a roll, and what a move does.
//!
//! All functions here are pure. They take a board by reference and return
//! a fresh board; only the game engine decides which board is current.

pub mod moves;

pub use moves::{
    apply_move, legal_moves, resolve_move, target_position, LegalMoves, MoveEffect, MoveOutcome,
};
