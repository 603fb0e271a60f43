//! Turn sequencing: whose turn it is, extra turns, placements.

pub mod sequencer;

pub use sequencer::{Transition, TurnPhase, TurnState};
