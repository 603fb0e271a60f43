//! Decision providers.
//!
//! - `MoveSelector`: the one-operation interface the engine depends on
//! - `FirstLegal`, `RandomLegal`, `MaxProgress`, `Scripted`: stock strategies
//! - `FnSelector`: any closure
//! - `SeatTable`: a provider per team, with attribution for result tables

pub mod seats;
pub mod selector;
pub mod strategies;

pub use seats::SeatTable;
pub use selector::{FnSelector, MoveContext, MoveSelector};
pub use strategies::{FirstLegal, MaxProgress, RandomLegal, Scripted};
