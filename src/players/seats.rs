//! One provider per team.

use rustc_hash::FxHashMap;

use crate::core::{PieceIndex, TeamId};

use super::selector::{MoveContext, MoveSelector};

/// Dispatches each decision to the provider seated for the acting team.
///
/// ```
/// use ludo_engine::core::TeamId;
/// use ludo_engine::players::{FirstLegal, MaxProgress, MoveSelector, SeatTable};
///
/// let table = SeatTable::new()
///     .seat(TeamId::ALL[0], FirstLegal)
///     .seat(TeamId::ALL[2], MaxProgress);
///
/// assert_eq!(table.name_for(TeamId::ALL[2]), "max-progress");
/// ```
#[derive(Default)]
pub struct SeatTable {
    seats: FxHashMap<TeamId, Box<dyn MoveSelector>>,
}

impl SeatTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a provider for `team`, replacing any previous one.
    #[must_use]
    pub fn seat(mut self, team: TeamId, selector: impl MoveSelector + 'static) -> Self {
        self.seats.insert(team, Box::new(selector));
        self
    }

    /// Seat an already boxed provider.
    pub fn insert(&mut self, team: TeamId, selector: Box<dyn MoveSelector>) {
        self.seats.insert(team, selector);
    }

    /// Whether `team` has a provider.
    #[must_use]
    pub fn is_seated(&self, team: TeamId) -> bool {
        self.seats.contains_key(&team)
    }

    /// Pair each placed team with the provider that played it.
    #[must_use]
    pub fn attribute<'a>(&'a self, placements: &[TeamId]) -> Vec<(TeamId, &'a str)> {
        placements
            .iter()
            .map(|&team| (team, self.name_for(team)))
            .collect()
    }
}

impl MoveSelector for SeatTable {
    fn name(&self) -> &str {
        "seat-table"
    }

    fn name_for(&self, team: TeamId) -> &str {
        self.seats
            .get(&team)
            .map_or("unseated", |selector| selector.name_for(team))
    }

    fn choose(&mut self, ctx: &MoveContext<'_>) -> Option<PieceIndex> {
        self.seats.get_mut(&ctx.team)?.choose(ctx)
    }
}

impl std::fmt::Debug for SeatTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut teams: Vec<_> = self.seats.keys().copied().collect();
        teams.sort_unstable();
        f.debug_struct("SeatTable").field("teams", &teams).finish()
    }
}
