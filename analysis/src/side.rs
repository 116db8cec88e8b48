//! Mapping between the in-game affiliation of a team and the side it started the match on.

use crate::events::{Affiliation, GamePhase};

/// The match-stable index of a team, `First` being the team that started as the attackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Returns `None` for anything that is not one of the two playing affiliations.
pub fn resolve_side(affiliation: Affiliation, sides_switched: bool) -> Option<Side> {
    let side = match affiliation {
        Affiliation::Terrorists => Side::First,
        Affiliation::CounterTerrorists => Side::Second,
        _ => return None,
    };

    if sides_switched {
        Some(side.opponent())
    } else {
        Some(side)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SideResolver {
    sides_switched: bool,
}

impl SideResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sides_switched(&self) -> bool {
        self.sides_switched
    }

    pub fn resolve(&self, affiliation: Affiliation) -> Option<Side> {
        resolve_side(affiliation, self.sides_switched)
    }

    /// The affiliation the team of `side` currently plays as.
    pub fn affiliation_of(&self, side: Side) -> Affiliation {
        match (side, self.sides_switched) {
            (Side::First, false) | (Side::Second, true) => Affiliation::Terrorists,
            (Side::Second, false) | (Side::First, true) => Affiliation::CounterTerrorists,
        }
    }

    pub fn phase_changed(&mut self, phase: GamePhase) {
        match phase {
            GamePhase::Init => {
                self.sides_switched = false;
            }
            GamePhase::TeamSideSwitch => {
                self.sides_switched = !self.sides_switched;
                tracing::debug!(sides_switched = self.sides_switched, "Teams switched sides");
            }
            _ => {}
        };
    }

    pub fn reset(&mut self) {
        self.sides_switched = false;
    }
}
