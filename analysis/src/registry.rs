//! Resolution of in-stream participants to the players of the match.

use std::collections::HashMap;

use crate::events::{Affiliation, Participant};
use crate::side::{Side, SideResolver};
use crate::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub steam_id: u64,
    pub name: String,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub starting_side: Side,
    pub affiliation: Affiliation,
    pub players: Vec<u64>,
}

impl Team {
    fn new(starting_side: Side, sides: &SideResolver) -> Self {
        Self {
            starting_side,
            affiliation: sides.affiliation_of(starting_side),
            players: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Registry {
    players: HashMap<u64, Player>,
    teams: [Team; 2],
}

impl Registry {
    pub fn new(sides: &SideResolver) -> Self {
        Self {
            players: HashMap::new(),
            teams: [Team::new(Side::First, sides), Team::new(Side::Second, sides)],
        }
    }

    /// Drops every known player and rebuilds both teams from the given roster.
    ///
    /// Bots and participants without a playing affiliation are skipped.
    pub fn reset(&mut self, participants: &[Participant], sides: &SideResolver) {
        *self = Self::new(sides);

        for participant in participants {
            if let Err(e) = self.resolve(participant, sides) {
                tracing::debug!(%e, "Not registering participant");
            }
        }
    }

    pub fn resolve(
        &mut self,
        participant: &Participant,
        sides: &SideResolver,
    ) -> Result<&Player, ResolveError> {
        if participant.is_bot {
            return Err(ResolveError::NotAPlayer(participant.steam_id));
        }

        match self.players.entry(participant.steam_id) {
            std::collections::hash_map::Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            std::collections::hash_map::Entry::Vacant(entry) => {
                let side = sides
                    .resolve(participant.team)
                    .ok_or(ResolveError::NoSide {
                        steam_id: participant.steam_id,
                        affiliation: participant.team,
                    })?;

                self.teams[side.index()].players.push(participant.steam_id);

                tracing::trace!(steam_id = participant.steam_id, name = %participant.name, ?side, "Registered player");

                Ok(&*entry.insert(Player {
                    steam_id: participant.steam_id,
                    name: participant.name.clone(),
                    side,
                }))
            }
        }
    }

    pub fn get(&self, steam_id: u64) -> Result<&Player, ResolveError> {
        self.players
            .get(&steam_id)
            .ok_or(ResolveError::Unknown(steam_id))
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.teams
            .iter()
            .flat_map(|team| team.players.iter())
            .filter_map(|id| self.players.get(id))
    }

    pub fn sync_affiliations(&mut self, sides: &SideResolver) {
        for team in self.teams.iter_mut() {
            team.affiliation = sides.affiliation_of(team.starting_side);
        }
    }
}
