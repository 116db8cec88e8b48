//! Folding of closed rounds into the running per-player and per-team totals.

use std::collections::HashMap;

use common::{PlayerResult, RankChange, TeamResult};

use crate::registry::Player;
use crate::round::{Damage, Kill, Round};
use crate::side::Side;

/// Rounds whose winner is credited with a pistol round win.
pub const PISTOL_ROUNDS: [u16; 2] = [1, 16];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TeamTotals {
    pub wins: u16,
    pub pistol_round_wins: u16,
}

#[derive(Debug)]
struct PlayerEntry {
    side: Side,
    stats: PlayerResult,
}

/// Running totals of a match.
///
/// Lives independently of the registry, so a restart of the match does not lose the
/// totals of rounds that were already closed.
#[derive(Debug, Default)]
pub struct Standings {
    teams: [TeamTotals; 2],
    players: HashMap<u64, PlayerEntry>,
    order: Vec<u64>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure the player has a row, filed under the side it was most recently assigned to.
    pub fn register(&mut self, player: &Player) {
        match self.players.get_mut(&player.steam_id) {
            Some(entry) => {
                entry.side = player.side;
            }
            None => {
                self.order.push(player.steam_id);
                self.players.insert(
                    player.steam_id,
                    PlayerEntry {
                        side: player.side,
                        stats: PlayerResult::new(player.steam_id, player.name.clone()),
                    },
                );
            }
        };
    }

    pub fn player(&self, steam_id: u64) -> Option<&PlayerResult> {
        self.players.get(&steam_id).map(|e| &e.stats)
    }

    pub fn side_of(&self, steam_id: u64) -> Option<Side> {
        self.players.get(&steam_id).map(|e| e.side)
    }

    pub fn team(&self, side: Side) -> &TeamTotals {
        &self.teams[side.index()]
    }

    fn stats_mut(&mut self, steam_id: Option<u64>) -> Option<&mut PlayerResult> {
        steam_id
            .and_then(|id| self.players.get_mut(&id))
            .map(|e| &mut e.stats)
    }

    /// Returns whether the MVP could be credited to a known player.
    pub fn credit_mvp(&mut self, steam_id: u64) -> bool {
        match self.stats_mut(Some(steam_id)) {
            Some(stats) => {
                stats.mvps = stats.mvps.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn record_rank(&mut self, steam_id: u64, rank: RankChange) -> bool {
        match self.stats_mut(Some(steam_id)) {
            Some(stats) => {
                stats.rank = Some(rank);
                true
            }
            None => false,
        }
    }

    pub fn fold_round(&mut self, round: &Round) {
        if let Some(mvp) = round.mvp {
            self.credit_mvp(mvp);
        }

        if let Some(winner) = round.winner {
            let team = &mut self.teams[winner.index()];
            team.wins = team.wins.saturating_add(1);
            if PISTOL_ROUNDS.contains(&round.number) {
                team.pistol_round_wins = team.pistol_round_wins.saturating_add(1);
            }
        }

        for damage in round.damage.iter() {
            self.damage(damage);
        }

        let mut round_kills = HashMap::<u64, u16>::new();
        let mut clutches = Clutches::new(&round.rosters);
        for (index, kill) in round.kills.iter().enumerate() {
            self.kill(kill, index == 0, &mut round_kills);
            if let Some(victim) = kill.victim {
                clutches.died(victim);
            }
        }

        for (steam_id, kills) in round_kills {
            let stats = match self.stats_mut(Some(steam_id)) {
                Some(s) => s,
                None => continue,
            };

            match kills {
                3 => stats.rounds_with_3k = stats.rounds_with_3k.saturating_add(1),
                4 => stats.rounds_with_4k = stats.rounds_with_4k.saturating_add(1),
                5 => stats.rounds_with_5k = stats.rounds_with_5k.saturating_add(1),
                _ => {}
            };
        }

        if let Some((clutcher, opponents)) = round.winner.and_then(|w| clutches.get(w)) {
            if let Some(stats) = self.stats_mut(Some(clutcher)) {
                match opponents {
                    3 => stats.won_1v3 = stats.won_1v3.saturating_add(1),
                    4 => stats.won_1v4 = stats.won_1v4.saturating_add(1),
                    5 => stats.won_1v5 = stats.won_1v5.saturating_add(1),
                    _ => {}
                };
            }
        }
    }

    fn damage(&mut self, damage: &Damage) {
        if let Some(attacker) = self.stats_mut(damage.attacker) {
            attacker.damage_dealt = attacker.damage_dealt.saturating_add(damage.health_damage);
        }
    }

    fn kill(&mut self, kill: &Kill, opening: bool, round_kills: &mut HashMap<u64, u16>) {
        if let Some(victim) = self.stats_mut(kill.victim) {
            victim.deaths = victim.deaths.saturating_add(1);
            if opening {
                victim.opening_duel_attempts = victim.opening_duel_attempts.saturating_add(1);
            }
        }

        // No killer for deaths caused by the world, e.g. fall damage
        if let Some(killer) = self.stats_mut(kill.killer) {
            killer.kills = killer.kills.saturating_add(1);
            if kill.headshot {
                killer.headshots = killer.headshots.saturating_add(1);
            }
            if opening {
                killer.opening_duel_attempts = killer.opening_duel_attempts.saturating_add(1);
                killer.entry_kills = killer.entry_kills.saturating_add(1);
            }

            let count = round_kills.entry(killer.steam_id).or_default();
            *count = count.saturating_add(1);
        }

        if let Some(assister) = self.stats_mut(kill.assister) {
            assister.assists = assister.assists.saturating_add(1);
        }
    }

    /// Builds the per-team results, players in the order they were first registered.
    pub fn to_teams(&self) -> [TeamResult; 2] {
        let mut teams = Side::BOTH.map(|side| TeamResult {
            starting_side: side.index() as u8,
            players: Vec::new(),
            wins: self.teams[side.index()].wins,
            pistol_round_wins: self.teams[side.index()].pistol_round_wins,
        });

        for steam_id in self.order.iter() {
            if let Some(entry) = self.players.get(steam_id) {
                teams[entry.side.index()].players.push(entry.stats.clone());
            }
        }

        teams
    }
}

/// Tracks who is still alive on each side during a round and the first moment a side is
/// down to its last player.
struct Clutches {
    alive: [Vec<u64>; 2],
    last_standing: [Option<(u64, usize)>; 2],
}

impl Clutches {
    fn new(rosters: &[Vec<u64>; 2]) -> Self {
        Self {
            alive: rosters.clone(),
            last_standing: [None, None],
        }
    }

    fn died(&mut self, steam_id: u64) {
        for side in Side::BOTH {
            let alive = &mut self.alive[side.index()];
            let before = alive.len();
            alive.retain(|id| *id != steam_id);
            if alive.len() == before {
                continue;
            }

            if alive.len() == 1 && self.last_standing[side.index()].is_none() {
                let opponents = self.alive[side.opponent().index()].len();
                self.last_standing[side.index()] = Some((self.alive[side.index()][0], opponents));
            }
        }
    }

    fn get(&self, side: Side) -> Option<(u64, usize)> {
        self.last_standing[side.index()]
    }
}
