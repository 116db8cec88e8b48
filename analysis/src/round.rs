use std::time::Duration;

use crate::events::RoundEndReason;
use crate::side::Side;

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub number: u16,
    pub start: Duration,
    pub duration: Duration,
    /// In arrival order, the first entry is the opening duel
    pub kills: Vec<Kill>,
    pub damage: Vec<Damage>,
    pub winner: Option<Side>,
    pub reason: Option<RoundEndReason>,
    pub mvp: Option<u64>,
    /// Registered players of each side when the round started
    pub rosters: [Vec<u64>; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kill {
    pub time: Duration,
    pub victim: Option<u64>,
    pub killer: Option<u64>,
    pub assister: Option<u64>,
    pub weapon: String,
    pub headshot: bool,
    pub assisted_flash: bool,
    pub attacker_blind: bool,
    pub no_scope: bool,
    pub through_smoke: bool,
    pub penetrated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Damage {
    pub time: Duration,
    pub attacker: Option<u64>,
    pub victim: Option<u64>,
    pub health_damage: u32,
}

impl Round {
    pub fn new(number: u16, start: Duration, rosters: [Vec<u64>; 2]) -> Self {
        Self {
            number,
            start,
            duration: Duration::ZERO,
            kills: Vec::new(),
            damage: Vec::new(),
            winner: None,
            reason: None,
            mvp: None,
            rosters,
        }
    }

    pub fn to_result(&self) -> common::RoundResult {
        common::RoundResult {
            number: self.number,
            duration: self.duration,
            winner: self.winner.map(|s| s.index() as u8),
            reason: self.reason.map(|r| format!("{:?}", r)),
            mvp: self.mvp,
            kills: self.kills.iter().map(Kill::to_result).collect(),
        }
    }
}

impl Kill {
    pub fn to_result(&self) -> common::KillResult {
        common::KillResult {
            time: self.time,
            victim: self.victim,
            killer: self.killer,
            assister: self.assister,
            weapon: self.weapon.clone(),
            headshot: self.headshot,
            assisted_flash: self.assisted_flash,
            attacker_blind: self.attacker_blind,
            no_scope: self.no_scope,
            through_smoke: self.through_smoke,
            penetrated: self.penetrated,
        }
    }
}
