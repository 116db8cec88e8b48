use std::time::Duration;

/// One event of a recording together with the recording clock at the time it was emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoEvent {
    pub time: Duration,
    pub event: GameEvent,
}

impl DemoEvent {
    pub fn new(time: Duration, event: GameEvent) -> Self {
        Self { time, event }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    MatchStart {
        #[serde(default)]
        participants: Vec<Participant>,
    },
    PhaseChanged {
        phase: GamePhase,
    },
    WarmupChanged {
        active: bool,
    },
    RoundStart,
    RoundEnd {
        winner: Affiliation,
        reason: RoundEndReason,
    },
    RoundMvp {
        player: Participant,
    },
    Kill(KillEvent),
    Damage(DamageEvent),
    RankUpdate(RankUpdateEvent),
}

/// Snapshot of a participant as the recording reports it at the time of an event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Participant {
    pub steam_id: u64,
    #[serde(default)]
    pub name: String,
    pub team: Affiliation,
    #[serde(default)]
    pub is_bot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct KillEvent {
    pub victim: Participant,
    pub killer: Option<Participant>,
    pub assister: Option<Participant>,
    #[serde(default)]
    pub weapon: String,
    #[serde(default)]
    pub headshot: bool,
    #[serde(default)]
    pub assisted_flash: bool,
    #[serde(default)]
    pub attacker_blind: bool,
    #[serde(default)]
    pub no_scope: bool,
    #[serde(default)]
    pub through_smoke: bool,
    #[serde(default)]
    pub penetrated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DamageEvent {
    pub attacker: Option<Participant>,
    pub victim: Option<Participant>,
    pub health_damage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RankUpdateEvent {
    pub steam_id: u64,
    pub old_rank: i32,
    pub new_rank: i32,
    pub win_count: i32,
}

/// The in-game team a participant is on at a given moment.
///
/// Flips at halftime, so it is only meaningful together with the side swap state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "u8")]
pub enum Affiliation {
    Unassigned,
    Spectators,
    Terrorists,
    CounterTerrorists,
    Other(u8),
}

impl From<u8> for Affiliation {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Unassigned,
            1 => Self::Spectators,
            2 => Self::Terrorists,
            3 => Self::CounterTerrorists,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "i32")]
pub enum GamePhase {
    Init,
    Pregame,
    StartGameplay,
    TeamSideSwitch,
    GameHalfEnded,
    GameEnded,
    StaleMate,
    GameOver,
    Other(i32),
}

pub static GAME_PHASES: phf::Map<i32, GamePhase> = phf::phf_map! {
    0_i32 => GamePhase::Init,
    1_i32 => GamePhase::Pregame,
    2_i32 => GamePhase::StartGameplay,
    3_i32 => GamePhase::TeamSideSwitch,
    4_i32 => GamePhase::GameHalfEnded,
    5_i32 => GamePhase::GameEnded,
    6_i32 => GamePhase::StaleMate,
    7_i32 => GamePhase::GameOver,
};

impl From<i32> for GamePhase {
    fn from(value: i32) -> Self {
        GAME_PHASES.get(&value).copied().unwrap_or(Self::Other(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "i32")]
pub enum RoundEndReason {
    StillInProgress,
    TargetBombed,
    VipEscaped,
    VipKilled,
    TerroristsEscaped,
    CtStoppedEscape,
    TerroristsStopped,
    BombDefused,
    CtWin,
    TerroristsWin,
    Draw,
    HostagesRescued,
    TargetSaved,
    HostagesNotRescued,
    TerroristsNotEscaped,
    VipNotEscaped,
    GameStart,
    TerroristsSurrender,
    CtSurrender,
    TerroristsPlanted,
    CtReachedHostage,
}

// https://github.com/markus-wa/demoinfocs-golang/blob/205b0bb25e9f3e96e1d306d154199b4a6292940e/pkg/demoinfocs/events/events.go#L53
pub static ROUND_END_REASONS: phf::Map<i32, RoundEndReason> = phf::phf_map! {
    0_i32 => RoundEndReason::StillInProgress,
    1_i32 => RoundEndReason::TargetBombed,
    2_i32 => RoundEndReason::VipEscaped,
    3_i32 => RoundEndReason::VipKilled,
    4_i32 => RoundEndReason::TerroristsEscaped,
    5_i32 => RoundEndReason::CtStoppedEscape,
    6_i32 => RoundEndReason::TerroristsStopped,
    7_i32 => RoundEndReason::BombDefused,
    8_i32 => RoundEndReason::CtWin,
    9_i32 => RoundEndReason::TerroristsWin,
    10_i32 => RoundEndReason::Draw,
    11_i32 => RoundEndReason::HostagesRescued,
    12_i32 => RoundEndReason::TargetSaved,
    13_i32 => RoundEndReason::HostagesNotRescued,
    14_i32 => RoundEndReason::TerroristsNotEscaped,
    15_i32 => RoundEndReason::VipNotEscaped,
    16_i32 => RoundEndReason::GameStart,
    17_i32 => RoundEndReason::TerroristsSurrender,
    18_i32 => RoundEndReason::CtSurrender,
    19_i32 => RoundEndReason::TerroristsPlanted,
    20_i32 => RoundEndReason::CtReachedHostage,
};

#[derive(Debug, thiserror::Error)]
#[error("unknown round end reason {0}")]
pub struct UnknownReason(pub i32);

impl TryFrom<i32> for RoundEndReason {
    type Error = UnknownReason;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ROUND_END_REASONS.get(&value).copied().ok_or(UnknownReason(value))
    }
}
