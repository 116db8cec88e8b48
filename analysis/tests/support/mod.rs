#![allow(dead_code)]

use std::time::Duration;

use analysis::events::{
    Affiliation, DamageEvent, DemoEvent, GameEvent, GamePhase, KillEvent, Participant,
    RoundEndReason,
};
use analysis::recording::DemoHeader;
use analysis::tracker::RoundTracker;

pub fn header() -> DemoHeader {
    DemoHeader {
        map: "de_nuke".to_owned(),
        start_time: chrono::DateTime::from_timestamp(1_714_586_400, 0).unwrap(),
    }
}

pub fn player(steam_id: u64, team: Affiliation) -> Participant {
    Participant {
        steam_id,
        name: format!("player-{}", steam_id),
        team,
        is_bot: false,
    }
}

pub fn t(steam_id: u64) -> Participant {
    player(steam_id, Affiliation::Terrorists)
}

pub fn ct(steam_id: u64) -> Participant {
    player(steam_id, Affiliation::CounterTerrorists)
}

pub fn bot(steam_id: u64, team: Affiliation) -> Participant {
    Participant {
        is_bot: true,
        ..player(steam_id, team)
    }
}

pub fn match_start(participants: &[Participant]) -> GameEvent {
    GameEvent::MatchStart {
        participants: participants.to_vec(),
    }
}

pub fn phase(phase: GamePhase) -> GameEvent {
    GameEvent::PhaseChanged { phase }
}

pub fn round_end(winner: Affiliation) -> GameEvent {
    let reason = match winner {
        Affiliation::Terrorists => RoundEndReason::TerroristsWin,
        _ => RoundEndReason::CtWin,
    };
    GameEvent::RoundEnd { winner, reason }
}

pub fn kill_full(
    victim: &Participant,
    killer: Option<&Participant>,
    assister: Option<&Participant>,
    headshot: bool,
) -> GameEvent {
    GameEvent::Kill(KillEvent {
        victim: victim.clone(),
        killer: killer.cloned(),
        assister: assister.cloned(),
        weapon: "ak47".to_owned(),
        headshot,
        assisted_flash: false,
        attacker_blind: false,
        no_scope: false,
        through_smoke: false,
        penetrated: false,
    })
}

pub fn kill(victim: &Participant, killer: &Participant) -> GameEvent {
    kill_full(victim, Some(killer), None, false)
}

pub fn damage(attacker: Option<&Participant>, victim: &Participant, health_damage: u32) -> GameEvent {
    GameEvent::Damage(DamageEvent {
        attacker: attacker.cloned(),
        victim: Some(victim.clone()),
        health_damage,
    })
}

/// A sequence of events one second apart.
#[derive(Debug, Default)]
pub struct Script {
    clock: u64,
    events: Vec<DemoEvent>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, event: GameEvent) -> Self {
        self.clock += 1000;
        self.events
            .push(DemoEvent::new(Duration::from_millis(self.clock), event));
        self
    }

    pub fn extend<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = GameEvent>,
    {
        for event in events {
            self = self.push(event);
        }
        self
    }

    pub fn events(&self) -> Vec<DemoEvent> {
        self.events.clone()
    }

    pub fn tracker(&self) -> RoundTracker {
        let mut tracker = RoundTracker::new();
        for event in self.events() {
            tracker.handle(event);
        }
        tracker
    }

    pub fn run(&self) -> Result<common::MatchResult, analysis::ParseError> {
        analysis::aggregator::MatchAggregator::run(
            analysis::ParserConfig::default(),
            header(),
            self.events().into_iter().map(Ok),
        )
    }
}
