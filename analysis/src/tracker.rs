//! The match state machine.
//!
//! Every event of a recording goes through [`RoundTracker::handle`], which owns the live
//! state of the match (side swaps, registry, the open round) and hands every closed round
//! to the [`Standings`].

use std::time::Duration;

use crate::attribution::Standings;
use crate::events::{
    Affiliation, DamageEvent, DemoEvent, GameEvent, GamePhase, KillEvent, Participant,
    RankUpdateEvent, RoundEndReason,
};
use crate::registry::Registry;
use crate::round::{Damage, Kill, Round};
use crate::side::{Side, SideResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    NoRoundOpen,
    RoundOpen,
    MatchOver,
}

#[derive(Debug)]
pub struct RoundTracker {
    sides: SideResolver,
    registry: Registry,
    standings: Standings,
    rounds: Vec<Round>,
    open: Option<Round>,
    round_count: u16,
    warmup: bool,
    match_over: bool,
    duration: Duration,
}

impl Default for RoundTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTracker {
    pub fn new() -> Self {
        let sides = SideResolver::new();
        let registry = Registry::new(&sides);

        Self {
            sides,
            registry,
            standings: Standings::new(),
            rounds: Vec::new(),
            open: None,
            round_count: 0,
            warmup: false,
            match_over: false,
            duration: Duration::ZERO,
        }
    }

    pub fn state(&self) -> State {
        if self.match_over {
            State::MatchOver
        } else if self.open.is_some() {
            State::RoundOpen
        } else {
            State::NoRoundOpen
        }
    }

    pub fn is_over(&self) -> bool {
        self.match_over
    }

    pub fn sides(&self) -> &SideResolver {
        &self.sides
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    /// The closed rounds, in play order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn open_round(&self) -> Option<&Round> {
        self.open.as_ref()
    }

    /// Recording time at which the match ended, zero while it is still running.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn into_parts(self) -> (Vec<Round>, Standings) {
        if let Some(round) = self.open.as_ref() {
            tracing::debug!(round = round.number, "Dropping round that was never closed");
        }
        (self.rounds, self.standings)
    }

    pub fn handle(&mut self, event: DemoEvent) {
        let DemoEvent { time, event } = event;

        // The last round can still be closed and get its MVP once the match is over
        if self.match_over
            && !matches!(
                event,
                GameEvent::RankUpdate(_) | GameEvent::RoundEnd { .. } | GameEvent::RoundMvp { .. }
            )
        {
            tracing::trace!(?event, "Ignoring event after the match ended");
            return;
        }

        match event {
            GameEvent::MatchStart { participants } => self.match_start(&participants),
            GameEvent::PhaseChanged { phase } => self.phase_changed(time, phase),
            GameEvent::WarmupChanged { active } => {
                tracing::debug!(active, "Warmup changed");
                self.warmup = active;
            }
            GameEvent::RoundStart => self.round_start(time),
            GameEvent::RoundEnd { winner, reason } => self.round_end(time, winner, reason),
            GameEvent::RoundMvp { player } => self.round_mvp(&player),
            GameEvent::Kill(kill) => self.kill(time, kill),
            GameEvent::Damage(damage) => self.damage(time, damage),
            GameEvent::RankUpdate(update) => self.rank_update(update),
        };
    }

    fn match_start(&mut self, participants: &[Participant]) {
        self.sides.reset();
        self.warmup = false;
        self.registry.reset(participants, &self.sides);
        for player in self.registry.players() {
            self.standings.register(player);
        }

        tracing::info!(
            players = self.registry.len(),
            closed_rounds = self.rounds.len(),
            "Match started"
        );
    }

    fn phase_changed(&mut self, time: Duration, phase: GamePhase) {
        self.sides.phase_changed(phase);
        self.registry.sync_affiliations(&self.sides);

        if phase == GamePhase::GameEnded {
            if let Some(round) = self.open.as_ref() {
                tracing::debug!(round = round.number, "Match ended while a round is still open");
            }

            self.duration = time;
            self.match_over = true;
            tracing::info!(rounds = self.rounds.len(), duration = ?time, "Match ended");
        }
    }

    fn round_start(&mut self, time: Duration) {
        if self.warmup {
            tracing::debug!("Ignoring round start during warmup");
            return;
        }
        if let Some(open) = self.open.as_ref() {
            tracing::debug!(round = open.number, "Ignoring duplicate round start");
            return;
        }

        self.round_count = self.round_count.saturating_add(1);
        let rosters = Side::BOTH.map(|side| self.registry.team(side).players.clone());
        self.open = Some(Round::new(self.round_count, time, rosters));

        tracing::debug!(round = self.round_count, "Starting round");
    }

    fn round_end(&mut self, time: Duration, winner: Affiliation, reason: RoundEndReason) {
        let mut round = match self.open.take() {
            Some(r) => r,
            None => {
                tracing::debug!(?reason, "Ignoring round end without an open round");
                return;
            }
        };

        round.duration = time.saturating_sub(round.start);
        round.winner = self.sides.resolve(winner);
        round.reason = Some(reason);

        if round.winner.is_none() {
            tracing::debug!(round = round.number, ?winner, "Round ended without a resolvable winner");
        }
        tracing::debug!(round = round.number, winner = ?round.winner, ?reason, "Ending round");

        self.standings.fold_round(&round);
        self.rounds.push(round);
    }

    fn round_mvp(&mut self, participant: &Participant) {
        let mvp = match self.resolve(participant) {
            Some(id) => id,
            None => return,
        };

        if let Some(open) = self.open.as_mut() {
            open.mvp = Some(mvp);
            return;
        }

        // The announcement usually arrives after the round already ended and was folded
        match self.rounds.last_mut() {
            Some(round) if round.mvp.is_none() => {
                round.mvp = Some(mvp);
                self.standings.credit_mvp(mvp);
                tracing::debug!(round = round.number, mvp, "MVP announced");
            }
            _ => {
                tracing::debug!(mvp, "Ignoring MVP announcement without a round");
            }
        };
    }

    fn accepts_round_events(&self) -> bool {
        !self.warmup && self.open.is_some()
    }

    fn kill(&mut self, time: Duration, kill: KillEvent) {
        if !self.accepts_round_events() {
            tracing::trace!(warmup = self.warmup, "Discarding kill outside of a round");
            return;
        }

        let victim = self.resolve(&kill.victim);
        let killer = kill.killer.as_ref().and_then(|k| self.resolve(k));
        let assister = kill.assister.as_ref().and_then(|a| self.resolve(a));

        if let Some(round) = self.open.as_mut() {
            round.kills.push(Kill {
                time,
                victim,
                killer,
                assister,
                weapon: kill.weapon,
                headshot: kill.headshot,
                assisted_flash: kill.assisted_flash,
                attacker_blind: kill.attacker_blind,
                no_scope: kill.no_scope,
                through_smoke: kill.through_smoke,
                penetrated: kill.penetrated,
            });
        }
    }

    fn damage(&mut self, time: Duration, damage: DamageEvent) {
        if !self.accepts_round_events() {
            tracing::trace!(warmup = self.warmup, "Discarding damage outside of a round");
            return;
        }

        let attacker = damage.attacker.as_ref().and_then(|a| self.resolve(a));
        let victim = damage.victim.as_ref().and_then(|v| self.resolve(v));

        if let Some(round) = self.open.as_mut() {
            round.damage.push(Damage {
                time,
                attacker,
                victim,
                health_damage: damage.health_damage,
            });
        }
    }

    fn rank_update(&mut self, update: RankUpdateEvent) {
        let rank = common::RankChange {
            old_rank: update.old_rank,
            new_rank: update.new_rank,
            win_count: update.win_count,
        };

        if let Err(e) = self.registry.get(update.steam_id) {
            tracing::debug!(%e, "Dropping rank update");
            return;
        }
        self.standings.record_rank(update.steam_id, rank);
    }

    /// Unresolvable participants only lose this one attribution, the event itself is kept.
    fn resolve(&mut self, participant: &Participant) -> Option<u64> {
        match self.registry.resolve(participant, &self.sides) {
            Ok(player) => {
                self.standings.register(player);
                Some(player.steam_id)
            }
            Err(e) => {
                tracing::debug!(%e, "Skipping attribution");
                None
            }
        }
    }
}
