use std::time::Duration;

/// The persisted outcome of parsing one match.
///
/// `teams` is indexed by the side a team started on, `rounds` is in play order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchResult {
    pub parser_version: u32,
    pub map: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub duration: Duration,
    pub teams: [TeamResult; 2],
    pub rounds: Vec<RoundResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamResult {
    /// 0 for the team that started as the attackers, 1 for the defenders
    pub starting_side: u8,
    pub players: Vec<PlayerResult>,
    pub wins: u16,
    pub pistol_round_wins: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerResult {
    pub steam_id: u64,
    pub name: String,
    pub kills: u16,
    pub entry_kills: u16,
    pub headshots: u16,
    pub assists: u16,
    pub deaths: u16,
    pub mvps: u16,
    pub damage_dealt: u32,
    pub opening_duel_attempts: u16,
    pub won_1v3: u16,
    pub won_1v4: u16,
    pub won_1v5: u16,
    pub rounds_with_3k: u16,
    pub rounds_with_4k: u16,
    pub rounds_with_5k: u16,
    pub rank: Option<RankChange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RankChange {
    pub old_rank: i32,
    pub new_rank: i32,
    pub win_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundResult {
    pub number: u16,
    pub duration: Duration,
    /// `None` when the round ended without a winner that maps onto one of the two teams
    pub winner: Option<u8>,
    pub reason: Option<String>,
    pub mvp: Option<u64>,
    pub kills: Vec<KillResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KillResult {
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

impl MatchResult {
    /// Final score as (starting attackers, starting defenders).
    pub fn score(&self) -> (u16, u16) {
        (self.teams[0].wins, self.teams[1].wins)
    }

    pub fn player(&self, steam_id: u64) -> Option<&PlayerResult> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .find(|p| p.steam_id == steam_id)
    }

    pub fn team_of(&self, steam_id: u64) -> Option<&TeamResult> {
        self.teams
            .iter()
            .find(|t| t.players.iter().any(|p| p.steam_id == steam_id))
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerResult> {
        self.teams.iter().flat_map(|t| t.players.iter())
    }
}

impl PlayerResult {
    pub fn new(steam_id: u64, name: String) -> Self {
        Self {
            steam_id,
            name,
            ..Default::default()
        }
    }

    /// Share of kills that were headshots, truncated to a whole percent.
    pub fn headshot_percentage(&self) -> u8 {
        if self.kills == 0 {
            return 0;
        }

        ((self.headshots as f32 / self.kills as f32) * 100.0) as u8
    }
}
