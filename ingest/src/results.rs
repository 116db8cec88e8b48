use std::collections::HashMap;
use std::path::PathBuf;

use common::{MatchId, MatchResult, PlayerResult};

use crate::IngestError;

#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    async fn persist_result(&self, match_id: MatchId, result: &MatchResult) -> Result<(), IngestError>;

    /// Overwrites any row that already exists for the player in this match.
    async fn upsert_player_result(
        &self,
        steam_id: u64,
        match_id: MatchId,
        result: &PlayerResult,
    ) -> Result<(), IngestError>;

    /// Version of the parser that produced the stored result, if there is one.
    async fn parser_version(&self, match_id: MatchId) -> Result<Option<u32>, IngestError>;
}

/// Stores results as JSON files below a root directory.
///
/// ```text
/// <root>/matches/<match>.json
/// <root>/players/<steam_id>/<match>.json
/// ```
pub struct FileResultStore {
    root: PathBuf,
}

#[derive(serde::Deserialize)]
struct StoredVersion {
    parser_version: u32,
}

impl FileResultStore {
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    pub fn match_path(&self, match_id: MatchId) -> PathBuf {
        self.root.join("matches").join(format!("{}.json", match_id))
    }

    pub fn player_path(&self, steam_id: u64, match_id: MatchId) -> PathBuf {
        self.root
            .join("players")
            .join(steam_id.to_string())
            .join(format!("{}.json", match_id))
    }

    /// Writes to a temporary file first, so readers never see a partially written result.
    async fn write_json<T>(path: PathBuf, value: &T) -> Result<(), IngestError>
    where
        T: serde::Serialize + Sync,
    {
        let content = serde_json::to_vec_pretty(value)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ResultStore for FileResultStore {
    #[tracing::instrument(skip(self, result))]
    async fn persist_result(&self, match_id: MatchId, result: &MatchResult) -> Result<(), IngestError> {
        Self::write_json(self.match_path(match_id), result).await
    }

    #[tracing::instrument(skip(self, result))]
    async fn upsert_player_result(
        &self,
        steam_id: u64,
        match_id: MatchId,
        result: &PlayerResult,
    ) -> Result<(), IngestError> {
        Self::write_json(self.player_path(steam_id, match_id), result).await
    }

    async fn parser_version(&self, match_id: MatchId) -> Result<Option<u32>, IngestError> {
        let content = match tokio::fs::read(self.match_path(match_id)).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<StoredVersion>(&content) {
            Ok(stored) => Ok(Some(stored.parser_version)),
            Err(e) => {
                tracing::warn!(%match_id, %e, "Stored result is unreadable, treating it as missing");
                Ok(None)
            }
        }
    }
}

/// Keeps every result in memory.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    matches: tokio::sync::Mutex<HashMap<MatchId, MatchResult>>,
    players: tokio::sync::Mutex<HashMap<(u64, MatchId), PlayerResult>>,
    writes: std::sync::atomic::AtomicUsize,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn result(&self, match_id: MatchId) -> Option<MatchResult> {
        self.matches.lock().await.get(&match_id).cloned()
    }

    pub async fn player_result(&self, steam_id: u64, match_id: MatchId) -> Option<PlayerResult> {
        self.players.lock().await.get(&(steam_id, match_id)).cloned()
    }

    pub async fn player_rows(&self) -> usize {
        self.players.lock().await.len()
    }

    /// Number of match results that were persisted, including overwrites.
    pub fn writes(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ResultStore for MemoryResultStore {
    async fn persist_result(&self, match_id: MatchId, result: &MatchResult) -> Result<(), IngestError> {
        self.matches.lock().await.insert(match_id, result.clone());
        self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    async fn upsert_player_result(
        &self,
        steam_id: u64,
        match_id: MatchId,
        result: &PlayerResult,
    ) -> Result<(), IngestError> {
        self.players
            .lock()
            .await
            .insert((steam_id, match_id), result.clone());
        Ok(())
    }

    async fn parser_version(&self, match_id: MatchId) -> Result<Option<u32>, IngestError> {
        Ok(self
            .matches
            .lock()
            .await
            .get(&match_id)
            .map(|r| r.parser_version))
    }
}
