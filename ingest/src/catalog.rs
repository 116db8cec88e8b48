//! Discovery of recordings and the decision which of them still need to be parsed.

use std::collections::HashSet;
use std::path::PathBuf;

use common::MatchId;

use crate::results::ResultStore;
use crate::IngestError;

pub const RECORDING_EXTENSION: &str = "jsonl";

/// A recording known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchRef {
    pub id: MatchId,
    pub filename: String,
}

#[async_trait::async_trait]
pub trait MatchCatalog: Send + Sync {
    /// All recordings that are currently available, ordered by match id.
    async fn recordings(&self) -> Result<Vec<MatchRef>, IngestError>;

    /// Excludes the match from future listings until the process restarts.
    async fn mark_unavailable(&self, recording: &MatchRef);
}

/// Derives the match id from a recording file name without its extension.
///
/// Recordings are named in one of three ways:
/// * `<matchid>`
/// * `<matchid>_<outcomeid>` with a 21 digit match id and a 10 digit outcome id
/// * `match730_<matchid>_<outcomeid>_<token>` with a 3 digit token
pub fn match_id_from_name(name: &str) -> Option<MatchId> {
    fn digits(part: &str, len: usize) -> bool {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    }

    let parts = name.split('_').collect::<Vec<_>>();

    let id = match parts.as_slice() {
        [id] if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => id,
        [id, outcome] if digits(id, 21) && digits(outcome, 10) => id,
        ["match730", id, outcome, token] if digits(id, 21) && digits(outcome, 10) && digits(token, 3) => id,
        _ => return None,
    };

    match id.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(MatchId(id)),
    }
}

/// Lists the recordings of a single directory.
pub struct DirectoryCatalog {
    folder: PathBuf,
    unavailable: tokio::sync::Mutex<HashSet<MatchId>>,
}

impl DirectoryCatalog {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            folder: folder.into(),
            unavailable: tokio::sync::Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait::async_trait]
impl MatchCatalog for DirectoryCatalog {
    async fn recordings(&self) -> Result<Vec<MatchRef>, IngestError> {
        let mut entries = tokio::fs::read_dir(&self.folder).await?;
        let unavailable = self.unavailable.lock().await;

        let mut recordings = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORDING_EXTENSION) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let (stem, filename) = match (
                path.file_stem().and_then(|s| s.to_str()),
                path.file_name().and_then(|s| s.to_str()),
            ) {
                (Some(stem), Some(filename)) => (stem, filename),
                _ => continue,
            };

            let id = match match_id_from_name(stem) {
                Some(id) => id,
                None => {
                    tracing::trace!(filename, "Skipping recording without a match id");
                    continue;
                }
            };

            if unavailable.contains(&id) {
                continue;
            }

            recordings.push(MatchRef {
                id,
                filename: filename.to_owned(),
            });
        }

        recordings.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.filename.cmp(&b.filename)));
        recordings.dedup_by_key(|r| r.id);

        Ok(recordings)
    }

    async fn mark_unavailable(&self, recording: &MatchRef) {
        tracing::warn!(match_id = %recording.id, filename = %recording.filename, "Marking recording as unavailable");
        self.unavailable.lock().await.insert(recording.id);
    }
}

/// Recordings that have no stored result yet, or one produced by an older parser.
pub async fn parseable(
    catalog: &dyn MatchCatalog,
    results: &dyn ResultStore,
    parser_version: u32,
) -> Result<Vec<MatchRef>, IngestError> {
    let mut eligible = Vec::new();

    for recording in catalog.recordings().await? {
        match results.parser_version(recording.id).await {
            Ok(Some(stored)) if stored >= parser_version => {
                tracing::trace!(match_id = %recording.id, stored, "Result is up to date");
            }
            // Only this match is skipped, it is checked again on the next poll
            Err(e) => {
                tracing::error!(match_id = %recording.id, %e, "Checking stored result");
            }
            Ok(stored) => {
                tracing::debug!(match_id = %recording.id, ?stored, "Match needs to be parsed");
                eligible.push(recording);
            }
        };
    }

    Ok(eligible)
}
