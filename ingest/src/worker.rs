use std::time::Duration;

use analysis::ParserConfig;
use common::MatchResult;

use crate::catalog::MatchRef;
use crate::results::ResultStore;
use crate::storage::RecordingStorage;
use crate::IngestError;

/// Loads the recording and runs the engine over it on the blocking thread pool.
///
/// Once `timeout` elapsed the result is abandoned, the parse itself keeps running on its
/// thread until the recording is exhausted.
#[tracing::instrument(skip_all, fields(match_id = %recording.id))]
pub async fn parse_one(
    storage: &dyn RecordingStorage,
    config: &ParserConfig,
    recording: &MatchRef,
    timeout: Duration,
) -> Result<MatchResult, IngestError> {
    let data = storage.load(recording).await.map_err(|e| {
        tracing::warn!(filename = %recording.filename, %e, "Loading recording");
        IngestError::Unavailable(recording.id)
    })?;

    let config = config.clone();
    let handle = tokio::task::spawn_blocking(move || analysis::parse_one(&config, data.data()));

    let joined = tokio::time::timeout(timeout, handle)
        .await
        .map_err(|_| IngestError::Timeout(timeout))?;
    let result = joined??;

    Ok(result)
}

/// Parses the match and stores the match result together with a row for every player.
#[tracing::instrument(skip_all, fields(match_id = %recording.id))]
pub async fn process(
    storage: &dyn RecordingStorage,
    results: &dyn ResultStore,
    config: &ParserConfig,
    recording: &MatchRef,
    timeout: Duration,
) -> Result<MatchResult, IngestError> {
    let result = parse_one(storage, config, recording, timeout).await?;

    results.persist_result(recording.id, &result).await?;
    for player in result.players() {
        results
            .upsert_player_result(player.steam_id, recording.id, player)
            .await?;
    }

    let (first, second) = result.score();
    tracing::info!(map = %result.map, rounds = result.rounds.len(), "Stored result {}-{}", first, second);

    Ok(result)
}
