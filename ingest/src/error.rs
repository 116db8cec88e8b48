use common::MatchId;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("parsing match: {0}")]
    Parse(#[from] analysis::ParseError),
    #[error("storing result: {0}")]
    Store(String),
    #[error("recording of match {0} is unavailable")]
    Unavailable(MatchId),
    #[error("parse task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("parse did not finish within {0:?}")]
    Timeout(std::time::Duration),
}

impl From<std::io::Error> for IngestError {
    fn from(value: std::io::Error) -> Self {
        Self::Store(value.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Store(value.to_string())
    }
}
