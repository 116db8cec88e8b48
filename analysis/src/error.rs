use crate::events::Affiliation;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("reading recording: {0}")]
    Io(#[from] std::io::Error),
    #[error("recording has no header")]
    MissingHeader,
    #[error("malformed header: {0}")]
    Header(#[source] serde_json::Error),
    #[error("malformed event on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a whole match produced no result.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("stream ended after {rounds} rounds without the match ending")]
    IncompleteStream { rounds: usize },
}

/// A participant could not be attributed, only the single attribution is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("participant {0} is not a player")]
    NotAPlayer(u64),
    #[error("participant {steam_id} is not on a playing team ({affiliation:?})")]
    NoSide {
        steam_id: u64,
        affiliation: Affiliation,
    },
    #[error("participant {0} is not registered")]
    Unknown(u64),
}
