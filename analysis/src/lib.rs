pub mod aggregator;
pub mod attribution;
pub mod events;
pub mod recording;
pub mod registry;
pub mod round;
pub mod side;
pub mod tracker;

mod config;
pub use config::{ParserConfig, PARSER_VERSION};

mod error;
pub use error::{ParseError, ResolveError, SourceError};

/// Parses a full recording into the result of its match.
pub fn parse_one(config: &ParserConfig, buf: &[u8]) -> Result<common::MatchResult, ParseError> {
    let recording = recording::Recording::parse(buf)?;

    tracing::debug!(map = %recording.header().map, "Parsing recording");

    aggregator::MatchAggregator::run(
        config.clone(),
        recording.header().clone(),
        recording.events(),
    )
}
